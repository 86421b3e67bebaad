//! Event Details
//!
//! Who, where and when, plus the links the page offers for them.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use percent_encoding::utf8_percent_encode;

use crate::registry::COMPONENT_ENCODE_SET;

const MONTHS: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio",
    "julio", "agosto", "septiembre", "octubre", "noviembre", "diciembre",
];

const GOOGLE_CALENDAR_RENDER: &str = "https://calendar.google.com/calendar/render";

#[derive(Debug, Clone, PartialEq)]
pub struct EventDetails {
    pub title: String,
    pub honoree: String,
    pub parents: String,
    pub address: String,
    pub district: String,
    pub maps_url: String,
    /// Local time of the venue
    pub starts_at: DateTime<FixedOffset>,
    pub ends_at: DateTime<FixedOffset>,
}

impl EventDetails {
    /// e.g. "31 de enero de 2026"
    pub fn date_label(&self) -> String {
        let d = self.starts_at;
        format!("{} de {} de {}", d.day(), MONTHS[d.month0() as usize], d.year())
    }

    /// e.g. "4:00 PM"
    pub fn time_label(&self) -> String {
        let (pm, hour) = self.starts_at.hour12();
        format!("{}:{:02} {}", hour, self.starts_at.minute(), if pm { "PM" } else { "AM" })
    }

    pub fn location(&self) -> String {
        format!("{} {}", self.address, self.district)
    }

    /// Google Calendar "add event" link for the event window
    pub fn calendar_url(&self) -> String {
        let stamp = |t: DateTime<FixedOffset>| {
            t.with_timezone(&Utc).format("%Y%m%dT%H%M%SZ").to_string()
        };
        let encode = |s: &str| utf8_percent_encode(s, COMPONENT_ENCODE_SET).to_string();
        let dates = format!("{}/{}", stamp(self.starts_at), stamp(self.ends_at));
        format!(
            "{}?action=TEMPLATE&dates={}&details=&location={}&text={}",
            GOOGLE_CALENDAR_RENDER,
            encode(&dates),
            encode(&self.location()),
            encode(&self.title)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shower() -> EventDetails {
        EventDetails {
            title: "Baby Shower de Miranda".to_string(),
            honoree: "Miranda".to_string(),
            parents: "Israel & Josly".to_string(),
            address: "Calle Dr. Cayetano Valmore Roncalla 225".to_string(),
            district: "San Isidro".to_string(),
            maps_url: "https://maps.app.goo.gl/1Ty3R3StsPvpvkxt8".to_string(),
            starts_at: DateTime::parse_from_rfc3339("2026-01-31T16:00:00-05:00").unwrap(),
            ends_at: DateTime::parse_from_rfc3339("2026-01-31T22:30:00-05:00").unwrap(),
        }
    }

    #[test]
    fn test_labels_use_venue_time() {
        let event = shower();
        assert_eq!(event.date_label(), "31 de enero de 2026");
        assert_eq!(event.time_label(), "4:00 PM");
    }

    #[test]
    fn test_morning_label() {
        let mut event = shower();
        event.starts_at = DateTime::parse_from_rfc3339("2026-03-01T09:05:00-05:00").unwrap();
        assert_eq!(event.time_label(), "9:05 AM");
        assert_eq!(event.date_label(), "1 de marzo de 2026");
    }

    #[test]
    fn test_calendar_url() {
        let url = shower().calendar_url();
        assert_eq!(
            url,
            "https://calendar.google.com/calendar/render?action=TEMPLATE\
             &dates=20260131T210000Z%2F20260201T033000Z\
             &details=\
             &location=Calle%20Dr.%20Cayetano%20Valmore%20Roncalla%20225%20San%20Isidro\
             &text=Baby%20Shower%20de%20Miranda"
        );
    }
}
