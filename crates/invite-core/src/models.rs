//! Models
//!
//! Data structures matching the invitation backend and the locally cached
//! RSVP record.

use serde::{Deserialize, Deserializer, Serialize};

/// Reservation status as reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GiftStatus {
    Available,
    Reserved,
}

/// One registry entry (matches `GET /gifts`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub buy_url: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub image_public_url: Option<String>,
    pub status: GiftStatus,
    #[serde(default)]
    pub reserved_by_name: Option<String>,
    /// Kept as sent; only displayed, never parsed
    #[serde(default)]
    pub reserved_at: Option<String>,
    /// Missing or `null` sorts as 0
    #[serde(default, deserialize_with = "null_as_zero")]
    pub sort_order: i64,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}

impl GiftItem {
    pub fn is_available(&self) -> bool {
        self.status == GiftStatus::Available
    }
}

/// Body of `POST /rsvp`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpRequest {
    pub full_name: String,
    pub companions_count: u32,
}

/// Body of `POST /gifts/{id}/reserve`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveRequest {
    pub reserved_by_name: String,
}

/// Last successful RSVP, as cached in the browser.
///
/// Serialized as `{name, guests, confirmed}` so records saved by earlier
/// builds of the page still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpRecord {
    pub name: String,
    #[serde(rename = "guests")]
    pub companion_count: u32,
    pub confirmed: bool,
}

impl RsvpRecord {
    pub fn to_request(&self) -> RsvpRequest {
        RsvpRequest {
            full_name: self.name.clone(),
            companions_count: self.companion_count,
        }
    }

    /// Line shown under the guest's name once confirmed
    pub fn attendance_summary(&self) -> String {
        match self.companion_count {
            0 => "Asistirás solo/a".to_string(),
            1 => "Asistirás con 1 acompañante".to_string(),
            n => format!("Asistirás con {} acompañantes", n),
        }
    }
}
