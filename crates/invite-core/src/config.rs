//! Configuration
//!
//! Resolved once at startup. Values are baked in at build time through
//! `option_env!`; anything unset falls back to the defaults below.

use chrono::{DateTime, FixedOffset, Utc};
use log::LevelFilter;
use thiserror::Error;

use crate::event::EventDetails;

pub const DEFAULT_API_BASE: &str = "https://baby-shower-back-production.up.railway.app";
pub const DEFAULT_IMAGE_BASE: &str =
    "https://qprwptddaycddpbaufwf.supabase.co/storage/v1/object/public/gifts";
pub const DEFAULT_COUNTDOWN_TARGET: &str = "2026-01-31T17:30:00-05:00";
pub const DEFAULT_EVENT_START: &str = "2026-01-31T16:00:00-05:00";
pub const DEFAULT_EVENT_END: &str = "2026-01-31T22:30:00-05:00";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_EVENT_TITLE: &str = "Baby Shower de Miranda";
pub const DEFAULT_HONOREE: &str = "Miranda";
pub const DEFAULT_PARENTS: &str = "Israel & Josly";
pub const DEFAULT_VENUE_ADDRESS: &str = "Calle Dr. Cayetano Valmore Roncalla 225";
pub const DEFAULT_VENUE_DISTRICT: &str = "San Isidro";
pub const DEFAULT_MAPS_URL: &str = "https://maps.app.goo.gl/1Ty3R3StsPvpvkxt8";

/// localStorage key of the cached RSVP
pub const RSVP_STORAGE_KEY: &str = "babyShowerRSVP";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be an absolute http(s) URL, got {value:?}")]
    InvalidUrl { key: &'static str, value: String },

    #[error("{key} is not an RFC 3339 timestamp ({value:?}): {reason}")]
    InvalidTimestamp {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("event must end after it starts")]
    EventWindow,

    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InviteConfig {
    /// Base of the invitation backend, without trailing slash
    pub api_base_url: String,
    /// Public bucket gift images are served from
    pub image_base_url: String,
    pub countdown_target: DateTime<Utc>,
    pub event: EventDetails,
    pub rsvp_storage_key: &'static str,
    pub log_level: LevelFilter,
}

impl InviteConfig {
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let value = match key {
                "SHOWER_API_BASE" => option_env!("SHOWER_API_BASE"),
                "SHOWER_IMAGE_BASE" => option_env!("SHOWER_IMAGE_BASE"),
                "SHOWER_COUNTDOWN_TARGET" => option_env!("SHOWER_COUNTDOWN_TARGET"),
                "SHOWER_EVENT_START" => option_env!("SHOWER_EVENT_START"),
                "SHOWER_EVENT_END" => option_env!("SHOWER_EVENT_END"),
                "SHOWER_LOG_LEVEL" => option_env!("SHOWER_LOG_LEVEL"),
                "SHOWER_EVENT_TITLE" => option_env!("SHOWER_EVENT_TITLE"),
                "SHOWER_HONOREE" => option_env!("SHOWER_HONOREE"),
                "SHOWER_PARENTS" => option_env!("SHOWER_PARENTS"),
                "SHOWER_VENUE_ADDRESS" => option_env!("SHOWER_VENUE_ADDRESS"),
                "SHOWER_VENUE_DISTRICT" => option_env!("SHOWER_VENUE_DISTRICT"),
                "SHOWER_MAPS_URL" => option_env!("SHOWER_MAPS_URL"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &'static str, default: &str| -> String {
            match lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
                Some(value) => value,
                None => {
                    log::info!("{key} not set, using default: {default}");
                    default.to_string()
                }
            }
        };

        let api_base_url = parse_url("SHOWER_API_BASE", &var("SHOWER_API_BASE", DEFAULT_API_BASE))?;
        let image_base_url =
            parse_url("SHOWER_IMAGE_BASE", &var("SHOWER_IMAGE_BASE", DEFAULT_IMAGE_BASE))?;
        let countdown_target = parse_timestamp(
            "SHOWER_COUNTDOWN_TARGET",
            &var("SHOWER_COUNTDOWN_TARGET", DEFAULT_COUNTDOWN_TARGET),
        )?
        .with_timezone(&Utc);
        let starts_at =
            parse_timestamp("SHOWER_EVENT_START", &var("SHOWER_EVENT_START", DEFAULT_EVENT_START))?;
        let ends_at =
            parse_timestamp("SHOWER_EVENT_END", &var("SHOWER_EVENT_END", DEFAULT_EVENT_END))?;
        if ends_at <= starts_at {
            return Err(ConfigError::EventWindow);
        }
        let event = EventDetails {
            title: var("SHOWER_EVENT_TITLE", DEFAULT_EVENT_TITLE),
            honoree: var("SHOWER_HONOREE", DEFAULT_HONOREE),
            parents: var("SHOWER_PARENTS", DEFAULT_PARENTS),
            address: var("SHOWER_VENUE_ADDRESS", DEFAULT_VENUE_ADDRESS),
            district: var("SHOWER_VENUE_DISTRICT", DEFAULT_VENUE_DISTRICT),
            maps_url: parse_url("SHOWER_MAPS_URL", &var("SHOWER_MAPS_URL", DEFAULT_MAPS_URL))?,
            starts_at,
            ends_at,
        };
        let level = var("SHOWER_LOG_LEVEL", DEFAULT_LOG_LEVEL);
        let log_level = level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::InvalidLogLevel(level.clone()))?;

        Ok(Self {
            api_base_url,
            image_base_url,
            countdown_target,
            event,
            rsvp_storage_key: RSVP_STORAGE_KEY,
            log_level,
        })
    }
}

fn parse_url(key: &'static str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        return Err(ConfigError::InvalidUrl {
            key,
            value: value.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

fn parse_timestamp(key: &'static str, value: &str) -> Result<DateTime<FixedOffset>, ConfigError> {
    DateTime::parse_from_rfc3339(value).map_err(|e| ConfigError::InvalidTimestamp {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
