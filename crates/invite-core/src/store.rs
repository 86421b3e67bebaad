//! RSVP Record Store
//!
//! Where the last confirmed RSVP lives between page loads. The browser
//! build uses localStorage; tests use the in-memory store.

use std::cell::RefCell;

use thiserror::Error;

use crate::models::RsvpRecord;
use crate::rsvp::MAX_COMPANIONS;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("could not encode record: {0}")]
    Encode(String),
}

pub trait RsvpStore {
    /// Previously saved record. Unreadable entries count as absent.
    fn load(&self) -> Option<RsvpRecord>;

    /// Replace whatever was saved before
    fn save(&self, record: &RsvpRecord) -> Result<(), StoreError>;

    fn clear(&self);
}

#[derive(Default)]
pub struct MemoryRsvpStore {
    slot: RefCell<Option<RsvpRecord>>,
}

impl MemoryRsvpStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: RsvpRecord) -> Self {
        Self {
            slot: RefCell::new(Some(record)),
        }
    }
}

impl RsvpStore for MemoryRsvpStore {
    fn load(&self) -> Option<RsvpRecord> {
        self.slot.borrow().clone()
    }

    fn save(&self, record: &RsvpRecord) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = Some(record.clone());
        Ok(())
    }

    fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}

/// Decode a cached record, logging and discarding anything unreadable
pub fn decode_record(raw: &str) -> Option<RsvpRecord> {
    match serde_json::from_str::<RsvpRecord>(raw) {
        Ok(record) if record.name.trim().is_empty() => {
            log::warn!("ignoring cached RSVP with empty name");
            None
        }
        Ok(record) if i64::from(record.companion_count) > MAX_COMPANIONS => {
            log::warn!("ignoring cached RSVP with {} companions", record.companion_count);
            None
        }
        Ok(record) => Some(record),
        Err(e) => {
            log::warn!("ignoring unreadable cached RSVP: {}", e);
            None
        }
    }
}

pub fn encode_record(record: &RsvpRecord) -> Result<String, StoreError> {
    serde_json::to_string(record).map_err(|e| StoreError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> RsvpRecord {
        RsvpRecord {
            name: "Ana".to_string(),
            companion_count: 2,
            confirmed: true,
        }
    }

    #[test]
    fn test_memory_store_roundtrip_and_clear() {
        let store = MemoryRsvpStore::new();
        assert!(store.load().is_none());
        store.save(&ana()).unwrap();
        assert_eq!(store.load(), Some(ana()));
        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_overwrites() {
        let store = MemoryRsvpStore::with_record(ana());
        let mut other = ana();
        other.name = "Luis".to_string();
        other.companion_count = 0;
        store.save(&other).unwrap();
        assert_eq!(store.load(), Some(other));
    }

    #[test]
    fn test_decode_rejects_companions_over_limit() {
        assert!(decode_record(r#"{"name":"Ana","guests":11,"confirmed":true}"#).is_none());
        let at_limit = decode_record(r#"{"name":"Ana","guests":10,"confirmed":true}"#);
        assert_eq!(at_limit.map(|r| r.companion_count), Some(10));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_record("not json").is_none());
        assert!(decode_record(r#"{"name":"  ","guests":1,"confirmed":true}"#).is_none());
        assert!(decode_record(r#"{"name":"Ana","guests":-1,"confirmed":true}"#).is_none());
        assert_eq!(
            decode_record(&encode_record(&ana()).unwrap()),
            Some(ana())
        );
    }
}
