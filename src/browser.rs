//! Browser Adapters
//!
//! localStorage-backed RSVP store and a gloo interval tick source.

use std::time::Duration;

use gloo_timers::callback::Interval;
use invite_core::store::{decode_record, encode_record};
use invite_core::{RsvpRecord, RsvpStore, StoreError, TickHandle, TickSource};
use web_sys::Storage;

pub struct LocalStorageRsvpStore {
    key: &'static str,
}

impl LocalStorageRsvpStore {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }

    fn storage(&self) -> Result<Storage, StoreError> {
        web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))
    }
}

impl RsvpStore for LocalStorageRsvpStore {
    fn load(&self) -> Option<RsvpRecord> {
        let storage = self
            .storage()
            .map_err(|e| log::warn!("cannot read cached RSVP: {}", e))
            .ok()?;
        let raw = storage.get_item(self.key).ok().flatten()?;
        decode_record(&raw)
    }

    fn save(&self, record: &RsvpRecord) -> Result<(), StoreError> {
        let raw = encode_record(record)?;
        self.storage()?
            .set_item(self.key, &raw)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }

    fn clear(&self) {
        match self.storage() {
            Ok(storage) => {
                if let Err(e) = storage.remove_item(self.key) {
                    log::warn!("cannot clear cached RSVP: {:?}", e);
                }
            }
            Err(e) => log::warn!("cannot clear cached RSVP: {}", e),
        }
    }
}

/// `setInterval` through gloo; the interval dies with its handle
pub struct IntervalTicks;

impl TickSource for IntervalTicks {
    fn every(&self, period: Duration, mut on_tick: Box<dyn FnMut()>) -> TickHandle {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        let interval = Interval::new(millis, move || on_tick());
        TickHandle::new(move || drop(interval))
    }
}
