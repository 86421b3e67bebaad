//! Page State Store
//!
//! Mirrors the core sessions into reactive_stores so components re-render
//! per field.

use leptos::prelude::*;
use reactive_stores::Store;
use invite_core::{RegistrySnapshot, RsvpState};

#[derive(Clone, Debug, Default, Store)]
pub struct PageState {
    /// RSVP form / confirmation
    pub rsvp: RsvpState,
    /// Gift list, loading flag and reservation dialog
    pub registry: RegistrySnapshot,
}

pub type PageStore = Store<PageState>;

pub fn use_page_store() -> PageStore {
    expect_context::<PageStore>()
}

// ========================
// Store Helper Functions
// ========================

// Sessions can outlive the page owner (a request finishing after
// teardown), so writes go through try_write.

pub fn store_set_rsvp(store: &PageStore, state: RsvpState) {
    if let Some(mut slot) = store.rsvp().try_write() {
        *slot = state;
    }
}

pub fn store_set_registry(store: &PageStore, snapshot: RegistrySnapshot) {
    if let Some(mut slot) = store.registry().try_write() {
        *slot = snapshot;
    }
}
