//! Application Context
//!
//! Configuration and the two sessions, provided via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;
use invite_core::{GiftRegistryClient, InviteConfig, RsvpSession};

/// App-wide services provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    config: StoredValue<InviteConfig>,
    rsvp: StoredValue<Rc<RsvpSession>, LocalStorage>,
    registry: StoredValue<Rc<GiftRegistryClient>, LocalStorage>,
}

impl AppContext {
    pub fn new(
        config: InviteConfig,
        rsvp: Rc<RsvpSession>,
        registry: Rc<GiftRegistryClient>,
    ) -> Self {
        Self {
            config: StoredValue::new(config),
            rsvp: StoredValue::new_local(rsvp),
            registry: StoredValue::new_local(registry),
        }
    }

    pub fn config<R>(&self, f: impl FnOnce(&InviteConfig) -> R) -> R {
        self.config.with_value(f)
    }

    pub fn rsvp(&self) -> Rc<RsvpSession> {
        self.rsvp.get_value()
    }

    pub fn registry(&self) -> Rc<GiftRegistryClient> {
        self.registry.get_value()
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
