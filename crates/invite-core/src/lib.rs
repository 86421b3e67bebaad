//! Invitation Core
//!
//! Everything the invitation page decides on its own, kept free of the
//! browser so it can be tested natively:
//! - countdown: time remaining until the event, driven by a tick source
//! - rsvp: attendance confirmation session with a local record cache
//! - registry: gift list snapshot and the reservation flow
//! - api: the remote HTTP collaborator and its reqwest implementation

pub mod api;
pub mod config;
pub mod countdown;
pub mod error;
pub mod event;
pub mod models;
pub mod registry;
pub mod rsvp;
pub mod store;
pub mod watch;

#[cfg(test)]
mod testing;

pub use api::{ApiError, HttpInviteApi, InviteApi};
pub use config::{ConfigError, InviteConfig};
pub use countdown::{
    compute, Clock, Countdown, ManualClock, ManualTicks, SystemClock, TickHandle, TickSource,
    TimeRemaining, TimeUnit,
};
pub use error::ErrorKind;
pub use event::EventDetails;
pub use models::{GiftItem, GiftStatus, RsvpRecord, RsvpRequest, ReserveRequest};
pub use registry::{resolve_image_url, GiftRegistryClient, RegistrySnapshot, ReservationDialog};
pub use rsvp::{parse_companion_input, RsvpPhase, RsvpSession, RsvpState, MAX_COMPANIONS};
pub use store::{MemoryRsvpStore, RsvpStore, StoreError};
pub use watch::Watched;
