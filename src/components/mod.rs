//! UI Components
//!
//! Leptos components for each section of the invitation.

mod countdown_panel;
mod event_details;
mod gift_card;
mod gift_registry;
mod reserve_dialog;
mod rsvp_form;

pub use countdown_panel::CountdownPanel;
pub use event_details::{EventInfo, Hero};
pub use gift_card::GiftCard;
pub use gift_registry::GiftRegistry;
pub use reserve_dialog::ReserveDialog;
pub use rsvp_form::RsvpForm;
