//! Gift Registry
//!
//! Read-only snapshot of the server's gift list plus the reservation
//! dialog. The server is the only one allowed to mark a gift reserved: a
//! successful reservation closes the dialog and re-fetches, a failed one
//! leaves both the list and the dialog untouched.

use std::cell::Cell;
use std::rc::Rc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::api::InviteApi;
use crate::error::ErrorKind;
use crate::models::{GiftItem, GiftStatus};
use crate::watch::Watched;

/// Same characters a browser leaves alone in `encodeURIComponent`
pub const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Name-capture step for one gift
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationDialog {
    pub gift_id: String,
    pub gift_title: String,
    pub submitting: bool,
    pub error: Option<ErrorKind>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrySnapshot {
    /// Sorted by `sort_order`, server order among equals
    pub gifts: Vec<GiftItem>,
    pub loading: bool,
    /// At least one fetch has finished, successfully or not
    pub loaded: bool,
    /// Last list failure; cleared by the next successful fetch
    pub error: Option<ErrorKind>,
    pub dialog: Option<ReservationDialog>,
}

impl RegistrySnapshot {
    pub fn available_count(&self) -> usize {
        self.count(GiftStatus::Available)
    }

    pub fn reserved_count(&self) -> usize {
        self.count(GiftStatus::Reserved)
    }

    fn count(&self, status: GiftStatus) -> usize {
        self.gifts.iter().filter(|g| g.status == status).count()
    }
}

/// Public image for a gift, if one can be resolved.
///
/// A URL from the server wins. A bare storage path is encoded and joined to
/// the bucket base. `None` means the card shows a placeholder.
pub fn resolve_image_url(gift: &GiftItem, image_base_url: &str) -> Option<String> {
    let present = |s: &Option<String>| {
        s.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    if let Some(url) = present(&gift.image_public_url) {
        return Some(url);
    }
    let path = present(&gift.image_path)?;
    let base = image_base_url.trim_end_matches('/');
    if base.is_empty() {
        return None;
    }
    Some(format!("{}/{}", base, utf8_percent_encode(&path, COMPONENT_ENCODE_SET)))
}

pub struct GiftRegistryClient {
    api: Rc<dyn InviteApi>,
    image_base_url: String,
    reserving: Cell<bool>,
    /// Set when the server changed under an outstanding fetch
    stale: Cell<bool>,
    state: Watched<RegistrySnapshot>,
}

impl GiftRegistryClient {
    pub fn new(api: Rc<dyn InviteApi>, image_base_url: impl Into<String>) -> Self {
        Self {
            api,
            image_base_url: image_base_url.into(),
            reserving: Cell::new(false),
            stale: Cell::new(false),
            state: Watched::new(RegistrySnapshot::default()),
        }
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        self.state.get()
    }

    pub fn subscribe(&self, listener: impl Fn(&RegistrySnapshot) + 'static) {
        self.state.subscribe(listener);
    }

    pub fn image_url(&self, gift: &GiftItem) -> Option<String> {
        resolve_image_url(gift, &self.image_base_url)
    }

    /// Fetch every gift, ordered for display
    pub async fn list(&self) -> Result<Vec<GiftItem>, ErrorKind> {
        let mut gifts = self.api.list_gifts().await.map_err(|e| {
            log::warn!("gift list failed: {}", e);
            ErrorKind::fetch_failed(&e)
        })?;
        // Stable, so equal sort orders keep response order
        gifts.sort_by_key(|g| g.sort_order);
        Ok(gifts)
    }

    /// Replace the snapshot with a fresh list.
    ///
    /// On failure the previous gifts stay visible next to the error. If the
    /// list is marked stale while the fetch is outstanding, the result is
    /// discarded and fetched again.
    pub async fn refresh(&self) -> Result<(), ErrorKind> {
        if self.state.with(|s| s.loading) {
            return Err(ErrorKind::InFlight);
        }
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });

        let result = loop {
            self.stale.set(false);
            let result = self.list().await;
            if !self.stale.get() {
                break result;
            }
            log::debug!("gift list changed during fetch, fetching again");
        };
        self.state.update(|s| {
            s.loading = false;
            s.loaded = true;
            match &result {
                Ok(gifts) => s.gifts = gifts.clone(),
                Err(err) => s.error = Some(err.clone()),
            }
        });
        result.map(|gifts| log::info!("loaded {} gifts", gifts.len()))
    }

    /// Open the name dialog for `gift`. Returns whether it opened.
    ///
    /// A gift already reserved (possibly by someone else since the last
    /// fetch) is ignored.
    pub fn begin_reservation(&self, gift: &GiftItem) -> bool {
        if !gift.is_available() || self.reserving.get() {
            log::debug!("reservation not opened for {} ({:?})", gift.id, gift.status);
            return false;
        }
        self.state.update(|s| {
            s.dialog = Some(ReservationDialog {
                gift_id: gift.id.clone(),
                gift_title: gift.title.clone(),
                submitting: false,
                error: None,
            })
        });
        true
    }

    /// Close the dialog; refused while a reservation is in flight
    pub fn cancel_reservation(&self) -> bool {
        if self.reserving.get() {
            return false;
        }
        self.state.update(|s| s.dialog = None);
        true
    }

    pub async fn confirm_reservation(&self, gift_id: &str, name: &str) -> Result<(), ErrorKind> {
        if self.reserving.get() {
            return Err(ErrorKind::InFlight);
        }
        if !self.state.with(|s| s.dialog.as_ref().is_some_and(|d| d.gift_id == gift_id)) {
            log::debug!("reservation of {} without an open dialog", gift_id);
            return Err(ErrorKind::validation("Selecciona un regalo disponible para reservar."));
        }
        let name = name.trim();
        if name.is_empty() {
            let err = ErrorKind::validation("Ingresa tu nombre para reservar.");
            self.update_dialog(gift_id, |d| d.error = Some(err.clone()));
            return Err(err);
        }

        self.reserving.set(true);
        self.update_dialog(gift_id, |d| {
            d.submitting = true;
            d.error = None;
        });

        let result = self.api.reserve_gift(gift_id, name).await;
        self.reserving.set(false);

        match result {
            Ok(()) => {
                log::info!("gift {} reserved by {}", gift_id, name);
                self.state.update(|s| s.dialog = None);
                if self.state.with(|s| s.loading) {
                    // The outstanding fetch may predate the reservation
                    self.stale.set(true);
                } else if let Err(e) = self.refresh().await {
                    log::warn!("reserved, but the list did not refresh: {}", e);
                }
                Ok(())
            }
            Err(e) => {
                log::warn!("reservation of {} rejected: {}", gift_id, e);
                let err = ErrorKind::reservation_rejected(e);
                self.update_dialog(gift_id, |d| {
                    d.submitting = false;
                    d.error = Some(err.clone());
                });
                Err(err)
            }
        }
    }

    fn update_dialog(&self, gift_id: &str, f: impl FnOnce(&mut ReservationDialog)) {
        self.state.update(|s| {
            if let Some(dialog) = s.dialog.as_mut().filter(|d| d.gift_id == gift_id) {
                f(dialog);
            }
        });
    }
}
