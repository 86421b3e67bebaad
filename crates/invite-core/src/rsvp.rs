//! RSVP Session
//!
//! Editing -> (submit ok) -> Confirmed -> (reset) -> Editing
//! Editing -> (submit fails) -> Editing, with the error kept for display
//!
//! The local cache only ever mirrors a submission the server accepted.

use std::rc::Rc;

use crate::api::InviteApi;
use crate::error::ErrorKind;
use crate::models::RsvpRecord;
use crate::store::RsvpStore;
use crate::watch::Watched;

pub const MAX_COMPANIONS: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RsvpPhase {
    Editing,
    /// Request outstanding; the form stays locked
    Submitting,
    Confirmed(RsvpRecord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpState {
    pub phase: RsvpPhase,
    pub error: Option<ErrorKind>,
}

impl RsvpState {
    pub fn is_submitting(&self) -> bool {
        self.phase == RsvpPhase::Submitting
    }

    pub fn confirmed(&self) -> Option<&RsvpRecord> {
        match &self.phase {
            RsvpPhase::Confirmed(record) => Some(record),
            _ => None,
        }
    }
}

impl Default for RsvpState {
    fn default() -> Self {
        Self {
            phase: RsvpPhase::Editing,
            error: None,
        }
    }
}

pub struct RsvpSession {
    api: Rc<dyn InviteApi>,
    store: Rc<dyn RsvpStore>,
    state: Watched<RsvpState>,
}

impl RsvpSession {
    /// Starts Confirmed when a previous record is cached
    pub fn new(api: Rc<dyn InviteApi>, store: Rc<dyn RsvpStore>) -> Self {
        let session = Self {
            api,
            store,
            state: Watched::new(RsvpState::default()),
        };
        if let Some(record) = session.load_cached() {
            log::info!("restored cached RSVP for {}", record.name);
            session.state.set(RsvpState {
                phase: RsvpPhase::Confirmed(record),
                error: None,
            });
        }
        session
    }

    pub fn load_cached(&self) -> Option<RsvpRecord> {
        self.store.load()
    }

    pub fn state(&self) -> RsvpState {
        self.state.get()
    }

    pub fn subscribe(&self, listener: impl Fn(&RsvpState) + 'static) {
        self.state.subscribe(listener);
    }

    pub async fn submit(&self, name: &str, companion_count: i64) -> Result<RsvpRecord, ErrorKind> {
        if self.state.with(RsvpState::is_submitting) {
            return Err(ErrorKind::InFlight);
        }

        let record = match validate(name, companion_count) {
            Ok(record) => record,
            Err(err) => {
                self.state.update(|s| s.error = Some(err.clone()));
                return Err(err);
            }
        };

        // A failed re-submission falls back to the form, not the old record
        self.state.set(RsvpState {
            phase: RsvpPhase::Submitting,
            error: None,
        });

        let request = record.to_request();
        match self.api.submit_rsvp(&request).await {
            Ok(()) => {
                if let Err(e) = self.store.save(&record) {
                    log::warn!("RSVP accepted but not cached: {}", e);
                }
                log::info!("RSVP confirmed for {} (+{})", record.name, record.companion_count);
                self.state.set(RsvpState {
                    phase: RsvpPhase::Confirmed(record.clone()),
                    error: None,
                });
                Ok(record)
            }
            Err(e) => {
                log::warn!("RSVP rejected: {}", e);
                let err = ErrorKind::remote_rejected(e);
                self.state.set(RsvpState {
                    phase: RsvpPhase::Editing,
                    error: Some(err.clone()),
                });
                Err(err)
            }
        }
    }

    /// Local only: the server keeps whatever it was last sent
    pub fn reset(&self) {
        if self.state.with(RsvpState::is_submitting) {
            return;
        }
        self.store.clear();
        self.state.set(RsvpState::default());
    }
}

/// Companion field as typed. Anything that is not an integer counts as 0;
/// range checking is left to `submit`.
pub fn parse_companion_input(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

fn validate(name: &str, companion_count: i64) -> Result<RsvpRecord, ErrorKind> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ErrorKind::validation("Ingresa tu nombre."));
    }
    if !(0..=MAX_COMPANIONS).contains(&companion_count) {
        return Err(ErrorKind::validation(format!(
            "El número de acompañantes debe estar entre 0 y {}.",
            MAX_COMPANIONS
        )));
    }
    Ok(RsvpRecord {
        name: name.to_string(),
        companion_count: companion_count as u32,
        confirmed: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::store::MemoryRsvpStore;
    use crate::testing::FakeInviteApi;
    use futures::channel::oneshot;
    use std::cell::RefCell;

    #[test]
    fn test_parse_companion_input() {
        assert_eq!(parse_companion_input(" 3 "), 3);
        assert_eq!(parse_companion_input(""), 0);
        assert_eq!(parse_companion_input("dos"), 0);
        assert_eq!(parse_companion_input("-1"), -1);
        assert_eq!(parse_companion_input("11"), 11);
    }

    fn session_with(api: &Rc<FakeInviteApi>, store: &Rc<MemoryRsvpStore>) -> RsvpSession {
        RsvpSession::new(api.clone(), store.clone())
    }

    fn ana(companions: u32) -> RsvpRecord {
        RsvpRecord {
            name: "Ana".to_string(),
            companion_count: companions,
            confirmed: true,
        }
    }

    #[tokio::test]
    async fn test_blank_name_never_calls_server() {
        let api = Rc::new(FakeInviteApi::new());
        let store = Rc::new(MemoryRsvpStore::new());
        let session = session_with(&api, &store);

        for name in ["", "   "] {
            let err = session.submit(name, 1).await.unwrap_err();
            assert!(matches!(err, ErrorKind::Validation(_)));
            assert_eq!(session.state().phase, RsvpPhase::Editing);
        }
        assert_eq!(api.rsvp_calls(), 0);
        assert!(store.load().is_none());
    }

    #[tokio::test]
    async fn test_companion_count_out_of_range() {
        let api = Rc::new(FakeInviteApi::new());
        let store = Rc::new(MemoryRsvpStore::new());
        let session = session_with(&api, &store);

        assert!(matches!(session.submit("Ana", -1).await, Err(ErrorKind::Validation(_))));
        assert!(matches!(session.submit("Ana", 11).await, Err(ErrorKind::Validation(_))));
        assert_eq!(api.rsvp_calls(), 0);
        assert!(session.state().error.is_some());

        assert!(session.submit("Ana", 10).await.is_ok());
    }

    #[tokio::test]
    async fn test_successful_submit_caches_and_confirms() {
        let api = Rc::new(FakeInviteApi::new());
        let store = Rc::new(MemoryRsvpStore::new());
        let session = session_with(&api, &store);

        let record = session.submit("  Ana ", 2).await.unwrap();

        assert_eq!(record, ana(2));
        assert_eq!(store.load(), Some(ana(2)));
        assert_eq!(session.state().phase, RsvpPhase::Confirmed(ana(2)));
        assert_eq!(api.last_rsvp().unwrap().full_name, "Ana");
        assert_eq!(api.last_rsvp().unwrap().companions_count, 2);
    }

    #[tokio::test]
    async fn test_rejected_submit_keeps_cache_and_reports_message() {
        let api = Rc::new(FakeInviteApi::new());
        api.fail_rsvp(ApiError::Status {
            status: 400,
            message: Some("Nombre inválido".to_string()),
        });
        let store = Rc::new(MemoryRsvpStore::new());
        let session = session_with(&api, &store);

        let err = session.submit("Ana", 2).await.unwrap_err();

        assert_eq!(
            err,
            ErrorKind::RemoteRejected {
                status: Some(400),
                message: Some("Nombre inválido".to_string())
            }
        );
        assert!(store.load().is_none());
        let state = session.state();
        assert_eq!(state.phase, RsvpPhase::Editing);
        assert_eq!(state.error, Some(err));
    }

    #[tokio::test]
    async fn test_network_failure_is_recoverable() {
        let api = Rc::new(FakeInviteApi::new());
        api.fail_rsvp(ApiError::Network("offline".to_string()));
        let store = Rc::new(MemoryRsvpStore::new());
        let session = session_with(&api, &store);

        assert!(session.submit("Ana", 0).await.is_err());
        api.succeed_rsvp();
        assert!(session.submit("Ana", 0).await.is_ok());
        assert_eq!(session.state().error, None);
        assert_eq!(api.rsvp_calls(), 2);
    }

    #[tokio::test]
    async fn test_starts_confirmed_from_cache_and_reset_clears() {
        let api = Rc::new(FakeInviteApi::new());
        let store = Rc::new(MemoryRsvpStore::with_record(ana(1)));
        let session = session_with(&api, &store);

        assert_eq!(session.load_cached(), Some(ana(1)));
        assert_eq!(session.state().confirmed(), Some(&ana(1)));

        session.reset();

        assert!(store.load().is_none());
        assert_eq!(session.state(), RsvpState::default());
        assert_eq!(api.rsvp_calls(), 0);
    }

    #[tokio::test]
    async fn test_resubmit_overwrites_record() {
        let api = Rc::new(FakeInviteApi::new());
        let store = Rc::new(MemoryRsvpStore::with_record(ana(1)));
        let session = session_with(&api, &store);

        session.reset();
        session.submit("Ana", 4).await.unwrap();

        assert_eq!(store.load(), Some(ana(4)));
    }

    #[tokio::test]
    async fn test_transitions_are_published() {
        let api = Rc::new(FakeInviteApi::new());
        let store = Rc::new(MemoryRsvpStore::new());
        let session = session_with(&api, &store);
        let phases = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&phases);
        session.subscribe(move |s| sink.borrow_mut().push(s.phase.clone()));

        session.submit("Ana", 2).await.unwrap();
        session.reset();

        assert_eq!(
            *phases.borrow(),
            vec![
                RsvpPhase::Editing,
                RsvpPhase::Submitting,
                RsvpPhase::Confirmed(ana(2)),
                RsvpPhase::Editing,
            ]
        );
    }

    #[tokio::test]
    async fn test_second_submit_while_outstanding_is_refused() {
        let api = Rc::new(FakeInviteApi::new());
        let (release, gate) = oneshot::channel();
        api.hold_rsvp(gate);
        let store = Rc::new(MemoryRsvpStore::new());
        let session = session_with(&api, &store);

        let mut first = Box::pin(session.submit("Ana", 2));
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert!(session.state().is_submitting());

        assert_eq!(session.submit("Ana", 2).await, Err(ErrorKind::InFlight));
        session.reset();
        assert!(session.state().is_submitting());

        release.send(()).unwrap();
        assert_eq!(first.await, Ok(ana(2)));
        assert_eq!(api.rsvp_calls(), 1);
    }
}
