//! Scripted `InviteApi` for session tests.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::api::{ApiError, InviteApi};
use crate::models::{GiftItem, GiftStatus, RsvpRequest};

pub struct FakeInviteApi {
    gifts: RefCell<Result<Vec<GiftItem>, ApiError>>,
    reserve_result: RefCell<Result<(), ApiError>>,
    rsvp_result: RefCell<Result<(), ApiError>>,
    list_gate: RefCell<Option<oneshot::Receiver<()>>>,
    rsvp_gate: RefCell<Option<oneshot::Receiver<()>>>,
    reserve_gate: RefCell<Option<oneshot::Receiver<()>>>,
    list_calls: Cell<usize>,
    reserve_calls: RefCell<Vec<(String, String)>>,
    rsvp_calls: RefCell<Vec<RsvpRequest>>,
}

impl FakeInviteApi {
    pub fn new() -> Self {
        Self {
            gifts: RefCell::new(Ok(Vec::new())),
            reserve_result: RefCell::new(Ok(())),
            rsvp_result: RefCell::new(Ok(())),
            list_gate: RefCell::new(None),
            rsvp_gate: RefCell::new(None),
            reserve_gate: RefCell::new(None),
            list_calls: Cell::new(0),
            reserve_calls: RefCell::new(Vec::new()),
            rsvp_calls: RefCell::new(Vec::new()),
        }
    }

    pub fn set_gifts(&self, gifts: Vec<GiftItem>) {
        *self.gifts.borrow_mut() = Ok(gifts);
    }

    pub fn fail_list(&self, err: ApiError) {
        *self.gifts.borrow_mut() = Err(err);
    }

    pub fn fail_reserve(&self, err: ApiError) {
        *self.reserve_result.borrow_mut() = Err(err);
    }

    pub fn fail_rsvp(&self, err: ApiError) {
        *self.rsvp_result.borrow_mut() = Err(err);
    }

    pub fn succeed_rsvp(&self) {
        *self.rsvp_result.borrow_mut() = Ok(());
    }

    /// The next list call answers with the gifts set so far, but only once
    /// the sender fires
    pub fn hold_list(&self, gate: oneshot::Receiver<()>) {
        *self.list_gate.borrow_mut() = Some(gate);
    }

    /// The next RSVP call waits until the sender fires
    pub fn hold_rsvp(&self, gate: oneshot::Receiver<()>) {
        *self.rsvp_gate.borrow_mut() = Some(gate);
    }

    /// The next reserve call waits until the sender fires
    pub fn hold_reserve(&self, gate: oneshot::Receiver<()>) {
        *self.reserve_gate.borrow_mut() = Some(gate);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    pub fn reserve_calls(&self) -> Vec<(String, String)> {
        self.reserve_calls.borrow().clone()
    }

    pub fn rsvp_calls(&self) -> usize {
        self.rsvp_calls.borrow().len()
    }

    pub fn last_rsvp(&self) -> Option<RsvpRequest> {
        self.rsvp_calls.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl InviteApi for FakeInviteApi {
    async fn list_gifts(&self) -> Result<Vec<GiftItem>, ApiError> {
        self.list_calls.set(self.list_calls.get() + 1);
        let gifts = self.gifts.borrow().clone();
        let gate = self.list_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        gifts
    }

    async fn reserve_gift(&self, gift_id: &str, reserved_by_name: &str) -> Result<(), ApiError> {
        self.reserve_calls
            .borrow_mut()
            .push((gift_id.to_string(), reserved_by_name.to_string()));
        let gate = self.reserve_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.reserve_result.borrow().clone()
    }

    async fn submit_rsvp(&self, request: &RsvpRequest) -> Result<(), ApiError> {
        self.rsvp_calls.borrow_mut().push(request.clone());
        let gate = self.rsvp_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.rsvp_result.borrow().clone()
    }
}

pub fn gift(id: &str, sort_order: i64, status: GiftStatus) -> GiftItem {
    GiftItem {
        id: id.to_string(),
        title: format!("Regalo {}", id),
        description: None,
        category: None,
        buy_url: None,
        image_path: None,
        image_public_url: None,
        status,
        reserved_by_name: None,
        reserved_at: None,
        sort_order,
    }
}
