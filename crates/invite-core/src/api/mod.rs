//! Remote API
//!
//! The invitation backend is an external collaborator. Sessions only see
//! the `InviteApi` trait so tests can swap in a scripted fake.

mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{GiftItem, RsvpRequest};

pub use http::HttpInviteApi;

/// Transport-level failure from the remote API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("HTTP {status}")]
    Status { status: u16, message: Option<String> },

    /// The request never produced a response
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided detail, only present on status failures
    pub fn into_message(self) -> Option<String> {
        match self {
            Self::Status { message, .. } => message,
            _ => None,
        }
    }
}

/// Endpoints of the invitation backend.
///
/// `?Send` because the browser build runs every future on the single UI
/// thread and the fetch-backed client is not `Send` there.
#[async_trait(?Send)]
pub trait InviteApi {
    /// `GET /gifts`, in response order
    async fn list_gifts(&self) -> Result<Vec<GiftItem>, ApiError>;

    /// `POST /gifts/{id}/reserve`
    async fn reserve_gift(&self, gift_id: &str, reserved_by_name: &str) -> Result<(), ApiError>;

    /// `POST /rsvp`
    async fn submit_rsvp(&self, request: &RsvpRequest) -> Result<(), ApiError>;
}
