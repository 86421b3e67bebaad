//! User-Facing Errors
//!
//! Every failure a guest can hit ends up as an `ErrorKind`. The `Display`
//! text is what the page renders inline, so it is written in Spanish.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any request was made
    #[error("{0}")]
    Validation(String),

    /// The gift list could not be retrieved
    #[error("{}", fetch_failed_text(.status))]
    FetchFailed { status: Option<u16> },

    /// The RSVP endpoint refused the submission or could not be reached
    #[error("{}", remote_rejected_text(.status, .message))]
    RemoteRejected {
        status: Option<u16>,
        message: Option<String>,
    },

    /// The reserve endpoint refused the reservation or could not be reached
    #[error("{}", reservation_rejected_text(.status, .message))]
    ReservationRejected {
        status: Option<u16>,
        message: Option<String>,
    },

    /// A request from the same component is still outstanding
    #[error("Hay una solicitud en curso, espera un momento.")]
    InFlight,
}

impl ErrorKind {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn fetch_failed(err: &ApiError) -> Self {
        Self::FetchFailed { status: err.status() }
    }

    pub fn remote_rejected(err: ApiError) -> Self {
        Self::RemoteRejected {
            status: err.status(),
            message: err.into_message(),
        }
    }

    pub fn reservation_rejected(err: ApiError) -> Self {
        Self::ReservationRejected {
            status: err.status(),
            message: err.into_message(),
        }
    }
}

fn detail_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) if !m.trim().is_empty() => format!(": {}", m.trim()),
        _ => String::new(),
    }
}

fn fetch_failed_text(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("Error {} al cargar regalos", code),
        None => "No se pudo cargar la lista de regalos.".to_string(),
    }
}

fn remote_rejected_text(status: &Option<u16>, message: &Option<String>) -> String {
    match status {
        Some(code) => format!("Error {}{}", code, detail_suffix(message)),
        None => "No se pudo confirmar. Intenta nuevamente.".to_string(),
    }
}

fn reservation_rejected_text(status: &Option<u16>, message: &Option<String>) -> String {
    match status {
        Some(code) => format!("No se pudo reservar (HTTP {}){}", code, detail_suffix(message)),
        None => "No se pudo reservar el regalo.".to_string(),
    }
}
