//! HTTP Client
//!
//! reqwest-backed `InviteApi`. In the browser reqwest goes through
//! `fetch`, natively through rustls.

use async_trait::async_trait;
use percent_encoding::utf8_percent_encode;
use reqwest::{Client, Response};
use serde_json::Value;

use super::{ApiError, InviteApi};
use crate::models::{GiftItem, ReserveRequest, RsvpRequest};
use crate::registry::COMPONENT_ENCODE_SET;

#[derive(Clone)]
pub struct HttpInviteApi {
    client: Client,
    base_url: String,
}

impl HttpInviteApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn gifts_url(&self) -> String {
        format!("{}/gifts", self.base_url)
    }

    fn reserve_url(&self, gift_id: &str) -> String {
        format!(
            "{}/gifts/{}/reserve",
            self.base_url,
            utf8_percent_encode(gift_id, COMPONENT_ENCODE_SET)
        )
    }

    fn rsvp_url(&self) -> String {
        format!("{}/rsvp", self.base_url)
    }
}

#[async_trait(?Send)]
impl InviteApi for HttpInviteApi {
    async fn list_gifts(&self) -> Result<Vec<GiftItem>, ApiError> {
        let url = self.gifts_url();
        log::debug!("GET {}", url);
        let response = self.client.get(&url).send().await.map_err(network_error)?;
        let response = ensure_success(response).await?;
        response
            .json::<Vec<GiftItem>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn reserve_gift(&self, gift_id: &str, reserved_by_name: &str) -> Result<(), ApiError> {
        let url = self.reserve_url(gift_id);
        log::debug!("POST {}", url);
        let body = ReserveRequest {
            reserved_by_name: reserved_by_name.to_string(),
        };
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(network_error)?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn submit_rsvp(&self, request: &RsvpRequest) -> Result<(), ApiError> {
        let url = self.rsvp_url();
        log::debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(network_error)?;
        // Any success body is ignored
        ensure_success(response).await?;
        Ok(())
    }
}

fn network_error(err: reqwest::Error) -> ApiError {
    log::warn!("request failed before a response: {}", err);
    ApiError::Network(err.to_string())
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);
    log::warn!("server answered {} ({:?})", status.as_u16(), message);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Pulls `message` out of an error body.
///
/// Accepts a plain string or a list of strings (validation pipes often
/// answer with one entry per field). Anything else is treated as absent.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Array(parts) => {
            let joined = parts
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_trim_trailing_slash() {
        let api = HttpInviteApi::new("https://api.example.com/");
        assert_eq!(api.base_url(), "https://api.example.com");
        assert_eq!(api.gifts_url(), "https://api.example.com/gifts");
        assert_eq!(api.rsvp_url(), "https://api.example.com/rsvp");
    }

    #[test]
    fn test_reserve_url_encodes_gift_id() {
        let api = HttpInviteApi::new("https://api.example.com");
        assert_eq!(
            api.reserve_url("b7c1-42"),
            "https://api.example.com/gifts/b7c1-42/reserve"
        );
        assert_eq!(
            api.reserve_url("a/b c"),
            "https://api.example.com/gifts/a%2Fb%20c/reserve"
        );
    }

    #[test]
    fn test_error_message_string() {
        assert_eq!(
            error_message(r#"{"message":"Gift already reserved","statusCode":409}"#),
            Some("Gift already reserved".to_string())
        );
    }

    #[test]
    fn test_error_message_list() {
        assert_eq!(
            error_message(
                r#"{"message":["fullName should not be empty", "companionsCount must be an integer"]}"#
            ),
            Some("fullName should not be empty, companionsCount must be an integer".to_string())
        );
    }

    #[test]
    fn test_error_message_absent_or_unusable() {
        assert_eq!(error_message(""), None);
        assert_eq!(error_message("<html>Bad Gateway</html>"), None);
        assert_eq!(error_message(r#"{"error":"Conflict"}"#), None);
        assert_eq!(error_message(r#"{"message":"   "}"#), None);
        assert_eq!(error_message(r#"{"message":42}"#), None);
    }
}
