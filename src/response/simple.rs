//! Tagged acknowledgement responses.

use axum::body::Bytes;
use axum::http::HeaderMap;
use serde::Serialize;
use std::fmt;

use super::{Cookie, Response, ResponseError};

/// Affirmative status tag.
pub const ACK: &str = "ACK";
/// Negative status tag.
pub const NAK: &str = "NAK";

/// A `{"status": ..., "message": ...}` body for plain ACK/NAK replies.
///
/// Empty fields are left out of the JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SimpleResponse {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl SimpleResponse {
    pub fn new(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
        }
    }

    /// Build the message from format arguments:
    /// `SimpleResponse::with_args(NAK, format_args!("missing {}", key))`.
    pub fn with_args(status: impl Into<String>, args: fmt::Arguments<'_>) -> Self {
        Self::new(status, fmt::format(args))
    }

    pub fn ack(message: impl Into<String>) -> Self {
        Self::new(ACK, message)
    }

    pub fn ack_args(args: fmt::Arguments<'_>) -> Self {
        Self::with_args(ACK, args)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(NAK, message)
    }

    pub fn fail_args(args: fmt::Arguments<'_>) -> Self {
        Self::with_args(NAK, args)
    }
}

impl Response for SimpleResponse {
    fn body(&self) -> Result<Bytes, ResponseError> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }

    fn cookie(&self) -> Option<&Cookie> {
        None
    }

    fn headers(&self) -> Option<&HeaderMap> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_str(resp: &SimpleResponse) -> String {
        String::from_utf8(resp.body().unwrap().to_vec()).unwrap()
    }

    #[test]
    fn test_status_then_message() {
        let resp = SimpleResponse::new("X", "Y");
        assert_eq!(body_str(&resp), r#"{"status":"X","message":"Y"}"#);
    }

    #[test]
    fn test_empty_fields_omitted() {
        assert_eq!(body_str(&SimpleResponse::ack("")), r#"{"status":"ACK"}"#);
        assert_eq!(body_str(&SimpleResponse::new("", "only")), r#"{"message":"only"}"#);
        assert_eq!(body_str(&SimpleResponse::default()), "{}");
    }

    #[test]
    fn test_constructors() {
        let resp = SimpleResponse::fail("boom");
        assert_eq!(resp.status, NAK);
        assert_eq!(resp.message, "boom");

        let resp = SimpleResponse::fail_args(format_args!("missing {} of {}", 2, 3));
        assert_eq!(resp.status, NAK);
        assert_eq!(resp.message, "missing 2 of 3");

        let resp = SimpleResponse::ack_args(format_args!("stored {}", "item"));
        assert_eq!(resp.status, ACK);
        assert_eq!(resp.message, "stored item");

        let resp = SimpleResponse::with_args("CUSTOM", format_args!("{:03}", 7));
        assert_eq!(resp.status, "CUSTOM");
        assert_eq!(resp.message, "007");
    }

    #[test]
    fn test_no_cookie_or_headers() {
        let resp = SimpleResponse::ack("ok");
        assert!(resp.cookie().is_none());
        assert!(resp.headers().is_none());
    }
}
