//! General-purpose response builder.

use axum::body::Bytes;
use axum::http::HeaderMap;
use serde::Serialize;

use super::{Cookie, Response, ResponseError};

/// Response with a custom body, cookie and header set.
///
/// Populate it inside a handler and return it boxed; the dispatcher only
/// reads it afterwards.
#[derive(Debug, Clone, Default)]
pub struct StandardResponse {
    body: Bytes,
    cookie: Option<Cookie>,
    headers: Option<HeaderMap>,
}

impl StandardResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the body to the JSON encoding of `value`.
    ///
    /// On error the previous body is left as it was.
    pub fn set_json_body<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ResponseError> {
        let encoded = serde_json::to_vec(value)?;
        self.set_body(encoded);
        Ok(())
    }

    /// Set the raw body bytes.
    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = body.into();
    }

    pub fn set_cookie(&mut self, cookie: Cookie) {
        self.cookie = Some(cookie);
    }

    pub fn set_headers(&mut self, headers: HeaderMap) {
        self.headers = Some(headers);
    }
}

impl Response for StandardResponse {
    fn body(&self) -> Result<Bytes, ResponseError> {
        Ok(self.body.clone())
    }

    fn cookie(&self) -> Option<&Cookie> {
        self.cookie.as_ref()
    }

    fn headers(&self) -> Option<&HeaderMap> {
        self.headers.as_ref()
    }
}
