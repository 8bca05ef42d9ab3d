//! Materialized replies produced by the dispatcher.
//!
//! # Responsibilities
//! - Hold the final status, headers and body of one request
//! - Convert into an axum response for the transport
//!
//! # Design Decisions
//! - `body == None` means nothing is written, not even a content type
//! - A cookie travels as a `Set-Cookie` entry in `headers`

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

/// Outcome of dispatching one request.
#[derive(Debug, Clone)]
pub struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl Reply {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Body bytes, empty when nothing was written.
    pub fn body_bytes(&self) -> Bytes {
        self.body.clone().unwrap_or_default()
    }

    pub(crate) fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub(crate) fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub(crate) fn set_body(&mut self, body: Bytes) {
        self.body = Some(body);
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> axum::response::Response {
        let mut response = match self.body {
            Some(bytes) => axum::response::Response::new(Body::from(bytes)),
            None => axum::response::Response::new(Body::empty()),
        };
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
