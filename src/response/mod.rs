//! Handler response abstraction.
//!
//! # Data Flow
//! ```text
//! Resource handler
//!     → returns (StatusCode, Option<Box<dyn Response>>)
//!     → dispatcher reads body(), cookie(), headers()
//!     → Reply written to the transport
//! ```
//!
//! # Design Decisions
//! - One trait, two built-in implementations (simple.rs, standard.rs)
//! - Body retrieval is fallible; a failure turns into a 500
//! - Headers are a multimap so a name can carry several values

pub mod cookie;
pub mod simple;
pub mod standard;

use axum::body::Bytes;
use axum::http::HeaderMap;

pub use cookie::{Cookie, SameSite};
pub use simple::{SimpleResponse, ACK, NAK};
pub use standard::StandardResponse;

/// Error produced while materializing a response body.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("failed JSON conversion: {0}")]
    Json(#[from] serde_json::Error),

    #[error("body unavailable: {0}")]
    Body(String),
}

/// Contract every handler result must satisfy.
pub trait Response {
    /// Bytes written as the reply body.
    fn body(&self) -> Result<Bytes, ResponseError>;

    /// Cookie to attach, if any.
    fn cookie(&self) -> Option<&Cookie>;

    /// Extra headers to attach, if any.
    fn headers(&self) -> Option<&HeaderMap>;
}
