//! Conditional-GET validators.
//!
//! Successful GET bodies are tagged with base64(SHA-256(body)) and always
//! marked for revalidation, so the validator is the only reuse mechanism.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};

/// `Cache-Control` value sent with every validated GET reply.
pub const CACHE_CONTROL: &str = "private, max-age=0, must-revalidate";

/// Validator for a response body.
pub fn etag(body: &[u8]) -> String {
    STANDARD.encode(Sha256::digest(body))
}

/// Exact comparison against the client's `If-None-Match`.
pub fn matches(if_none_match: Option<&[u8]>, etag: &str) -> bool {
    if_none_match == Some(etag.as_bytes())
}
