//! Capability dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Setup:
//!     Route::new(resource, pattern)
//!     → RestHandler::register_route / set_routes
//!     → RestHandler::into_router (axum Router, frozen in Arc)
//!
//! Per request (handler.rs):
//!     parse form → resolve verb → run handler
//!     → body → validators / 304 (cache.rs)
//!     → cookie + headers → status + JSON body
//! ```
//!
//! # Design Decisions
//! - Lookup is by resource capability, never by route position
//! - The pipeline is synchronous; concurrency belongs to the transport
//! - No global state: every RestHandler owns its own routes

pub mod cache;
pub mod handler;
pub mod route;
pub mod router;

pub use handler::RestHandler;
pub use route::Route;

/// Errors raised while binding routes into a router.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("route pattern {0:?} must start with '/'")]
    InvalidPattern(String),

    #[error("route pattern {pattern:?} has an unsupported segment {segment:?}")]
    InvalidSegment { pattern: String, segment: String },
}
