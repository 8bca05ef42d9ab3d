//! Capability-based REST dispatch over an axum router.
//!
//! A [`Route`] pairs a URL pattern with a resource. A resource declares the
//! verbs it accepts by implementing the matching capability traits
//! ([`GetSupported`](resource::GetSupported), [`PostSupported`](resource::PostSupported), ...)
//! and the [`resource!`] macro. [`RestHandler`] resolves the capability for
//! each request, runs it, and writes the reply, tagging successful GET bodies
//! with a content-hash `ETag`.

pub mod config;
pub mod dispatch;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resource;
pub mod response;

pub use config::ServiceConfig;
pub use dispatch::{RestHandler, Route, RouteError};
pub use http::{HttpServer, Reply, Request};
pub use lifecycle::Shutdown;
pub use resource::{HandlerResult, Ping, Resource};
pub use response::{Cookie, Response, SimpleResponse, StandardResponse};
