//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, graceful shutdown)
//!     → dispatch::router (buffer body, capture path params)
//!     → request.rs (transport-agnostic Request, form.rs parsing)
//!     → dispatch::handler (pipeline)
//!     → response.rs (Reply → axum response)
//!     → Send to client
//! ```

pub mod form;
pub mod request;
pub mod response;
pub mod server;

pub use form::{Form, FormError};
pub use request::Request;
pub use response::Reply;
pub use server::HttpServer;
