//! Logging and metrics for the dispatcher.
//!
//! # Data Flow
//! ```text
//! dispatch::handler / dispatch::router
//!     → logging.rs (tracing events: registration, gates, handler failures)
//!     → metrics.rs (per-route request counter and latency histogram)
//!
//! Consumers:
//!     → stdout (plain or JSON lines)
//!     → Prometheus scrape endpoint, when enabled
//! ```
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured filter
//! - Metrics calls are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
