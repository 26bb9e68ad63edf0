//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields: method, path, connection_id, ...)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Chain warnings and uncurated routes are log events, never errors
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
