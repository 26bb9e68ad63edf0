//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (single-threaded):
//!     Registrar::route(method, path)
//!     → builder.rs (chain, power, curated flag, sound)
//!     → finalize: power latch → chain validation → table.rs
//!     → Registrar::into_table() → Arc<RouteTable>
//!
//! Serving (concurrent, read-only):
//!     (method, path) → table.rs → Handler | None
//! ```
//!
//! # Design Decisions
//! - Routes are registered at startup, immutable at runtime
//! - Exact (method, path) match only
//! - Registration state lives in an explicit Registrar, not in globals

pub mod builder;
pub mod handler;
pub mod registrar;
pub mod table;

pub use builder::{RegistrationError, RouteBuilder};
pub use handler::{exhibit, Handler};
pub use registrar::{PowerDeclaration, Registrar, REQUIRED_CABLE, REQUIRED_WATTAGE};
pub use table::RouteTable;
