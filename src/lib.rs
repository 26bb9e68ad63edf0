//! Minimal request server with wiring-checked route registration.
//!
//! Routes are declared through a builder that requires a chain of cables
//! and adapters. The chain must be continuous in connector and voltage, and
//! the first route must declare the required power supply. Any failure there
//! stops startup. Once registration completes, the route table is frozen and
//! a Tokio accept loop answers one plain-text request per TCP connection.

// Registration
pub mod catalog;
pub mod chain;
pub mod routing;
pub mod showcase;

// Serving
pub mod http;
pub mod net;
pub mod sound;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use http::Dispatcher;
pub use lifecycle::Shutdown;
pub use routing::{Registrar, RouteTable};
