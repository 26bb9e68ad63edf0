//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bind with backlog, accept)
//!     → connection.rs (connection ID, active count)
//!     → Hand off to http::server for one request
//! ```
//!
//! # Design Decisions
//! - IPv4 loopback by default, backlog from config
//! - No connection limit and no TLS
//! - One request per connection, so there is no per-connection state machine

pub mod connection;
pub mod listener;
