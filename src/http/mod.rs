//! HTTP-style request handling subsystem.
//!
//! # Data Flow
//! ```text
//! Accepted TCP connection
//!     → server.rs (read once, at most read_buffer_bytes)
//!     → request.rs (first line → method, path)
//!     → routing::RouteTable lookup
//!     → response.rs (200 with handler body | 404)
//!     → write, close, cue sound
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{parse_request_line, RequestLine};
pub use response::{Response, StatusCode};
pub use server::Dispatcher;
