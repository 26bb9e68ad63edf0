//! Request line parsing.
//!
//! # Responsibilities
//! - Take the first line of the raw request (up to `\r\n`)
//! - Split it on whitespace into method, path and anything after
//!
//! # Design Decisions
//! - Headers and bodies are never read
//! - Fewer than two tokens is "no request"; the caller sends nothing back
//! - Method and path are matched verbatim (no case folding, no decoding)

/// The routing-relevant part of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLine<'a> {
    pub method: &'a str,
    pub path: &'a str,
}

/// Parse the request line out of raw request text.
pub fn parse_request_line(raw: &str) -> Option<RequestLine<'_>> {
    let first = raw.split("\r\n").next()?;
    let mut tokens = first.split_whitespace();
    let method = tokens.next()?;
    let path = tokens.next()?;
    Some(RequestLine { method, path })
}
