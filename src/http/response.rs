//! Response encoding.
//!
//! Every response is plain text with an exact byte `Content-Length` and no
//! other headers:
//!
//! ```text
//! HTTP/1.1 <code> <reason>\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: <n>\r\n
//! \r\n
//! <body>
//! ```

use std::fmt;

/// Status codes this server produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok,
    NotFound,
}

impl StatusCode {
    pub fn as_u16(self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason())
    }
}

/// A complete response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::Ok,
            body: body.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NotFound,
            body: "Not Found".to_string(),
        }
    }

    /// Wire encoding of the response.
    pub fn to_bytes(&self) -> Vec<u8> {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\n\r\n{}",
            self.status,
            self.body.len(),
            self.body
        )
        .into_bytes()
    }
}
