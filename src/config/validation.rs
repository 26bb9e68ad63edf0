//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (backlog > 0, buffer > 0, IPv4 loopback address)
//! - Check route declarations are well formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Chain *wiring* is not checked here; that is the route builder's job
//!   and fails at registration with a precise reason

use std::fmt;
use std::net::SocketAddr;

use crate::chain::Component;
use crate::config::schema::ServerConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.listener.bind_address.parse::<SocketAddr>() {
        Ok(addr) if !addr.is_ipv4() => errors.push(ValidationError::new(
            "listener.bind_address",
            "must be an IPv4 address",
        )),
        Ok(addr) if !addr.ip().is_loopback() => errors.push(ValidationError::new(
            "listener.bind_address",
            "must be a loopback address",
        )),
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::new("listener.bind_address", e.to_string())),
    }

    if config.listener.backlog == 0 {
        errors.push(ValidationError::new("listener.backlog", "must be greater than 0"));
    }
    if config.listener.read_buffer_bytes == 0 {
        errors.push(ValidationError::new(
            "listener.read_buffer_bytes",
            "must be greater than 0",
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            "must be a socket address",
        ));
    }

    for (i, route) in config.routes.iter().enumerate() {
        let field = |name: &str| format!("routes[{i}].{name}");

        if route.method.is_empty() || route.method.contains(char::is_whitespace) {
            errors.push(ValidationError::new(field("method"), "must be a single non-empty token"));
        }
        if !route.path.starts_with('/') || route.path.contains(char::is_whitespace) {
            errors.push(ValidationError::new(
                field("path"),
                "must start with '/' and contain no whitespace",
            ));
        }
        for (j, entry) in route.chain.iter().enumerate() {
            if let Err(e) = entry.parse::<Component>() {
                errors.push(ValidationError::new(field(&format!("chain[{j}]")), e.to_string()));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
