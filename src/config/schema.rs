//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.
//! Every section has defaults, so an empty file is a valid configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, backlog, read buffer).
    pub listener: ListenerConfig,

    /// Sound cue settings.
    pub sounds: SoundConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Register the built-in demonstration routes before configured ones.
    pub showcase: bool,

    /// Additional routes declared in the file.
    pub routes: Vec<RouteConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            sounds: SoundConfig::default(),
            observability: ObservabilityConfig::default(),
            showcase: true,
            routes: Vec::new(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (IPv4, e.g. "127.0.0.1:2000").
    pub bind_address: String,

    /// Listen backlog passed to the socket.
    pub backlog: u32,

    /// Bytes read from each connection before parsing.
    pub read_buffer_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:2000".to_string(),
            backlog: 10,
            read_buffer_bytes: 1024,
        }
    }
}

/// Sound cue configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SoundConfig {
    /// Cue sounds after responses.
    pub enabled: bool,

    /// Directory sound assets are resolved against.
    pub asset_dir: PathBuf,

    /// Track cued once when serving starts.
    pub background_track: Option<String>,

    /// Replace default cues with their themed variants.
    pub themed: bool,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            asset_dir: PathBuf::from("server_sounds"),
            background_track: Some("server_theme.mp3".to_string()),
            themed: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// A route declared in configuration, answered with a fixed body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Request method token, e.g. "GET".
    pub method: String,

    /// Exact request path.
    pub path: String,

    /// Response body.
    #[serde(default)]
    pub body: String,

    /// Wiring chain as `kind:id` entries, e.g. `["cable:usbc", "adapter:to-usba"]`.
    pub chain: Vec<String>,

    /// Optional power supply declaration.
    #[serde(default)]
    pub power: Option<PowerConfig>,

    /// Count the route as curated.
    #[serde(default)]
    pub curated: bool,

    /// Frame the body as a gallery exhibit.
    #[serde(default)]
    pub exhibit: bool,

    /// Sound asset played when this path is served.
    #[serde(default)]
    pub sound: Option<String>,
}

/// Power supply declared on a configured route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PowerConfig {
    pub wattage: u32,
    pub cable: String,
}
