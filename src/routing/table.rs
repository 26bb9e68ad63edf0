//! Route table.
//!
//! # Responsibilities
//! - Store handlers keyed by method, then path
//! - Store optional per-path sound assets
//! - Answer lookups with an explicit `None` on miss
//!
//! # Design Decisions
//! - Written only through `&mut` during registration, then frozen in an `Arc`
//! - Exact string matching, no wildcards or parameters
//! - Duplicate registration replaces the earlier handler silently

use std::collections::HashMap;
use std::fmt;

use crate::routing::Handler;

/// Mapping from (method, path) to handler, plus path to sound asset.
#[derive(Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, HashMap<String, Handler>>,
    sounds: HashMap<String, String>,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Last write wins.
    pub fn register(&mut self, method: impl Into<String>, path: impl Into<String>, handler: Handler) {
        self.routes
            .entry(method.into())
            .or_default()
            .insert(path.into(), handler);
    }

    /// Associate a sound asset with a path, for every method.
    pub fn register_sound(&mut self, path: impl Into<String>, asset: impl Into<String>) {
        self.sounds.insert(path.into(), asset.into());
    }

    /// Find the handler for an exact (method, path) pair.
    pub fn lookup(&self, method: &str, path: &str) -> Option<&Handler> {
        self.routes.get(method)?.get(path)
    }

    /// Sound asset registered for a path, if any.
    pub fn sound_for(&self, path: &str) -> Option<&str> {
        self.sounds.get(path).map(String::as_str)
    }

    /// Number of registered (method, path) pairs.
    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut routes: Vec<String> = self
            .routes
            .iter()
            .flat_map(|(method, paths)| paths.keys().map(move |path| format!("{method} {path}")))
            .collect();
        routes.sort();

        f.debug_struct("RouteTable")
            .field("routes", &routes)
            .field("sounds", &self.sounds)
            .finish()
    }
}
