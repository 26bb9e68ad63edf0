//! Registration context.
//!
//! Owns everything that is mutable while routes are being declared: the
//! route table under construction, the one-shot power latch and the curated
//! route counter. It exists only during startup and is consumed by
//! [`Registrar::into_table`] before serving begins.

use std::fmt;

use crate::routing::{RouteBuilder, RouteTable};

/// Wattage the first registered route must declare.
pub const REQUIRED_WATTAGE: u32 = 60;

/// Cable the first registered route must declare.
pub const REQUIRED_CABLE: &str = "usbc";

/// Power supply declared on a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerDeclaration {
    pub wattage: u32,
    pub cable: String,
}

impl PowerDeclaration {
    pub fn new(wattage: u32, cable: impl Into<String>) -> Self {
        Self {
            wattage,
            cable: cable.into(),
        }
    }

    /// True if this is exactly the required supply.
    pub fn meets_requirement(&self) -> bool {
        self.wattage == REQUIRED_WATTAGE && self.cable == REQUIRED_CABLE
    }
}

impl fmt::Display for PowerDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}W via {}", self.wattage, self.cable)
    }
}

/// Startup-phase registration state.
#[derive(Debug, Default)]
pub struct Registrar {
    table: RouteTable,
    power_verified: bool,
    curated_routes: usize,
}

impl Registrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start declaring a route.
    pub fn route(&mut self, method: impl Into<String>, path: impl Into<String>) -> RouteBuilder<'_> {
        RouteBuilder::new(self, method.into(), path.into())
    }

    /// Whether a route has already satisfied the power requirement.
    pub fn power_verified(&self) -> bool {
        self.power_verified
    }

    /// Number of routes registered with the curated flag.
    pub fn curated_routes(&self) -> usize {
        self.curated_routes
    }

    /// Routes registered so far.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Finish registration and hand over the table for serving.
    pub fn into_table(self) -> RouteTable {
        self.table
    }

    /// Check the power declaration, setting the latch on first success.
    ///
    /// Returns `false` only while the latch is unset and the declaration is
    /// missing or wrong.
    pub(crate) fn check_power(&mut self, declared: Option<&PowerDeclaration>) -> bool {
        if self.power_verified {
            return true;
        }
        if !declared.is_some_and(PowerDeclaration::meets_requirement) {
            return false;
        }
        self.power_verified = true;
        tracing::info!(
            wattage = REQUIRED_WATTAGE,
            cable = REQUIRED_CABLE,
            "Power verified, registration unlocked"
        );
        true
    }

    pub(crate) fn count_curated(&mut self) -> usize {
        self.curated_routes += 1;
        self.curated_routes
    }

    pub(crate) fn table_mut(&mut self) -> &mut RouteTable {
        &mut self.table
    }
}
