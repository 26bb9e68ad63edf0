//! Static component catalog.
//!
//! # Data Flow
//! ```text
//! Chain component id ("usbc", "to-usba", ...)
//!     → lookup_cable / lookup_adapter
//!     → CableSpec / AdapterSpec (or None)
//! ```
//!
//! # Design Decisions
//! - Tables are compiled in and never mutated
//! - Lookups are linear scans; the tables hold a handful of entries
//! - Unknown ids are `None`, the validator decides what that means

/// Electrical description of a cable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CableSpec {
    /// Connector presented at both ends.
    pub connector: &'static str,
    /// Voltage carried by the cable.
    pub voltage: u32,
    /// Rated wattage.
    pub wattage: u32,
}

/// Conversion performed by an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterSpec {
    /// Connector accepted on the input side.
    pub from: &'static str,
    /// Connector presented on the output side.
    pub to: &'static str,
    /// Voltage expected on the input side.
    pub voltage_in: u32,
    /// Voltage produced on the output side.
    pub voltage_out: u32,
    /// Short description, logged when the adapter is added to a route.
    pub label: &'static str,
}

const CABLES: &[(&str, CableSpec)] = &[
    ("usbc", CableSpec { connector: "usbc", voltage: 5, wattage: 60 }),
    ("usba", CableSpec { connector: "usba", voltage: 5, wattage: 5 }),
    ("powerjack", CableSpec { connector: "powerjack", voltage: 220, wattage: 500 }),
    ("hdmi", CableSpec { connector: "hdmi", voltage: 0, wattage: 0 }),
];

const ADAPTERS: &[(&str, AdapterSpec)] = &[
    (
        "to-usba",
        AdapterSpec {
            from: "usbc",
            to: "usba",
            voltage_in: 5,
            voltage_out: 5,
            label: "usbc to usba dongle",
        },
    ),
    (
        "to-hdmi",
        AdapterSpec {
            from: "usba",
            to: "hdmi",
            voltage_in: 5,
            voltage_out: 0,
            label: "usba to hdmi display bridge",
        },
    ),
    (
        "step-up",
        AdapterSpec {
            from: "usbc",
            to: "usbc",
            voltage_in: 5,
            voltage_out: 220,
            label: "homemade 5V to 220V step-up",
        },
    ),
    (
        "to-powerjack",
        AdapterSpec {
            from: "usba",
            to: "powerjack",
            voltage_in: 5,
            voltage_out: 220,
            label: "usba to mains powerjack",
        },
    ),
];

/// Look up a cable by id.
pub fn lookup_cable(id: &str) -> Option<&'static CableSpec> {
    CABLES
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, spec)| spec)
}

/// Look up an adapter by id.
pub fn lookup_adapter(id: &str) -> Option<&'static AdapterSpec> {
    ADAPTERS
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, spec)| spec)
}
