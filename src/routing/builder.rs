//! Route construction.
//!
//! # States
//! ```text
//! Building ──finalize──▶ Finalized   (handler registered)
//!     │
//!     └──────finalize──▶ Aborted     (RegistrationError, fatal at startup)
//! ```
//!
//! # Design Decisions
//! - Builder methods consume and return `self`; `finalize` consumes it for good
//! - Power is checked before the chain, so a dead supply is reported first
//! - Chain warnings and uncurated routes are logged, never rejected

use std::sync::Arc;

use thiserror::Error;

use crate::catalog;
use crate::chain::{self, ChainError, ChainWarning, Component, ValidatedChain};
use crate::observability::metrics;
use crate::routing::registrar::{PowerDeclaration, Registrar, REQUIRED_CABLE, REQUIRED_WATTAGE};

/// Fatal route registration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error(
        "{method} {path}: power precondition failed, requires exactly {}W via {}, declared {}",
        REQUIRED_WATTAGE,
        REQUIRED_CABLE,
        describe_power(.declared)
    )]
    PowerPreconditionFailed {
        method: String,
        path: String,
        declared: Option<PowerDeclaration>,
    },

    #[error("{method} {path}: chain validation failed: {source}")]
    ChainValidationFailed {
        method: String,
        path: String,
        #[source]
        source: ChainError,
    },
}

fn describe_power(declared: &Option<PowerDeclaration>) -> String {
    match declared {
        Some(power) => power.to_string(),
        None => "no power supply".to_string(),
    }
}

/// Accumulates the declaration of one route.
#[derive(Debug)]
pub struct RouteBuilder<'a> {
    registrar: &'a mut Registrar,
    method: String,
    path: String,
    chain: Vec<Component>,
    power: Option<PowerDeclaration>,
    curated: bool,
    sound: Option<String>,
}

impl<'a> RouteBuilder<'a> {
    pub(crate) fn new(registrar: &'a mut Registrar, method: String, path: String) -> Self {
        tracing::debug!(%method, %path, "Declaring route");
        Self {
            registrar,
            method,
            path,
            chain: Vec::new(),
            power: None,
            curated: false,
            sound: None,
        }
    }

    /// Append a cable.
    pub fn cable(self, id: impl Into<String>) -> Self {
        self.component(Component::Cable(id.into()))
    }

    /// Append an adapter.
    pub fn adapter(self, id: impl Into<String>) -> Self {
        self.component(Component::Adapter(id.into()))
    }

    /// Append any component, e.g. one parsed from configuration.
    pub fn component(mut self, component: Component) -> Self {
        match &component {
            Component::Adapter(id) => match catalog::lookup_adapter(id) {
                Some(spec) => tracing::debug!(path = %self.path, adapter = %id, label = spec.label, "Added adapter"),
                None => tracing::debug!(path = %self.path, adapter = %id, "Added unlisted adapter"),
            },
            other => tracing::debug!(path = %self.path, component = %other, "Added component"),
        }
        self.chain.push(component);
        self
    }

    /// Declare the power supply. Last call wins.
    pub fn power_supply(mut self, wattage: u32, cable: impl Into<String>) -> Self {
        let power = PowerDeclaration::new(wattage, cable);
        tracing::debug!(path = %self.path, power = %power, "Power supply declared");
        self.power = Some(power);
        self
    }

    /// Flag the route as curated.
    pub fn curate(mut self) -> Self {
        self.curated = true;
        self
    }

    /// Play this sound asset when the route is served.
    pub fn sound(mut self, asset: impl Into<String>) -> Self {
        self.sound = Some(asset.into());
        self
    }

    /// Check preconditions and register the handler.
    ///
    /// Any error here is a wiring defect; callers are expected to refuse to
    /// start rather than recover.
    pub fn finalize<F>(self, handler: F) -> Result<ValidatedChain, RegistrationError>
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        let Self {
            registrar,
            method,
            path,
            chain,
            power,
            curated,
            sound,
        } = self;

        if !registrar.check_power(power.as_ref()) {
            return Err(RegistrationError::PowerPreconditionFailed {
                method,
                path,
                declared: power,
            });
        }

        let validated = match chain::validate(&chain) {
            Ok(validated) => validated,
            Err(source) => {
                return Err(RegistrationError::ChainValidationFailed {
                    method,
                    path,
                    source,
                })
            }
        };

        for warning in &validated.warnings {
            match warning {
                ChainWarning::HighVoltage { position, voltage } => {
                    tracing::warn!(%method, %path, position, voltage, "High voltage on route chain")
                }
                ChainWarning::LongChain { length } => {
                    tracing::warn!(%method, %path, length, "Long adapter chain")
                }
            }
        }

        if curated {
            let total = registrar.count_curated();
            tracing::info!(%method, %path, curated_total = total, "Curated route registered");
        } else {
            tracing::warn!(%method, %path, "Route is not curated");
        }
        metrics::record_route_registered(curated);

        let table = registrar.table_mut();
        if let Some(asset) = sound {
            table.register_sound(path.clone(), asset);
        }
        tracing::info!(
            %method,
            %path,
            connector = %validated.connector,
            voltage = validated.voltage,
            "Route registered"
        );
        table.register(method, path, Arc::new(handler));

        Ok(validated)
    }
}
