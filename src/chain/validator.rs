//! Connector and voltage continuity checking.
//!
//! # Responsibilities
//! - Walk a chain once, front to back
//! - Track the current connector and voltage
//! - Reject on the first discontinuity
//! - Collect non-fatal warnings (high voltage, long chains)
//!
//! # Design Decisions
//! - Pure function: no logging, warnings are returned to the caller
//! - First error wins, validation stops immediately
//! - Cables never change state, only adapters do
//! - On a line at or above [`DANGEROUS_VOLTAGE`] a cable's rated voltage is not
//!   compared; the line already carries a high-voltage warning
//! - Every catalog adapter output below [`DANGEROUS_VOLTAGE`] matches the rated
//!   voltage of the cables for that connector, so with the built-in tables a
//!   cable never raises [`ChainError::VoltageMismatch`]

use thiserror::Error;

use crate::catalog::{lookup_adapter, lookup_cable};
use crate::chain::Component;

/// Voltage at or above which an adapter output raises a warning.
pub const DANGEROUS_VOLTAGE: u32 = 220;

/// Chains longer than this raise a warning.
pub const LONG_CHAIN_THRESHOLD: usize = 3;

/// Reasons a chain is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("route has no components, it must start with a cable")]
    EmptyChain,

    #[error("first component must be a cable, found {kind} `{id}`")]
    MustStartWithCable { kind: String, id: String },

    #[error("unknown cable `{0}`")]
    UnknownCable(String),

    #[error("cannot connect {expected} to {found} without an adapter")]
    ConnectorMismatch { expected: String, found: String },

    #[error("voltage mismatch: {expected}V into {found}V")]
    VoltageMismatch { expected: u32, found: u32 },

    #[error("unknown adapter `{0}`")]
    UnknownAdapter(String),

    #[error("adapter `{adapter}` needs {expected} input, got {found}")]
    AdapterInputMismatch {
        adapter: String,
        expected: String,
        found: String,
    },

    #[error("adapter `{adapter}` requires {expected}V, got {found}V")]
    AdapterVoltageMismatch {
        adapter: String,
        expected: u32,
        found: u32,
    },

    #[error("unknown component kind `{0}`")]
    UnknownComponentKind(String),
}

/// Observations that do not stop validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainWarning {
    /// An adapter produced a voltage at or above [`DANGEROUS_VOLTAGE`].
    HighVoltage { position: usize, voltage: u32 },
    /// The chain has more than [`LONG_CHAIN_THRESHOLD`] components.
    LongChain { length: usize },
}

/// Outcome of a successful validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedChain {
    /// Connector presented at the end of the chain.
    pub connector: String,
    /// Voltage at the end of the chain.
    pub voltage: u32,
    /// Warnings collected along the way, in chain order.
    pub warnings: Vec<ChainWarning>,
}

/// Validate a chain against the catalog.
pub fn validate(chain: &[Component]) -> Result<ValidatedChain, ChainError> {
    let (first, rest) = chain.split_first().ok_or(ChainError::EmptyChain)?;

    let first_id = match first {
        Component::Cable(id) => id,
        other => {
            return Err(ChainError::MustStartWithCable {
                kind: other.kind().to_string(),
                id: other.id().to_string(),
            })
        }
    };
    let seed = lookup_cable(first_id).ok_or_else(|| ChainError::UnknownCable(first_id.clone()))?;

    let mut connector = seed.connector;
    let mut voltage = seed.voltage;
    let mut warnings = Vec::new();

    for (offset, component) in rest.iter().enumerate() {
        let position = offset + 1;
        match component {
            Component::Cable(id) => {
                let cable = lookup_cable(id).ok_or_else(|| ChainError::UnknownCable(id.clone()))?;
                if cable.connector != connector {
                    return Err(ChainError::ConnectorMismatch {
                        expected: connector.to_string(),
                        found: cable.connector.to_string(),
                    });
                }
                if cable.voltage != voltage && voltage < DANGEROUS_VOLTAGE {
                    return Err(ChainError::VoltageMismatch {
                        expected: voltage,
                        found: cable.voltage,
                    });
                }
            }
            Component::Adapter(id) => {
                let adapter =
                    lookup_adapter(id).ok_or_else(|| ChainError::UnknownAdapter(id.clone()))?;
                if adapter.from != connector {
                    return Err(ChainError::AdapterInputMismatch {
                        adapter: id.clone(),
                        expected: adapter.from.to_string(),
                        found: connector.to_string(),
                    });
                }
                if adapter.voltage_in != voltage {
                    return Err(ChainError::AdapterVoltageMismatch {
                        adapter: id.clone(),
                        expected: adapter.voltage_in,
                        found: voltage,
                    });
                }
                connector = adapter.to;
                voltage = adapter.voltage_out;

                if voltage >= DANGEROUS_VOLTAGE {
                    warnings.push(ChainWarning::HighVoltage { position, voltage });
                }
            }
            Component::Unknown { kind, .. } => {
                return Err(ChainError::UnknownComponentKind(kind.clone()));
            }
        }
    }

    if chain.len() > LONG_CHAIN_THRESHOLD {
        warnings.push(ChainWarning::LongChain { length: chain.len() });
    }

    Ok(ValidatedChain {
        connector: connector.to_string(),
        voltage,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cable(id: &str) -> Component {
        Component::Cable(id.to_string())
    }

    fn adapter(id: &str) -> Component {
        Component::Adapter(id.to_string())
    }

    #[test]
    fn usbc_to_usba_chain() {
        let chain = [cable("usbc"), adapter("to-usba"), cable("usba")];
        let validated = validate(&chain).unwrap();
        assert_eq!(validated.connector, "usba");
        assert_eq!(validated.voltage, 5);
        assert!(validated.warnings.is_empty());
    }

    #[test]
    fn single_cable_is_valid() {
        let validated = validate(&[cable("hdmi")]).unwrap();
        assert_eq!(validated.connector, "hdmi");
        assert_eq!(validated.voltage, 0);
    }

    #[test]
    fn empty_chain() {
        assert_eq!(validate(&[]), Err(ChainError::EmptyChain));
    }

    #[test]
    fn adapter_first() {
        let chain = [adapter("to-usba"), cable("usba")];
        assert!(matches!(
            validate(&chain),
            Err(ChainError::MustStartWithCable { .. })
        ));
    }

    #[test]
    fn unknown_first_cable() {
        assert_eq!(
            validate(&[cable("lightning")]),
            Err(ChainError::UnknownCable("lightning".into()))
        );
    }

    #[test]
    fn step_up_warns_but_passes() {
        let chain = [cable("usbc"), adapter("step-up"), cable("usbc")];
        let validated = validate(&chain).unwrap();
        assert_eq!(validated.connector, "usbc");
        assert_eq!(validated.voltage, 220);
        assert_eq!(
            validated.warnings,
            vec![ChainWarning::HighVoltage {
                position: 1,
                voltage: 220
            }]
        );
    }

    #[test]
    fn connector_mismatch() {
        let chain = [cable("usbc"), cable("usba")];
        assert_eq!(
            validate(&chain),
            Err(ChainError::ConnectorMismatch {
                expected: "usbc".into(),
                found: "usba".into()
            })
        );
    }

    #[test]
    fn adapter_mismatches() {
        assert!(matches!(
            validate(&[cable("usba"), adapter("step-up")]),
            Err(ChainError::AdapterInputMismatch { .. })
        ));
        assert!(matches!(
            validate(&[cable("usbc"), adapter("step-up"), adapter("step-up")]),
            Err(ChainError::AdapterVoltageMismatch {
                expected: 5,
                found: 220,
                ..
            })
        ));
        assert_eq!(
            validate(&[cable("usbc"), adapter("to-moon")]),
            Err(ChainError::UnknownAdapter("to-moon".into()))
        );
    }

    #[test]
    fn unknown_kind_rejected() {
        let chain = [
            cable("usbc"),
            Component::Unknown {
                kind: "fuse".into(),
                id: "10A".into(),
            },
        ];
        assert_eq!(
            validate(&chain),
            Err(ChainError::UnknownComponentKind("fuse".into()))
        );
    }

    #[test]
    fn first_error_wins() {
        // Both the second and third components are broken; only the first is reported.
        let chain = [cable("usbc"), cable("usba"), adapter("to-moon")];
        assert!(matches!(
            validate(&chain),
            Err(ChainError::ConnectorMismatch { .. })
        ));
    }

    #[test]
    fn long_chain_warning() {
        let chain = [
            cable("usbc"),
            adapter("to-usba"),
            cable("usba"),
            adapter("to-powerjack"),
            cable("powerjack"),
        ];
        let validated = validate(&chain).unwrap();
        assert_eq!(validated.connector, "powerjack");
        assert_eq!(validated.voltage, 220);
        assert_eq!(
            validated.warnings,
            vec![
                ChainWarning::HighVoltage {
                    position: 3,
                    voltage: 220
                },
                ChainWarning::LongChain { length: 5 },
            ]
        );
    }

    #[test]
    fn validation_is_idempotent() {
        let chain = [cable("usbc"), adapter("to-usba"), cable("usba"), adapter("to-hdmi")];
        let first = validate(&chain);
        let second = validate(&chain);
        assert_eq!(first, second);
        assert_eq!(first.unwrap().connector, "hdmi");
    }
}
