//! Chain components.

use std::fmt;
use std::str::FromStr;

/// One link in a route's wiring chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Component {
    /// A cable, re-asserting the current connector and voltage.
    Cable(String),
    /// An adapter, converting connector and voltage.
    Adapter(String),
    /// A component with a tag the validator does not understand.
    ///
    /// Only produced when parsing declarative `kind:id` chains.
    Unknown { kind: String, id: String },
}

impl Component {
    /// Tag describing what kind of component this is.
    pub fn kind(&self) -> &str {
        match self {
            Component::Cable(_) => "cable",
            Component::Adapter(_) => "adapter",
            Component::Unknown { kind, .. } => kind,
        }
    }

    /// Catalog id of the component.
    pub fn id(&self) -> &str {
        match self {
            Component::Cable(id) | Component::Adapter(id) => id,
            Component::Unknown { id, .. } => id,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}

/// Error returned when a `kind:id` string is missing either half.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("component `{0}` is not of the form `kind:id`")]
pub struct ParseComponentError(pub String);

impl FromStr for Component {
    type Err = ParseComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .map(|(kind, id)| (kind.trim(), id.trim()))
            .filter(|(kind, id)| !kind.is_empty() && !id.is_empty())
            .ok_or_else(|| ParseComponentError(s.to_string()))?;

        Ok(match kind {
            "cable" => Component::Cable(id.to_string()),
            "adapter" => Component::Adapter(id.to_string()),
            other => Component::Unknown {
                kind: other.to_string(),
                id: id.to_string(),
            },
        })
    }
}
