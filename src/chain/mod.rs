//! Route wiring chains.
//!
//! # Data Flow
//! ```text
//! RouteBuilder.cable() / .adapter()   or   "kind:id" strings from config
//!     → component.rs (Component)
//!     → validator.rs (walk chain against the catalog)
//!     → ValidatedChain { connector, voltage, warnings } | ChainError
//! ```
//!
//! # Design Decisions
//! - Chains are plain `Vec<Component>`, owned by the builder
//! - Validation is a single linear pass with no backtracking
//! - Warnings are data; callers decide how to log them

pub mod component;
pub mod validator;

pub use component::{Component, ParseComponentError};
pub use validator::{validate, ChainError, ChainWarning, ValidatedChain};
