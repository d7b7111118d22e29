//! Domain error types.

use thiserror::Error;

/// Errors that can occur while working with domain entities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A deferred reference was read before it was loaded.
    #[error("{entity} {id} has not been loaded")]
    UnresolvedReference { entity: &'static str, id: String },

    /// An entity was loaded into a reference pointing at a different id.
    #[error("cannot load {entity} {actual} into a reference to {entity} {expected}")]
    ReferenceMismatch {
        entity: &'static str,
        expected: String,
        actual: String,
    },

    /// A stored status value did not match any known variant.
    #[error("unknown {kind}: {value}")]
    UnknownStatus { kind: &'static str, value: String },
}
