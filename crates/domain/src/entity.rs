//! Entity identity and deferred-load references.

use std::fmt;
use std::hash::Hash;

use serde::{Serialize, Serializer};

use crate::DomainError;

/// An object with a stable identity assigned by the persistence layer.
pub trait Entity {
    /// Identifier type of the entity.
    type Id: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync;

    /// Human-readable entity name used in errors and logs.
    const NAME: &'static str;

    /// Returns the entity's identifier.
    fn id(&self) -> Self::Id;
}

/// A reference from one entity to another that may not have been loaded yet.
///
/// A reference always knows the id of its target. The target itself is
/// only available after something explicitly loads it (see
/// `repository::Session::initialize`); reading an `Unloaded` reference is
/// an error, never an implicit fetch.
///
/// Serializing an `Unloaded` reference fails, so an entity graph cannot be
/// written out while part of it is still missing.
#[derive(Debug, Clone, PartialEq)]
pub enum Ref<T: Entity> {
    /// Only the target's id is known.
    Unloaded(T::Id),
    /// The target has been fetched.
    Loaded(T),
}

impl<T: Entity> Ref<T> {
    /// Creates a reference that only carries the target id.
    pub fn unloaded(id: T::Id) -> Self {
        Ref::Unloaded(id)
    }

    /// Creates a reference around an already fetched target.
    pub fn loaded(value: T) -> Self {
        Ref::Loaded(value)
    }

    /// Returns the id of the referenced entity, loaded or not.
    pub fn id(&self) -> T::Id {
        match self {
            Ref::Unloaded(id) => *id,
            Ref::Loaded(value) => value.id(),
        }
    }

    /// Returns true if the target has been fetched.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Ref::Loaded(_))
    }

    /// Returns the target, or `UnresolvedReference` if it was never loaded.
    pub fn get(&self) -> Result<&T, DomainError> {
        match self {
            Ref::Loaded(value) => Ok(value),
            Ref::Unloaded(id) => Err(unresolved::<T>(*id)),
        }
    }

    /// Replaces the reference with the fetched target.
    ///
    /// The target must carry the id the reference points at.
    pub fn load(&mut self, value: T) -> Result<(), DomainError> {
        let expected = self.id();
        if value.id() != expected {
            return Err(DomainError::ReferenceMismatch {
                entity: T::NAME,
                expected: expected.to_string(),
                actual: value.id().to_string(),
            });
        }
        *self = Ref::Loaded(value);
        Ok(())
    }

    /// Consumes the reference and returns the target if it was loaded.
    pub fn into_loaded(self) -> Result<T, DomainError> {
        match self {
            Ref::Loaded(value) => Ok(value),
            Ref::Unloaded(id) => Err(unresolved::<T>(id)),
        }
    }
}

fn unresolved<T: Entity>(id: T::Id) -> DomainError {
    DomainError::UnresolvedReference {
        entity: T::NAME,
        id: id.to_string(),
    }
}

impl<T: Entity + Serialize> Serialize for Ref<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Ref::Loaded(value) => value.serialize(serializer),
            Ref::Unloaded(id) => Err(serde::ser::Error::custom(unresolved::<T>(*id))),
        }
    }
}
