//! Registry Error Types
//!
//! Shared error type for all registry mutations and lookups.

use std::fmt;

use thiserror::Error;

/// Kind of entity an operation was addressing.
///
/// Used in error messages so a failed lookup names what was missing,
/// not just the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Workflow,
    Resource,
    Container,
    Store,
    Custom,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Workflow => "workflow",
            EntityKind::Resource => "resource",
            EntityKind::Container => "container",
            EntityKind::Store => "store",
            EntityKind::Custom => "custom component",
        };
        f.write_str(label)
    }
}

/// Errors produced by registry operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// An entity with the same name already exists in the target collection.
    #[error("{kind} '{name}' already exists")]
    Duplicate { kind: EntityKind, name: String },

    /// The addressed entity does not exist.
    #[error("{kind} '{name}' not found")]
    NotFound { kind: EntityKind, name: String },
}

impl RegistryError {
    /// Builds a `Duplicate` error.
    pub fn duplicate(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::Duplicate {
            kind,
            name: name.into(),
        }
    }

    /// Builds a `NotFound` error.
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }
}
