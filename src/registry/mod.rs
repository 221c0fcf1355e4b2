//! Registry Module
//!
//! Provides the core data model for the telemetry registry along with
//! scenario loading and snapshot persistence.
//!
//! # Structure
//!
//! - [`model`]: Core data structures (Registry, Workflow, entities)
//! - [`error`]: Shared error type for mutations and lookups
//! - [`parser`]: YAML scenario parsing and event replay
//! - [`snapshot`]: JSON save/load of registry state

pub mod error;
pub mod model;
pub mod parser;
pub mod snapshot;

pub use error::{EntityKind, RegistryError};
pub use model::{AttrValue, Container, CustomComponent, Registry, Resource, Store, Workflow};
pub use parser::{load_scenario, EventDef, ScenarioDef};
pub use snapshot::Snapshot;
