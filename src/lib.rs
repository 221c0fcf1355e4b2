//! Flowtrace - Workflow Telemetry Registry
//!
//! An in-memory registry that tracks workflows and the resources,
//! containers, and stores they own, accumulates per-user telemetry
//! against those entities, and renders deterministic text reports.
//! Designed for analyzing simulation and pipeline runs after the fact.
//!
//! # Architecture
//!
//! The library is organized into three main modules:
//!
//! - [`registry`]: Data model, scenario loading, and snapshot persistence
//! - [`telemetry`]: Usage and transfer ledgers attached to entities
//! - [`report`]: Deterministic text rendering of registry state
//!
//! # Example
//!
//! ```rust
//! use flowtrace::registry::Registry;
//! use flowtrace::report;
//!
//! fn main() -> Result<(), flowtrace::registry::RegistryError> {
//!     let mut registry = Registry::new("database");
//!     registry.add_workflow("workflow1")?;
//!
//!     let workflow = registry.workflow_mut("workflow1")?;
//!     workflow.add_resource("resource1")?;
//!     workflow.record_usage("resource1", "user1", 1, 2.0)?;
//!
//!     println!("{}", report::render(&registry));
//!     Ok(())
//! }
//! ```

pub mod registry;
pub mod report;
pub mod telemetry;

// Re-export commonly used types
pub use registry::parser::load_scenario;
pub use registry::{Registry, RegistryError, Workflow};
pub use report::render;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "Flowtrace";
