//! Scenario Parser
//!
//! Handles loading scenario definitions from YAML files. A scenario
//! declares the registry layout (workflows and their entities) and an
//! ordered list of telemetry events to replay into it.
//!
//! # Example YAML Format
//!
//! ```yaml
//! name: database
//! workflows:
//!   - name: workflow1
//!     resources: [resource1, resource2, resource3]
//!     containers: [container1]
//!     stores: [store1]
//!
//! events:
//!   - type: usage
//!     workflow: workflow1
//!     resource: resource1
//!     user: user1
//!     count: 1
//!     duration: 2.0
//!
//!   - type: container_put
//!     workflow: workflow1
//!     container: container1
//!     time: 4.0
//!     amount: 10.0
//!     level: 10.0
//!     user: user1
//! ```

use std::collections::BTreeMap;
use std::error::Error;
use std::fs;

use log::{debug, info};
use serde::Deserialize;

use super::model::{AttrValue, CustomComponent, Registry};

/// Top-level scenario definition as parsed from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioDef {
    /// Registry name; defaults to "registry" when omitted
    #[serde(default = "default_registry_name")]
    pub name: String,

    /// Workflow declarations
    #[serde(default)]
    pub workflows: Vec<WorkflowDef>,

    /// Telemetry events, replayed in order
    #[serde(default)]
    pub events: Vec<EventDef>,
}

fn default_registry_name() -> String {
    "registry".to_string()
}

/// Declaration of a single workflow and its entities.
#[derive(Deserialize, Debug, Clone)]
pub struct WorkflowDef {
    /// Unique workflow name
    pub name: String,

    #[serde(default)]
    pub resources: Vec<String>,

    #[serde(default)]
    pub containers: Vec<String>,

    #[serde(default)]
    pub stores: Vec<String>,

    #[serde(default)]
    pub customs: Vec<CustomDef>,
}

/// Declaration of a custom component.
#[derive(Deserialize, Debug, Clone)]
pub struct CustomDef {
    /// Unique component name
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub attributes: BTreeMap<String, AttrValue>,
}

/// A telemetry event addressed at an entity of a declared workflow.
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventDef {
    /// Per-user usage entry on a resource
    Usage {
        workflow: String,
        resource: String,
        user: String,
        count: u64,
        duration: f64,
    },

    /// User entered a resource queue
    Enter {
        workflow: String,
        resource: String,
        user: String,
        timestamp: f64,
    },

    /// User left a resource
    Leave {
        workflow: String,
        resource: String,
        user: String,
        timestamp: f64,
    },

    /// Put into a container
    ContainerPut {
        workflow: String,
        container: String,
        time: f64,
        amount: f64,
        level: f64,
        user: String,
    },

    /// Get from a container
    ContainerGet {
        workflow: String,
        container: String,
        time: f64,
        amount: f64,
        level: f64,
        user: String,
    },

    /// Put into a store
    StorePut {
        workflow: String,
        store: String,
        time: f64,
        amount: f64,
        level: f64,
        user: String,
    },

    /// Get from a store
    StoreGet {
        workflow: String,
        store: String,
        time: f64,
        amount: f64,
        level: f64,
        user: String,
    },
}

/// Loads a scenario from a YAML file and replays it into a registry.
///
/// This function:
/// 1. Reads and parses the YAML file
/// 2. Builds the registry layout from the workflow declarations
/// 3. Replays the event list in order
///
/// Duplicate entity names and events addressing unknown entities fail
/// the load.
///
/// # Example
///
/// ```rust,no_run
/// use flowtrace::registry::load_scenario;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let registry = load_scenario("scenario.yaml")?;
///     println!("Loaded {} workflows", registry.len());
///     Ok(())
/// }
/// ```
pub fn load_scenario(path: &str) -> Result<Registry, Box<dyn Error>> {
    info!("Loading scenario from: {}", path);

    let yaml_content = fs::read_to_string(path).map_err(|e| {
        format!(
            "Failed to read scenario file '{}': {}. Check that the file exists and is readable.",
            path, e
        )
    })?;

    debug!("YAML content loaded ({} bytes)", yaml_content.len());

    let scenario: ScenarioDef = serde_yaml::from_str(&yaml_content).map_err(|e| {
        format!(
            "Failed to parse scenario YAML: {}. Check the file format.",
            e
        )
    })?;

    info!(
        "Parsed scenario '{}': {} workflows, {} events",
        scenario.name,
        scenario.workflows.len(),
        scenario.events.len()
    );

    build_registry(scenario)
}

/// Builds a registry from a parsed scenario definition.
pub fn build_registry(scenario: ScenarioDef) -> Result<Registry, Box<dyn Error>> {
    let mut registry = Registry::new(&scenario.name);

    for def in &scenario.workflows {
        registry.add_workflow(&def.name)?;
        let workflow = registry.workflow_mut(&def.name)?;

        for resource in &def.resources {
            workflow.add_resource(resource)?;
        }
        for container in &def.containers {
            workflow.add_container(container)?;
        }
        for store in &def.stores {
            workflow.add_store(store)?;
        }
        for custom in &def.customs {
            let mut component = CustomComponent::new(&custom.name);
            component.description = custom.description.clone();
            component.attributes = custom.attributes.clone();
            workflow.add_custom(component)?;
        }

        debug!(
            "Workflow '{}': {} entities declared",
            def.name,
            registry.workflow(&def.name)?.entity_count()
        );
    }

    replay_events(&mut registry, &scenario.events)?;

    info!(
        "Registry '{}' built: {} workflows, {} events replayed",
        registry.name,
        registry.len(),
        scenario.events.len()
    );

    Ok(registry)
}

/// Replays events into an existing registry, in order.
///
/// The first event addressing an unknown workflow or entity aborts the
/// replay with that error; earlier events stay applied.
pub fn replay_events(registry: &mut Registry, events: &[EventDef]) -> Result<(), Box<dyn Error>> {
    for event in events {
        match event {
            EventDef::Usage {
                workflow,
                resource,
                user,
                count,
                duration,
            } => {
                registry
                    .workflow_mut(workflow)?
                    .record_usage(resource, user, *count, *duration)?;
            }
            EventDef::Enter {
                workflow,
                resource,
                user,
                timestamp,
            } => {
                registry
                    .workflow_mut(workflow)?
                    .record_enter(resource, user, *timestamp)?;
            }
            EventDef::Leave {
                workflow,
                resource,
                user,
                timestamp,
            } => {
                registry
                    .workflow_mut(workflow)?
                    .record_leave(resource, user, *timestamp)?;
            }
            EventDef::ContainerPut {
                workflow,
                container,
                time,
                amount,
                level,
                user,
            } => {
                registry
                    .workflow_mut(workflow)?
                    .container_mut(container)?
                    .transfers
                    .record_put(*time, *amount, *level, user);
            }
            EventDef::ContainerGet {
                workflow,
                container,
                time,
                amount,
                level,
                user,
            } => {
                registry
                    .workflow_mut(workflow)?
                    .container_mut(container)?
                    .transfers
                    .record_get(*time, *amount, *level, user);
            }
            EventDef::StorePut {
                workflow,
                store,
                time,
                amount,
                level,
                user,
            } => {
                registry
                    .workflow_mut(workflow)?
                    .store_mut(store)?
                    .transfers
                    .record_put(*time, *amount, *level, user);
            }
            EventDef::StoreGet {
                workflow,
                store,
                time,
                amount,
                level,
                user,
            } => {
                registry
                    .workflow_mut(workflow)?
                    .store_mut(store)?
                    .transfers
                    .record_get(*time, *amount, *level, user);
            }
        }
    }

    Ok(())
}
