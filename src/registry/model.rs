//! Registry Data Model
//!
//! Core data structures for the telemetry registry: workflows and the
//! resources, containers, stores, and custom components they own.
//!
//! All collections preserve insertion order, which is also the order the
//! reporter enumerates them in. Names are unique per collection per
//! workflow; mutations reject duplicates instead of replacing.
//!
//! # Example
//!
//! ```
//! use flowtrace::registry::Registry;
//!
//! fn main() -> Result<(), flowtrace::registry::RegistryError> {
//!     let mut registry = Registry::new("database");
//!     registry.add_workflow("workflow1")?;
//!
//!     let workflow = registry.workflow_mut("workflow1")?;
//!     workflow.add_resource("resource1")?;
//!     workflow.record_usage("resource1", "user1", 1, 2.0)?;
//!     Ok(())
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::telemetry::{TransferLog, UsageLedger};

use super::error::{EntityKind, RegistryError};

/// A typed attribute value on a custom component.
///
/// Deserializes from plain YAML/JSON scalars (untagged).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// A resource within a workflow.
///
/// Resources accumulate per-user usage entries and enter/leave events
/// in their [`UsageLedger`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Resource {
    /// Unique name within the owning workflow
    pub name: String,
    /// Telemetry recorded against this resource
    pub usage: UsageLedger,
}

impl Resource {
    /// Creates an empty resource.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            usage: UsageLedger::new(),
        }
    }
}

/// A container within a workflow. Tracks put/get transfer events.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Container {
    /// Unique name within the owning workflow
    pub name: String,
    /// Put/get events recorded against this container
    pub transfers: TransferLog,
}

impl Container {
    /// Creates an empty container.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            transfers: TransferLog::new(),
        }
    }
}

/// A store within a workflow. Tracks put/get transfer events.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Store {
    /// Unique name within the owning workflow
    pub name: String,
    /// Put/get events recorded against this store
    pub transfers: TransferLog,
}

impl Store {
    /// Creates an empty store.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            transfers: TransferLog::new(),
        }
    }
}

/// A user-defined component with free-form typed attributes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CustomComponent {
    /// Unique name within the owning workflow
    pub name: String,

    /// Optional human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Typed attributes, sorted by key
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, AttrValue>,
}

impl CustomComponent {
    /// Creates an empty custom component.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            description: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets or replaces an attribute.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: AttrValue) {
        self.attributes.insert(key.into(), value);
    }
}

/// A named workflow owning ordered collections of entities.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Workflow {
    /// Unique name within the registry
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    resources: Vec<Resource>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    containers: Vec<Container>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    stores: Vec<Store>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    customs: Vec<CustomComponent>,
}

impl Workflow {
    /// Creates an empty workflow.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            resources: Vec::new(),
            containers: Vec::new(),
            stores: Vec::new(),
            customs: Vec::new(),
        }
    }

    /// Adds a resource. Fails if a resource with the same name exists.
    ///
    /// Names are trimmed before comparison and storage.
    pub fn add_resource(&mut self, name: &str) -> Result<(), RegistryError> {
        let name = name.trim();
        if self.resources.iter().any(|r| r.name == name) {
            return Err(RegistryError::duplicate(EntityKind::Resource, name));
        }
        self.resources.push(Resource::new(name));
        Ok(())
    }

    /// Adds a container. Fails if a container with the same name exists.
    pub fn add_container(&mut self, name: &str) -> Result<(), RegistryError> {
        let name = name.trim();
        if self.containers.iter().any(|c| c.name == name) {
            return Err(RegistryError::duplicate(EntityKind::Container, name));
        }
        self.containers.push(Container::new(name));
        Ok(())
    }

    /// Adds a store. Fails if a store with the same name exists.
    pub fn add_store(&mut self, name: &str) -> Result<(), RegistryError> {
        let name = name.trim();
        if self.stores.iter().any(|s| s.name == name) {
            return Err(RegistryError::duplicate(EntityKind::Store, name));
        }
        self.stores.push(Store::new(name));
        Ok(())
    }

    /// Adds a custom component. Fails on a duplicate name.
    pub fn add_custom(&mut self, mut component: CustomComponent) -> Result<(), RegistryError> {
        component.name = component.name.trim().to_string();
        if self.customs.iter().any(|c| c.name == component.name) {
            return Err(RegistryError::duplicate(EntityKind::Custom, &component.name));
        }
        self.customs.push(component);
        Ok(())
    }

    /// Gets a resource by name.
    pub fn resource(&self, name: &str) -> Result<&Resource, RegistryError> {
        let name = name.trim();
        self.resources
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Resource, name))
    }

    /// Gets a mutable resource by name.
    pub fn resource_mut(&mut self, name: &str) -> Result<&mut Resource, RegistryError> {
        let name = name.trim();
        self.resources
            .iter_mut()
            .find(|r| r.name == name)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Resource, name))
    }

    /// Gets a container by name.
    pub fn container(&self, name: &str) -> Result<&Container, RegistryError> {
        let name = name.trim();
        self.containers
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Container, name))
    }

    /// Gets a mutable container by name.
    pub fn container_mut(&mut self, name: &str) -> Result<&mut Container, RegistryError> {
        let name = name.trim();
        self.containers
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Container, name))
    }

    /// Gets a store by name.
    pub fn store(&self, name: &str) -> Result<&Store, RegistryError> {
        let name = name.trim();
        self.stores
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Store, name))
    }

    /// Gets a mutable store by name.
    pub fn store_mut(&mut self, name: &str) -> Result<&mut Store, RegistryError> {
        let name = name.trim();
        self.stores
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Store, name))
    }

    /// Gets a custom component by name.
    pub fn custom(&self, name: &str) -> Result<&CustomComponent, RegistryError> {
        let name = name.trim();
        self.customs
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Custom, name))
    }

    /// Records a usage entry against a resource of this workflow.
    ///
    /// Fails with `NotFound` if the resource has not been added. An entry
    /// for a user that already has one is overwritten in place.
    pub fn record_usage(
        &mut self,
        resource: &str,
        user: &str,
        count: u64,
        duration: f64,
    ) -> Result<(), RegistryError> {
        self.resource_mut(resource)?
            .usage
            .record_usage(user, count, duration);
        Ok(())
    }

    /// Records an enter event against a resource of this workflow.
    pub fn record_enter(
        &mut self,
        resource: &str,
        user: &str,
        timestamp: f64,
    ) -> Result<(), RegistryError> {
        self.resource_mut(resource)?.usage.record_enter(user, timestamp);
        Ok(())
    }

    /// Records a leave event against a resource of this workflow.
    pub fn record_leave(
        &mut self,
        resource: &str,
        user: &str,
        timestamp: f64,
    ) -> Result<(), RegistryError> {
        self.resource_mut(resource)?.usage.record_leave(user, timestamp);
        Ok(())
    }

    /// Returns resources in insertion order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Returns containers in insertion order.
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    /// Returns stores in insertion order.
    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    /// Returns custom components in insertion order.
    pub fn customs(&self) -> &[CustomComponent] {
        &self.customs
    }

    /// Total number of entities across all collections.
    pub fn entity_count(&self) -> usize {
        self.resources.len() + self.containers.len() + self.stores.len() + self.customs.len()
    }
}

/// Top-level registry mapping workflow names to workflows.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Registry {
    /// Registry name, used for snapshot file naming and report headers
    pub name: String,

    #[serde(default)]
    workflows: Vec<Workflow>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            workflows: Vec::new(),
        }
    }

    /// Adds a workflow. Fails if one with the same name exists.
    ///
    /// Names are trimmed before comparison and storage.
    pub fn add_workflow(&mut self, name: &str) -> Result<(), RegistryError> {
        let name = name.trim();
        if self.workflows.iter().any(|w| w.name == name) {
            return Err(RegistryError::duplicate(EntityKind::Workflow, name));
        }
        self.workflows.push(Workflow::new(name));
        Ok(())
    }

    /// Gets a workflow by name.
    pub fn workflow(&self, name: &str) -> Result<&Workflow, RegistryError> {
        let name = name.trim();
        self.workflows
            .iter()
            .find(|w| w.name == name)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Workflow, name))
    }

    /// Gets a mutable workflow by name.
    pub fn workflow_mut(&mut self, name: &str) -> Result<&mut Workflow, RegistryError> {
        let name = name.trim();
        self.workflows
            .iter_mut()
            .find(|w| w.name == name)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Workflow, name))
    }

    /// Returns workflows in insertion order.
    pub fn workflows(&self) -> &[Workflow] {
        &self.workflows
    }

    /// Returns the number of workflows.
    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    /// Returns true if the registry has no workflows.
    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_add_and_query_workflow() {
        let mut registry = Registry::new("database");
        registry.add_workflow("workflow1").unwrap();

        let workflow = registry.workflow("workflow1").unwrap();
        assert_eq!(workflow.name, "workflow1");
    }

    #[test]
    fn test_registry_duplicate_workflow() {
        let mut registry = Registry::new("database");
        registry.add_workflow("workflow1").unwrap();

        let err = registry.add_workflow("workflow1").unwrap_err();
        assert_eq!(
            err,
            RegistryError::duplicate(EntityKind::Workflow, "workflow1")
        );
    }

    #[test]
    fn test_registry_workflow_not_found() {
        let registry = Registry::new("database");
        assert!(registry.workflow("missing").is_err());
    }

    #[test]
    fn test_workflow_add_entities() {
        let mut workflow = Workflow::new("workflow1");
        workflow.add_resource("resource1").unwrap();
        workflow.add_container("container1").unwrap();
        workflow.add_store("store1").unwrap();
        workflow
            .add_custom(CustomComponent::new("custom1"))
            .unwrap();

        assert_eq!(workflow.entity_count(), 4);
        assert!(workflow.resource("resource1").is_ok());
        assert!(workflow.container("container1").is_ok());
        assert!(workflow.store("store1").is_ok());
        assert!(workflow.custom("custom1").is_ok());
    }

    #[test]
    fn test_workflow_duplicate_resource() {
        let mut workflow = Workflow::new("workflow1");
        workflow.add_resource("resource1").unwrap();

        assert!(workflow.add_resource("resource1").is_err());
    }

    #[test]
    fn test_same_name_allowed_across_collections() {
        // Uniqueness is per collection, not per workflow
        let mut workflow = Workflow::new("workflow1");
        workflow.add_resource("shared").unwrap();
        workflow.add_container("shared").unwrap();
        workflow.add_store("shared").unwrap();

        assert_eq!(workflow.entity_count(), 3);
    }

    #[test]
    fn test_record_usage_unknown_resource() {
        let mut workflow = Workflow::new("workflow1");

        let err = workflow
            .record_usage("missing", "user1", 1, 2.0)
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::not_found(EntityKind::Resource, "missing")
        );
    }

    #[test]
    fn test_record_usage_reaches_ledger() {
        let mut workflow = Workflow::new("workflow1");
        workflow.add_resource("resource1").unwrap();
        workflow.record_usage("resource1", "user1", 1, 2.0).unwrap();

        let resource = workflow.resource("resource1").unwrap();
        assert_eq!(resource.usage.entry("user1").unwrap().count, 1);
    }

    #[test]
    fn test_record_enter_leave() {
        let mut workflow = Workflow::new("workflow1");
        workflow.add_resource("resource1").unwrap();
        workflow.record_enter("resource1", "user1", 89.0).unwrap();
        workflow.record_leave("resource1", "user1", 90.0).unwrap();

        let resource = workflow.resource("resource1").unwrap();
        assert_eq!(resource.usage.enters().len(), 1);
        assert_eq!(resource.usage.leaves().len(), 1);
    }

    #[test]
    fn test_record_enter_unknown_resource() {
        let mut workflow = Workflow::new("workflow1");
        assert!(workflow.record_enter("missing", "user1", 1.0).is_err());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut registry = Registry::new("database");
        registry.add_workflow("beta").unwrap();
        registry.add_workflow("alpha").unwrap();

        let names: Vec<_> = registry.workflows().iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["beta", "alpha"]);
    }

    #[test]
    fn test_names_are_trimmed() {
        let resource = Resource::new("  resource1  ");
        assert_eq!(resource.name, "resource1");
    }

    #[test]
    fn test_padded_duplicate_resource_rejected() {
        let mut workflow = Workflow::new("workflow1");
        workflow.add_resource("resource1").unwrap();

        // Trimming happens before the uniqueness check
        let err = workflow.add_resource(" resource1 ").unwrap_err();
        assert_eq!(
            err,
            RegistryError::duplicate(EntityKind::Resource, "resource1")
        );
        assert_eq!(workflow.resources().len(), 1);
    }

    #[test]
    fn test_padded_duplicate_workflow_rejected() {
        let mut registry = Registry::new("database");
        registry.add_workflow("workflow1").unwrap();

        assert!(registry.add_workflow("  workflow1").is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_padded_add_then_query() {
        let mut registry = Registry::new("database");
        registry.add_workflow(" workflow1 ").unwrap();

        // Both padded and trimmed lookups resolve to the same workflow
        assert_eq!(registry.workflow(" workflow1 ").unwrap().name, "workflow1");
        assert_eq!(registry.workflow("workflow1").unwrap().name, "workflow1");
    }

    #[test]
    fn test_padded_lookup_of_entities() {
        let mut workflow = Workflow::new("workflow1");
        workflow.add_resource("resource1").unwrap();
        workflow.add_container("container1").unwrap();
        workflow.add_store("store1").unwrap();
        workflow
            .add_custom(CustomComponent::new("custom1"))
            .unwrap();

        assert!(workflow.resource(" resource1 ").is_ok());
        assert!(workflow.container(" container1 ").is_ok());
        assert!(workflow.store(" store1 ").is_ok());
        assert!(workflow.custom(" custom1 ").is_ok());
    }

    #[test]
    fn test_record_usage_with_padded_resource_name() {
        let mut workflow = Workflow::new("workflow1");
        workflow.add_resource("resource1").unwrap();
        workflow
            .record_usage(" resource1 ", "user1", 1, 2.0)
            .unwrap();

        let resource = workflow.resource("resource1").unwrap();
        assert_eq!(resource.usage.user_count(), 1);
    }

    #[test]
    fn test_padded_duplicate_custom_rejected() {
        let mut workflow = Workflow::new("workflow1");
        workflow
            .add_custom(CustomComponent::new("custom1"))
            .unwrap();

        let mut padded = CustomComponent::new("custom1");
        padded.name = " custom1 ".to_string();
        assert!(workflow.add_custom(padded).is_err());
        assert_eq!(workflow.customs().len(), 1);
    }

    #[test]
    fn test_custom_component_attributes() {
        let mut custom = CustomComponent::new("custom1").with_description("tracks overflow");
        custom.set_attribute("threshold", AttrValue::Float(3.5));
        custom.set_attribute("enabled", AttrValue::Bool(true));

        assert_eq!(custom.attributes.len(), 2);
        assert_eq!(
            custom.attributes.get("threshold"),
            Some(&AttrValue::Float(3.5))
        );
    }

    #[test]
    fn test_registry_serde_roundtrip() {
        let mut registry = Registry::new("database");
        registry.add_workflow("workflow1").unwrap();
        let workflow = registry.workflow_mut("workflow1").unwrap();
        workflow.add_resource("resource1").unwrap();
        workflow.record_usage("resource1", "user1", 1, 2.0).unwrap();
        workflow.add_container("container1").unwrap();
        workflow
            .container_mut("container1")
            .unwrap()
            .transfers
            .record_put(1.0, 5.0, 5.0, "user1");

        let json = serde_json::to_string_pretty(&registry).unwrap();
        let loaded: Registry = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded, registry);
    }

    #[test]
    fn test_attr_value_untagged_deserialization() {
        let yaml = "threshold: 3.5\nretries: 2\nlabel: hot\nenabled: true\nnote: null\n";
        let attrs: BTreeMap<String, AttrValue> = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(attrs.get("threshold"), Some(&AttrValue::Float(3.5)));
        assert_eq!(attrs.get("retries"), Some(&AttrValue::Int(2)));
        assert_eq!(
            attrs.get("label"),
            Some(&AttrValue::Text("hot".to_string()))
        );
        assert_eq!(attrs.get("enabled"), Some(&AttrValue::Bool(true)));
        assert_eq!(attrs.get("note"), Some(&AttrValue::Null));
    }
}
