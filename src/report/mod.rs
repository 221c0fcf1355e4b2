//! Registry Report Rendering
//!
//! Turns registry state into a deterministic human-readable text dump.
//! Rendering is a pure function of the registry: the same state always
//! produces byte-identical output, and nothing is mutated.
//!
//! Workflows and entities appear in insertion order; usage entries keep
//! their first-recorded position even after overwrites, so repeated
//! renders stay stable across updates to existing users.

use crate::registry::{
    AttrValue, Container, CustomComponent, Registry, Resource, Store, Workflow,
};
use crate::telemetry::TransferLog;

/// Renders the full registry to a text report.
pub fn render(registry: &Registry) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Registry '{}' ({} workflow{})\n",
        registry.name,
        registry.len(),
        plural(registry.len())
    ));

    if registry.is_empty() {
        out.push_str("  (no workflows registered)\n");
        return out;
    }

    for workflow in registry.workflows() {
        out.push('\n');
        render_workflow_into(&mut out, workflow);
    }

    out
}

/// Renders a single workflow to a text report.
pub fn render_workflow(workflow: &Workflow) -> String {
    let mut out = String::new();
    render_workflow_into(&mut out, workflow);
    out
}

fn render_workflow_into(out: &mut String, workflow: &Workflow) {
    out.push_str(&format!(
        "Workflow '{}' ({} entit{})\n",
        workflow.name,
        workflow.entity_count(),
        if workflow.entity_count() == 1 { "y" } else { "ies" }
    ));

    if !workflow.resources().is_empty() {
        out.push_str(&format!("  Resources ({}):\n", workflow.resources().len()));
        for resource in workflow.resources() {
            render_resource(out, resource);
        }
    }

    if !workflow.containers().is_empty() {
        out.push_str(&format!(
            "  Containers ({}):\n",
            workflow.containers().len()
        ));
        for container in workflow.containers() {
            render_container(out, container);
        }
    }

    if !workflow.stores().is_empty() {
        out.push_str(&format!("  Stores ({}):\n", workflow.stores().len()));
        for store in workflow.stores() {
            render_store(out, store);
        }
    }

    if !workflow.customs().is_empty() {
        out.push_str(&format!("  Custom ({}):\n", workflow.customs().len()));
        for custom in workflow.customs() {
            render_custom(out, custom);
        }
    }
}

fn render_resource(out: &mut String, resource: &Resource) {
    out.push_str(&format!("    {}:\n", resource.name));

    let ledger = &resource.usage;
    if ledger.is_empty() {
        out.push_str("      (no telemetry recorded)\n");
        return;
    }

    for entry in ledger.entries() {
        out.push_str(&format!(
            "      usage: {} count={} duration={:.3}s\n",
            entry.user, entry.count, entry.duration
        ));
    }

    for event in ledger.enters() {
        out.push_str(&format!(
            "      enter: {} at {:.3}s\n",
            event.user, event.timestamp
        ));
    }

    for event in ledger.leaves() {
        out.push_str(&format!(
            "      leave: {} at {:.3}s\n",
            event.user, event.timestamp
        ));
    }

    if ledger.user_count() > 0 {
        out.push_str(&format!(
            "      summary: {} user{}, total count {}, mean duration {:.3}s\n",
            ledger.user_count(),
            plural(ledger.user_count()),
            ledger.total_count(),
            ledger.mean_duration()
        ));
    }
}

fn render_container(out: &mut String, container: &Container) {
    out.push_str(&format!("    {}:\n", container.name));
    render_transfers(out, &container.transfers);
}

fn render_store(out: &mut String, store: &Store) {
    out.push_str(&format!("    {}:\n", store.name));
    render_transfers(out, &store.transfers);
}

fn render_transfers(out: &mut String, log: &TransferLog) {
    if log.is_empty() {
        out.push_str("      (no transfers recorded)\n");
        return;
    }

    for event in log.puts() {
        out.push_str(&format!(
            "      put: {} amount={:.3} level={:.3} at {:.3}s\n",
            event.user, event.amount, event.level_after, event.time
        ));
    }

    for event in log.gets() {
        out.push_str(&format!(
            "      get: {} amount={:.3} level={:.3} at {:.3}s\n",
            event.user, event.amount, event.level_after, event.time
        ));
    }

    let mut summary = format!(
        "      summary: {} put{}, {} get{}",
        log.puts().len(),
        plural(log.puts().len()),
        log.gets().len(),
        plural(log.gets().len())
    );
    if let Some(peak) = log.peak_put_amount() {
        summary.push_str(&format!(", peak put {:.3}", peak));
    }
    if let Some(peak) = log.peak_get_amount() {
        summary.push_str(&format!(", peak get {:.3}", peak));
    }
    summary.push('\n');
    out.push_str(&summary);
}

fn render_custom(out: &mut String, custom: &CustomComponent) {
    out.push_str(&format!("    {}:\n", custom.name));

    if let Some(ref description) = custom.description {
        out.push_str(&format!("      description: {}\n", description));
    }

    // BTreeMap iteration is key-sorted, so output stays deterministic
    for (key, value) in &custom.attributes {
        out.push_str(&format!("      {} = {}\n", key, format_attr(value)));
    }

    if custom.description.is_none() && custom.attributes.is_empty() {
        out.push_str("      (no attributes)\n");
    }
}

fn format_attr(value: &AttrValue) -> String {
    match value {
        AttrValue::Null => "null".to_string(),
        AttrValue::Bool(b) => b.to_string(),
        AttrValue::Int(i) => i.to_string(),
        AttrValue::Float(f) => format!("{:.3}", f),
        AttrValue::Text(s) => s.clone(),
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
