//! Validation: per-connection compatibility plus graph-level rules.
//!
//! `validate_workflow` is the front-end entry point. It never fails; every
//! problem with the drawn design, including references to nodes or modules
//! that do not exist, comes back as an issue in the returned list.

pub mod connection;
pub mod structural;
mod voltage;

pub use connection::check_connection;

use crate::catalog::{ModuleDefinition, ModulePortDefinition, get_module_by_id};
use crate::issue::ValidationIssue;
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{PortRef, Workflow, WorkflowNode};

/// Validate a whole workflow against a catalog.
///
/// Issues come back sorted by severity (errors first), with equal severities
/// kept in emission order: connection checks in connection order, then the
/// graph-level rules in their registration order. Identical input yields an
/// identical report.
pub fn validate_workflow(workflow: &Workflow, catalog: &[ModuleDefinition]) -> Vec<ValidationIssue> {
    let graph = WorkflowGraph::build(workflow);

    let mut issues = Vec::new();
    for conn in &workflow.connections {
        issues.extend(connection::check_connection(workflow, catalog, conn));
    }
    issues.extend(structural::validate_structural(workflow, catalog, &graph));

    issues.sort_by_key(|issue| issue.severity);
    issues
}

/// A connection endpoint resolved down to its catalog port definition.
pub(crate) struct Endpoint<'a> {
    pub node: &'a WorkflowNode,
    pub port: &'a ModulePortDefinition,
}

impl Endpoint<'_> {
    /// `node:port` shorthand for messages.
    pub fn describe(&self) -> String {
        format!("{}:{}", self.node.id, self.port.id)
    }
}

/// Resolve a port reference to its node and port definition. The error is
/// the human-readable reason the reference dangles.
pub(crate) fn resolve_endpoint<'a>(
    workflow: &'a Workflow,
    catalog: &'a [ModuleDefinition],
    port_ref: &PortRef,
) -> Result<Endpoint<'a>, String> {
    let Some(node) = workflow.node(&port_ref.node_id) else {
        return Err(format!(
            "node '{}' does not exist in the workflow",
            port_ref.node_id
        ));
    };
    let Some(module) = get_module_by_id(catalog, &node.module_id) else {
        return Err(format!(
            "node '{}' references module '{}' which is not in the catalog",
            node.id, node.module_id
        ));
    };
    let Some(port) = module.port(&port_ref.port_id) else {
        return Err(format!(
            "module '{}' has no port '{}'",
            module.id, port_ref.port_id
        ));
    };
    Ok(Endpoint { node, port })
}
