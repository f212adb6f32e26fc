//! Graph-level validation rules.
//!
//! Everything here needs the whole workflow at once: fan-out counting,
//! duplicate detection, isolation, bus-wide inference, and power-domain
//! partitioning. Rules run in a fixed registration order so reports are
//! stable for identical input.

use std::collections::{HashMap, HashSet};

use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;

use crate::catalog::{
    ModuleCategory, ModuleDefinition, ModulePortDefinition, PortKind, get_module_by_id,
};
use crate::issue::{RuleCode, ValidationIssue};
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{PortRef, Workflow, WorkflowNode};

use super::{resolve_endpoint, voltage};

/// Module id the front-end inserts for the i2c pull-up quick fix. The
/// `i2c-pullup-missing` issue id and this module id are both UI contract.
pub const I2C_PULLUP_MODULE_ID: &str = "glue_i2c_pullup";

/// Bus type string that triggers pull-up inference.
const I2C_BUS_TYPE: &str = "i2c";

/// How many wires a non-multi-drop power or bus source may drive before the
/// fan-out rule warns.
pub const MAX_UNBUFFERED_FAN_OUT: usize = 1;

/// Run all graph-level rules in registration order.
pub fn validate_structural(
    workflow: &Workflow,
    catalog: &[ModuleDefinition],
    graph: &WorkflowGraph,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    check_fan_out(workflow, catalog, &mut issues);
    check_duplicate_connections(workflow, catalog, &mut issues);
    check_isolated_nodes(workflow, graph, &mut issues);
    check_i2c_pullup(workflow, catalog, &mut issues);
    check_power_domains(workflow, catalog, graph, &mut issues);

    issues
}

// -----------------------------------------------------------------------------
// Fan-out
// -----------------------------------------------------------------------------

fn check_fan_out(
    workflow: &Workflow,
    catalog: &[ModuleDefinition],
    issues: &mut Vec<ValidationIssue>,
) {
    let mut outgoing: HashMap<(&str, &str), usize> = HashMap::new();
    for conn in &workflow.connections {
        *outgoing
            .entry((conn.from.node_id.as_str(), conn.from.port_id.as_str()))
            .or_default() += 1;
    }

    // Walk the connections again so warnings come out in first-occurrence
    // order, one per offending port.
    let mut reported: HashSet<(&str, &str)> = HashSet::new();
    for conn in &workflow.connections {
        let key = (conn.from.node_id.as_str(), conn.from.port_id.as_str());
        let count = outgoing.get(&key).copied().unwrap_or(0);
        if count <= MAX_UNBUFFERED_FAN_OUT || !reported.insert(key) {
            continue;
        }
        let Ok(source) = resolve_endpoint(workflow, catalog, &conn.from) else {
            continue;
        };
        if source.port.multi_drop || !matches!(source.port.kind, PortKind::Power | PortKind::Bus) {
            continue;
        }
        issues.push(ValidationIssue::port(
            RuleCode::FanOutUnbuffered,
            &conn.from.node_id,
            &conn.from.port_id,
            format!(
                "Port '{}' drives {} connections; possible fan-out without buffering",
                source.describe(),
                count
            ),
        ));
    }
}

// -----------------------------------------------------------------------------
// Duplicates
// -----------------------------------------------------------------------------

fn check_duplicate_connections(
    workflow: &Workflow,
    catalog: &[ModuleDefinition],
    issues: &mut Vec<ValidationIssue>,
) {
    let mut seen: HashSet<(&str, &str, &str, &str)> = HashSet::new();
    for conn in &workflow.connections {
        // Power and bus wires tie symmetric electrical nets, so A→B and B→A
        // are the same wire; signal connections stay directional.
        let symmetric = resolve_endpoint(workflow, catalog, &conn.from)
            .or_else(|_| resolve_endpoint(workflow, catalog, &conn.to))
            .is_ok_and(|endpoint| matches!(endpoint.port.kind, PortKind::Power | PortKind::Bus));
        let key = if symmetric {
            undirected_key(&conn.from, &conn.to)
        } else {
            directed_key(&conn.from, &conn.to)
        };
        if !seen.insert(key) {
            issues.push(ValidationIssue::connection(
                RuleCode::DuplicateConnection,
                &conn.id,
                format!(
                    "Duplicate connection from '{}:{}' to '{}:{}'",
                    conn.from.node_id, conn.from.port_id, conn.to.node_id, conn.to.port_id
                ),
            ));
        }
    }
}

fn directed_key<'a>(a: &'a PortRef, b: &'a PortRef) -> (&'a str, &'a str, &'a str, &'a str) {
    (
        a.node_id.as_str(),
        a.port_id.as_str(),
        b.node_id.as_str(),
        b.port_id.as_str(),
    )
}

fn undirected_key<'a>(a: &'a PortRef, b: &'a PortRef) -> (&'a str, &'a str, &'a str, &'a str) {
    order_pair(
        (a.node_id.as_str(), a.port_id.as_str()),
        (b.node_id.as_str(), b.port_id.as_str()),
    )
}

fn order_pair<'a>(
    a: (&'a str, &'a str),
    b: (&'a str, &'a str),
) -> (&'a str, &'a str, &'a str, &'a str) {
    let (x, y) = if b < a { (b, a) } else { (a, b) };
    (x.0, x.1, y.0, y.1)
}

// -----------------------------------------------------------------------------
// Isolation
// -----------------------------------------------------------------------------

fn check_isolated_nodes(
    workflow: &Workflow,
    graph: &WorkflowGraph,
    issues: &mut Vec<ValidationIssue>,
) {
    for node in &workflow.nodes {
        if !graph.has_connections(&node.id) {
            issues.push(ValidationIssue::node(
                RuleCode::IsolatedModule,
                &node.id,
                format!("Module '{}' is not connected to anything", node.label),
            ));
        }
    }
}

// -----------------------------------------------------------------------------
// I2C pull-up inference
// -----------------------------------------------------------------------------

fn check_i2c_pullup(
    workflow: &Workflow,
    catalog: &[ModuleDefinition],
    issues: &mut Vec<ValidationIssue>,
) {
    let i2c_in_use = workflow.connections.iter().any(|conn| {
        [&conn.from, &conn.to].into_iter().any(|port_ref| {
            resolve_endpoint(workflow, catalog, port_ref).is_ok_and(|endpoint| {
                endpoint.port.kind == PortKind::Bus
                    && endpoint
                        .port
                        .bus_type
                        .as_deref()
                        .is_some_and(|bus| bus.eq_ignore_ascii_case(I2C_BUS_TYPE))
            })
        })
    });
    if !i2c_in_use {
        return;
    }

    let has_pullup = workflow
        .nodes
        .iter()
        .any(|node| node.module_id == I2C_PULLUP_MODULE_ID);
    if !has_pullup {
        issues.push(ValidationIssue::workflow(
            RuleCode::I2cPullupMissing,
            "I2C bus in use but no pull-up pack present; SDA/SCL need pull-up resistors",
        ));
    }
}

// -----------------------------------------------------------------------------
// Power domains
// -----------------------------------------------------------------------------

/// One end of a power wire that pins its domain to a fixed rail voltage.
struct Rail<'a> {
    node_index: usize,
    node_id: &'a str,
    label: &'a str,
    port_id: &'a str,
    volts: f64,
}

fn check_power_domains(
    workflow: &Workflow,
    catalog: &[ModuleDefinition],
    graph: &WorkflowGraph,
    issues: &mut Vec<ValidationIssue>,
) {
    // Regulators exist to join different voltage domains, so wires through
    // them must not merge the domains on either side.
    let regulators: HashSet<&str> = workflow
        .nodes
        .iter()
        .filter(|node| get_module_by_id(catalog, &node.module_id).is_some_and(is_regulator))
        .map(|node| node.id.as_str())
        .collect();

    // Conflicts between directly wired port pairs are the voltage rule's
    // territory; the domain rule only reports indirect ones.
    let mut direct_pairs: HashSet<(&str, &str, &str, &str)> = HashSet::new();
    for conn in &workflow.connections {
        direct_pairs.insert(undirected_key(&conn.from, &conn.to));
    }

    // Union power wires into domains, skipping edges that touch a regulator,
    // and record every fixed rail voltage seen along the way. Edge iteration
    // follows insertion order, which is connection order, so the report stays
    // deterministic.
    let mut domains = UnionFind::<usize>::new(graph.graph.node_count());
    let mut rails: Vec<Rail> = Vec::new();
    let mut staked: HashSet<(usize, &str)> = HashSet::new();

    for edge in graph.graph.edge_references() {
        let label = edge.weight();
        let from_id = graph.graph[edge.source()].as_str();
        let to_id = graph.graph[edge.target()].as_str();
        let (Some(from_end), Some(to_end)) = (
            power_port(workflow, catalog, from_id, &label.from_port),
            power_port(workflow, catalog, to_id, &label.to_port),
        ) else {
            continue;
        };

        if !regulators.contains(from_id) && !regulators.contains(to_id) {
            domains.union(edge.source().index(), edge.target().index());
        }

        let ends = [
            (edge.source().index(), from_end),
            (edge.target().index(), to_end),
        ];
        for (index, (node, port)) in ends {
            if regulators.contains(node.id.as_str()) {
                continue;
            }
            let Some(volts) = port
                .voltage
                .as_deref()
                .and_then(voltage::parse_voltage)
                .and_then(|range| range.fixed())
            else {
                continue;
            };
            if staked.insert((index, port.id.as_str())) {
                rails.push(Rail {
                    node_index: index,
                    node_id: node.id.as_str(),
                    label: node.label.as_str(),
                    port_id: port.id.as_str(),
                    volts,
                });
            }
        }
    }

    // One warning per domain, on the first conflicting pair found.
    let mut reported_domains: HashSet<usize> = HashSet::new();
    for (i, a) in rails.iter().enumerate() {
        let root = domains.find(a.node_index);
        if reported_domains.contains(&root) {
            continue;
        }
        for b in &rails[i + 1..] {
            if domains.find(b.node_index) != root || a.node_id == b.node_id {
                continue;
            }
            if voltage::rails_compatible(a.volts, b.volts) {
                continue;
            }
            let pair = order_pair((a.node_id, a.port_id), (b.node_id, b.port_id));
            if direct_pairs.contains(&pair) {
                continue;
            }
            issues.push(ValidationIssue::node(
                RuleCode::PowerDomainMismatch,
                a.node_id,
                format!(
                    "Modules '{}' and '{}' share a power domain but declare {}V and {}V",
                    a.label, b.label, a.volts, b.volts
                ),
            ));
            reported_domains.insert(root);
            break;
        }
    }
}

/// Resolve one wire end down to a power-kind catalog port, or `None` if it
/// dangles or is not power.
fn power_port<'a>(
    workflow: &'a Workflow,
    catalog: &'a [ModuleDefinition],
    node_id: &str,
    port_id: &str,
) -> Option<(&'a WorkflowNode, &'a ModulePortDefinition)> {
    let node = workflow.node(node_id)?;
    let module = get_module_by_id(catalog, &node.module_id)?;
    let port = module.port(port_id)?;
    (port.kind == PortKind::Power).then_some((node, port))
}

/// A module that legitimately bridges voltage domains: category `power` with
/// power ports pinned at different fixed voltages, e.g. a 5V-in 3.3V-out LDO.
fn is_regulator(module: &ModuleDefinition) -> bool {
    if module.category != ModuleCategory::Power {
        return false;
    }
    let pinned: Vec<f64> = module
        .ports
        .iter()
        .filter(|port| port.kind == PortKind::Power)
        .filter_map(|port| port.voltage.as_deref().and_then(voltage::parse_voltage))
        .filter_map(|range| range.fixed())
        .collect();
    pinned.iter().any(|&v| (v - pinned[0]).abs() > f64::EPSILON)
}
