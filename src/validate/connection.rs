//! Per-connection compatibility checks.
//!
//! Checks run in a fixed category order: existence, direction, kind, voltage,
//! logic level. Each category reports at most one issue per connection, and
//! the categories after existence are independent of one another, so a kind
//! mismatch does not hide a voltage problem on the same wire.

use crate::catalog::{ModuleDefinition, PortDirection, PortKind};
use crate::issue::{RuleCode, ValidationIssue};
use crate::parse::types::{Workflow, WorkflowConnection};

use super::voltage;
use super::{Endpoint, resolve_endpoint};

/// Check a single connection against the catalog.
///
/// This is exactly what `validate_workflow` runs per connection; the editor
/// also calls it on its own to vet a wire the user is still dragging.
pub fn check_connection(
    workflow: &Workflow,
    catalog: &[ModuleDefinition],
    connection: &WorkflowConnection,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    // Existence gates everything else: with an unresolved endpoint the
    // remaining categories have nothing to compare.
    let from = match resolve_endpoint(workflow, catalog, &connection.from) {
        Ok(endpoint) => endpoint,
        Err(reason) => {
            issues.push(dangling(connection, reason));
            return issues;
        }
    };
    let to = match resolve_endpoint(workflow, catalog, &connection.to) {
        Ok(endpoint) => endpoint,
        Err(reason) => {
            issues.push(dangling(connection, reason));
            return issues;
        }
    };

    check_direction(&from, &to, connection, &mut issues);
    check_kind(&from, &to, connection, &mut issues);
    check_voltage(&from, &to, connection, &mut issues);
    check_logic_level(&from, &to, connection, &mut issues);

    issues
}

fn dangling(connection: &WorkflowConnection, reason: String) -> ValidationIssue {
    ValidationIssue::connection(
        RuleCode::DanglingReference,
        &connection.id,
        format!("Connection endpoint cannot be resolved: {}", reason),
    )
}

fn check_direction(
    from: &Endpoint,
    to: &Endpoint,
    connection: &WorkflowConnection,
    issues: &mut Vec<ValidationIssue>,
) {
    use PortDirection::{In, Out};

    // Bidirectional pairs with anything. An in→out wire is tolerated as a
    // backwards-drawn connection, not a conflict.
    let message = match (from.port.direction, to.port.direction) {
        (Out, Out) => format!(
            "Ports '{}' and '{}' are both output-only; two drivers must not share a line",
            from.describe(),
            to.describe()
        ),
        (In, In) => format!(
            "Ports '{}' and '{}' are both input-only; nothing drives the line",
            from.describe(),
            to.describe()
        ),
        _ => return,
    };
    issues.push(ValidationIssue::connection(
        RuleCode::DirectionConflict,
        &connection.id,
        message,
    ));
}

fn check_kind(
    from: &Endpoint,
    to: &Endpoint,
    connection: &WorkflowConnection,
    issues: &mut Vec<ValidationIssue>,
) {
    let (a, b) = (from.port.kind, to.port.kind);

    if a == b {
        if a != PortKind::Bus {
            return;
        }
        // Same kind, but bus protocols must line up too. A port with no
        // declared protocol accepts any peer.
        let (Some(from_type), Some(to_type)) = (&from.port.bus_type, &to.port.bus_type) else {
            return;
        };
        if !from_type.eq_ignore_ascii_case(to_type) {
            issues.push(ValidationIssue::connection(
                RuleCode::BusProtocolMismatch,
                &connection.id,
                format!(
                    "Bus protocol mismatch: '{}' is {} but '{}' is {}",
                    from.describe(),
                    from_type,
                    to.describe(),
                    to_type
                ),
            ));
        }
        return;
    }

    let (rule, message) = if a == PortKind::Power || b == PortKind::Power {
        (
            RuleCode::PowerKindMismatch,
            format!(
                "Power may only connect to power: '{}' is {} but '{}' is {}",
                from.describe(),
                a,
                to.describe(),
                b
            ),
        )
    } else if a == PortKind::Bus || b == PortKind::Bus {
        (
            RuleCode::BusKindMismatch,
            format!(
                "Bus ports may only connect to bus ports: '{}' is {} but '{}' is {}",
                from.describe(),
                a,
                to.describe(),
                b
            ),
        )
    } else {
        (
            RuleCode::KindMismatch,
            format!(
                "Port kinds differ: '{}' is {} but '{}' is {}; check that this wiring is intended",
                from.describe(),
                a,
                to.describe(),
                b
            ),
        )
    };
    issues.push(ValidationIssue::connection(rule, &connection.id, message));
}

fn check_voltage(
    from: &Endpoint,
    to: &Endpoint,
    connection: &WorkflowConnection,
    issues: &mut Vec<ValidationIssue>,
) {
    let power_like = |kind: PortKind| matches!(kind, PortKind::Power | PortKind::Bus);
    if !power_like(from.port.kind) || !power_like(to.port.kind) {
        return;
    }
    let (Some(from_raw), Some(to_raw)) = (&from.port.voltage, &to.port.voltage) else {
        return;
    };

    // The supplying side is the out-direction port even when the wire was
    // drawn against it; otherwise trust the drawn direction.
    let drawn_backwards =
        from.port.direction == PortDirection::In && to.port.direction == PortDirection::Out;
    let (supply, demand) = if drawn_backwards { (to, from) } else { (from, to) };
    let (supply_raw, demand_raw) = if drawn_backwards {
        (to_raw, from_raw)
    } else {
        (from_raw, to_raw)
    };

    match (
        voltage::parse_voltage(supply_raw),
        voltage::parse_voltage(demand_raw),
    ) {
        (Some(supplied), Some(required)) => {
            if !voltage::supply_satisfies(&supplied, &required) {
                issues.push(ValidationIssue::connection(
                    RuleCode::VoltageMismatch,
                    &connection.id,
                    format!(
                        "Voltage mismatch: '{}' supplies {} but '{}' expects {}",
                        supply.describe(),
                        supply_raw,
                        demand.describe(),
                        demand_raw
                    ),
                ));
            }
        }
        // At least one side is not machine-readable; compare the declared
        // strings verbatim instead of guessing.
        _ => {
            if supply_raw.trim() != demand_raw.trim() {
                issues.push(ValidationIssue::connection(
                    RuleCode::VoltageMismatch,
                    &connection.id,
                    format!(
                        "Declared voltages differ: '{}' declares '{}' but '{}' declares '{}'",
                        supply.describe(),
                        supply_raw,
                        demand.describe(),
                        demand_raw
                    ),
                ));
            }
        }
    }
}

fn check_logic_level(
    from: &Endpoint,
    to: &Endpoint,
    connection: &WorkflowConnection,
    issues: &mut Vec<ValidationIssue>,
) {
    let signal_like =
        |kind: PortKind| matches!(kind, PortKind::Io | PortKind::Bus | PortKind::Debug);
    if !signal_like(from.port.kind) || !signal_like(to.port.kind) {
        return;
    }
    let (Some(from_level), Some(to_level)) = (from.port.level_v, to.port.level_v) else {
        return;
    };
    if (from_level - to_level).abs() > f64::EPSILON {
        issues.push(ValidationIssue::connection(
            RuleCode::LogicLevelMismatch,
            &connection.id,
            format!(
                "Logic level mismatch: '{}' is {}V but '{}' is {}V; a level shifter may be required",
                from.describe(),
                from_level,
                to.describe(),
                to_level
            ),
        ));
    }
}
