use validator::catalog::{
    ModuleCategory, ModuleDefinition, ModulePortDefinition, PortDirection, PortKind,
    builtin_catalog,
};
use validator::parse::types::{PortRef, Workflow, WorkflowConnection, WorkflowNode};

// =============================================================================
// Workflow builders
// =============================================================================

/// The catalog most scenarios validate against.
pub fn catalog() -> Vec<ModuleDefinition> {
    builtin_catalog()
}

pub fn node(id: &str, module_id: &str) -> WorkflowNode {
    WorkflowNode {
        id: id.into(),
        module_id: module_id.into(),
        label: id.into(),
    }
}

pub fn conn(
    id: &str,
    from_node: &str,
    from_port: &str,
    to_node: &str,
    to_port: &str,
) -> WorkflowConnection {
    WorkflowConnection {
        id: id.into(),
        from: PortRef {
            node_id: from_node.into(),
            port_id: from_port.into(),
        },
        to: PortRef {
            node_id: to_node.into(),
            port_id: to_port.into(),
        },
    }
}

pub fn workflow(nodes: Vec<WorkflowNode>, connections: Vec<WorkflowConnection>) -> Workflow {
    Workflow { nodes, connections }
}

// =============================================================================
// Catalog builders for cases the builtin catalog does not cover
// =============================================================================

pub fn module(id: &str, category: ModuleCategory, ports: Vec<ModulePortDefinition>) -> ModuleDefinition {
    ModuleDefinition {
        id: id.into(),
        name: id.into(),
        category,
        ports,
    }
}

pub fn port(id: &str, kind: PortKind, direction: PortDirection) -> ModulePortDefinition {
    ModulePortDefinition {
        id: id.into(),
        name: id.to_uppercase(),
        kind,
        direction,
        voltage: None,
        max_current: None,
        bus_type: None,
        level_v: None,
        multi_drop: false,
    }
}

pub fn power_port(id: &str, direction: PortDirection, voltage: &str) -> ModulePortDefinition {
    let mut p = port(id, PortKind::Power, direction);
    p.voltage = Some(voltage.into());
    p
}

pub fn bus_port(id: &str, bus_type: &str, level_v: f64) -> ModulePortDefinition {
    let mut p = port(id, PortKind::Bus, PortDirection::Bidirectional);
    p.bus_type = Some(bus_type.into());
    p.level_v = Some(level_v);
    p
}

pub fn io_port(id: &str, direction: PortDirection, level_v: f64) -> ModulePortDefinition {
    let mut p = port(id, PortKind::Io, direction);
    p.level_v = Some(level_v);
    p
}
