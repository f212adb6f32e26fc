//! Rust types mirroring the front-end workflow model.
//!
//! These types are the serde target for the editor workflow JSON.
//! SYNC NOTE: Keep this file aligned with `src/domain/workflow.ts` in the
//! editor. When node or connection shapes change, also review the validate
//! rules and the canvas edge renderer.

use serde::{Deserialize, Serialize};

// =============================================================================
// TOP-LEVEL WORKFLOW
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub nodes: Vec<WorkflowNode>,
    pub connections: Vec<WorkflowConnection>,
}

impl Workflow {
    pub fn node(&self, node_id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }
}

// =============================================================================
// NODES AND CONNECTIONS
// =============================================================================

/// A placed instance of a catalog module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowNode {
    pub id: String,
    /// Which catalog module this node instantiates. May dangle; validation
    /// reports that rather than refusing to parse.
    pub module_id: String,
    pub label: String,
}

/// A directed port-to-port wire drawn on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowConnection {
    pub id: String,
    pub from: PortRef,
    pub to: PortRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortRef {
    pub node_id: String,
    pub port_id: String,
}
