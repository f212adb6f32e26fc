//! petgraph-based directed graph wrapper for the module workflow.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};

use super::types::Workflow;

/// Edge weight carrying the connection identity, so graph walks can get back
/// to ports and issue ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionLabel {
    pub connection_id: String,
    pub from_port: String,
    pub to_port: String,
}

pub struct WorkflowGraph {
    pub graph: DiGraph<String, ConnectionLabel>,
    pub node_indices: HashMap<String, NodeIndex>,
    /// Node ids named at either end of any connection, including connections
    /// whose other end dangles.
    referenced: HashSet<String>,
}

impl WorkflowGraph {
    /// Build the adjacency structure. Construction never fails: a connection
    /// whose endpoint node is unknown simply gets no edge, and the connection
    /// checks report it as a dangling reference.
    pub fn build(workflow: &Workflow) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        for node in &workflow.nodes {
            let idx = graph.add_node(node.id.clone());
            node_indices.insert(node.id.clone(), idx);
        }

        let mut referenced = HashSet::new();
        for conn in &workflow.connections {
            referenced.insert(conn.from.node_id.clone());
            referenced.insert(conn.to.node_id.clone());

            let source_idx = node_indices.get(&conn.from.node_id);
            let target_idx = node_indices.get(&conn.to.node_id);
            if let (Some(&s), Some(&t)) = (source_idx, target_idx) {
                graph.add_edge(
                    s,
                    t,
                    ConnectionLabel {
                        connection_id: conn.id.clone(),
                        from_port: conn.from.port_id.clone(),
                        to_port: conn.to.port_id.clone(),
                    },
                );
            }
        }

        WorkflowGraph {
            graph,
            node_indices,
            referenced,
        }
    }

    /// Whether any connection names this node at either end. Dangling
    /// connections count: a node wired to a since-deleted peer is not
    /// isolated, it has a dangling-reference problem instead.
    pub fn has_connections(&self, node_id: &str) -> bool {
        self.referenced.contains(node_id)
    }
}
