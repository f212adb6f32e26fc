//! Parse phase: front-end JSON → typed workflow and catalog shapes.

pub mod graph;
pub mod types;

pub use graph::WorkflowGraph;
pub use types::*;

use crate::catalog::ModuleDefinition;
use crate::error::ParseError;

/// Deserialize a workflow JSON string into a `Workflow` struct.
pub fn parse_workflow(json: &str) -> Result<Workflow, ParseError> {
    serde_json::from_str(json).map_err(ParseError::Workflow)
}

/// Deserialize a module catalog JSON string (an array of module definitions).
pub fn parse_catalog(json: &str) -> Result<Vec<ModuleDefinition>, ParseError> {
    serde_json::from_str(json).map_err(ParseError::Catalog)
}

/// Deserialize a single connection JSON object, as sent while the user is
/// still dragging a pending wire.
pub fn parse_connection(json: &str) -> Result<WorkflowConnection, ParseError> {
    serde_json::from_str(json).map_err(ParseError::Connection)
}
