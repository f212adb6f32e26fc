pub mod catalog;
pub mod error;
pub mod issue;
pub mod parse;
pub mod validate;
pub mod wasm;

pub use catalog::{ModuleDefinition, builtin_catalog, check_catalog, get_module_by_id};
pub use issue::{RuleCode, Severity, ValidationIssue};
pub use parse::types::{PortRef, Workflow, WorkflowConnection, WorkflowNode};
pub use validate::{check_connection, validate_workflow};
