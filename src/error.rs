//! Boundary error types: JSON parse failures and catalog integrity defects.
//!
//! Validation findings are not errors in this sense; they are [`ValidationIssue`]
//! values returned to the editor. The types here cover the two places the crate
//! can refuse to proceed at all: malformed input JSON and a broken catalog.
//!
//! [`ValidationIssue`]: crate::issue::ValidationIssue

use thiserror::Error;

/// Failure to deserialize one of the front-end JSON documents.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse workflow JSON: {0}")]
    Workflow(#[source] serde_json::Error),
    #[error("failed to parse module catalog JSON: {0}")]
    Catalog(#[source] serde_json::Error),
    #[error("failed to parse connection JSON: {0}")]
    Connection(#[source] serde_json::Error),
}

/// Integrity defect in a module catalog. Catalogs are configuration shipped
/// with the product, so these fail fast at load instead of becoming issues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate module id '{0}' in catalog")]
    DuplicateModuleId(String),
    #[error("module '{0}' declares no ports")]
    NoPorts(String),
    #[error("module '{module}' declares duplicate port id '{port}'")]
    DuplicatePortId { module: String, port: String },
}
