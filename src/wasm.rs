//! WASM entry points for browser use.
//!
//! Parse failures at this boundary never throw into JS; they come back as a
//! single error-severity issue so the canvas renders them like any other
//! finding.

use wasm_bindgen::prelude::*;

use crate::error::ParseError;
use crate::issue::{Severity, ValidationIssue};

const WORKFLOW_PARSE_FAILED: &str = "workflow-parse-failed";
const CATALOG_PARSE_FAILED: &str = "catalog-parse-failed";
const CONNECTION_PARSE_FAILED: &str = "connection-parse-failed";

/// Validate a workflow JSON against a catalog JSON.
/// Returns a JSON array of ValidationIssue objects, sorted by severity.
#[wasm_bindgen]
pub fn validate_workflow(workflow_json: &str, catalog_json: &str) -> JsValue {
    let result = validate_workflow_inner(workflow_json, catalog_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_workflow_inner(workflow_json: &str, catalog_json: &str) -> Vec<ValidationIssue> {
    let workflow = match crate::parse::parse_workflow(workflow_json) {
        Ok(w) => w,
        Err(e) => return vec![parse_failure(WORKFLOW_PARSE_FAILED, e)],
    };

    let catalog = match crate::parse::parse_catalog(catalog_json) {
        Ok(c) => c,
        Err(e) => return vec![parse_failure(CATALOG_PARSE_FAILED, e)],
    };

    crate::validate::validate_workflow(&workflow, &catalog)
}

/// Check a single connection JSON against a workflow and catalog JSON, as
/// the editor does while the user drags a pending wire.
/// Returns a JSON array of ValidationIssue objects.
#[wasm_bindgen]
pub fn check_connection(workflow_json: &str, catalog_json: &str, connection_json: &str) -> JsValue {
    let result = check_connection_inner(workflow_json, catalog_json, connection_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn check_connection_inner(
    workflow_json: &str,
    catalog_json: &str,
    connection_json: &str,
) -> Vec<ValidationIssue> {
    let workflow = match crate::parse::parse_workflow(workflow_json) {
        Ok(w) => w,
        Err(e) => return vec![parse_failure(WORKFLOW_PARSE_FAILED, e)],
    };

    let catalog = match crate::parse::parse_catalog(catalog_json) {
        Ok(c) => c,
        Err(e) => return vec![parse_failure(CATALOG_PARSE_FAILED, e)],
    };

    let connection = match crate::parse::parse_connection(connection_json) {
        Ok(c) => c,
        Err(e) => return vec![parse_failure(CONNECTION_PARSE_FAILED, e)],
    };

    crate::validate::check_connection(&workflow, &catalog, &connection)
}

/// The catalog embedded in this build, for front-ends that do not ship their
/// own. Returns a JSON array of ModuleDefinition objects.
#[wasm_bindgen]
pub fn default_catalog() -> JsValue {
    let catalog = crate::catalog::builtin_catalog();
    serde_wasm_bindgen::to_value(&catalog).unwrap_or(JsValue::NULL)
}

fn parse_failure(id: &str, err: ParseError) -> ValidationIssue {
    ValidationIssue {
        id: id.to_string(),
        severity: Severity::Error,
        message: err.to_string(),
        connection_id: None,
        node_id: None,
    }
}
