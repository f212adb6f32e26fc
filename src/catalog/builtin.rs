//! Built-in module catalog embedded at compile time.
//!
//! The front-end normally passes its own catalog JSON across the wasm
//! boundary, but the crate ships a default so the validator works standalone
//! and so tests have a realistic catalog to exercise.

use super::{ModuleDefinition, check_catalog};
use crate::parse::parse_catalog;

const BUILTIN_CATALOG_JSON: &str = include_str!("../../data/module_catalog.json");

/// Parse and integrity-check the embedded catalog.
///
/// Panics only if the embedded asset itself is broken, which is a defect in
/// this crate, not a runtime condition.
pub fn builtin_catalog() -> Vec<ModuleDefinition> {
    let catalog =
        parse_catalog(BUILTIN_CATALOG_JSON).expect("embedded module catalog must be valid JSON");
    check_catalog(&catalog).expect("embedded module catalog must pass integrity checks");
    catalog
}
