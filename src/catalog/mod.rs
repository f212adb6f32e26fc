//! Module catalog: the typed hardware blocks a workflow can instantiate.
//!
//! These types are the serde target for the editor catalog JSON.
//! SYNC NOTE: Keep this file aligned with `src/domain/moduleCatalog.ts` in
//! the editor. When port kinds or module categories change, also review the
//! validate rules and the palette renderer.

pub mod builtin;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

pub use builtin::builtin_catalog;

// =============================================================================
// PORT ATTRIBUTES
// =============================================================================

/// Electrical class of a port. Cross-kind wiring is what most of the
/// per-connection rules are about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortKind {
    Power,
    Bus,
    Io,
    Rf,
    Net,
    Debug,
}

impl std::fmt::Display for PortKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortKind::Power => write!(f, "power"),
            PortKind::Bus => write!(f, "bus"),
            PortKind::Io => write!(f, "io"),
            PortKind::Rf => write!(f, "rf"),
            PortKind::Net => write!(f, "net"),
            PortKind::Debug => write!(f, "debug"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    In,
    Out,
    Bidirectional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleCategory {
    Mcu,
    Power,
    Sensor,
    Actuator,
    Comm,
    Glue,
    Other,
}

// =============================================================================
// MODULE DEFINITIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModulePortDefinition {
    pub id: String,
    pub name: String,
    pub kind: PortKind,
    pub direction: PortDirection,
    /// Free-form declared voltage, e.g. `"5V"` or `"2.0V - 3.6V"`. Kept as a
    /// string because vendors write these however they like; the voltage
    /// rules parse what they can and fall back to exact comparison.
    pub voltage: Option<String>,
    /// Maximum current in amps. Informational for now.
    pub max_current: Option<f64>,
    /// Bus protocol, e.g. `"i2c"`, `"spi"`, `"uart"`. Compared
    /// case-insensitively.
    pub bus_type: Option<String>,
    /// Logic level in volts for signal ports.
    pub level_v: Option<f64>,
    /// Multi-drop ports (I2C and friends) legitimately fan out to several
    /// peers without buffering.
    #[serde(default)]
    pub multi_drop: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDefinition {
    pub id: String,
    pub name: String,
    pub category: ModuleCategory,
    pub ports: Vec<ModulePortDefinition>,
}

impl ModuleDefinition {
    pub fn port(&self, port_id: &str) -> Option<&ModulePortDefinition> {
        self.ports.iter().find(|p| p.id == port_id)
    }
}

// =============================================================================
// LOOKUP AND INTEGRITY
// =============================================================================

/// Look up a module definition by id. Linear scan; catalogs are tens of
/// entries, not thousands.
pub fn get_module_by_id<'a>(
    catalog: &'a [ModuleDefinition],
    module_id: &str,
) -> Option<&'a ModuleDefinition> {
    catalog.iter().find(|m| m.id == module_id)
}

/// Fail-fast integrity check for a catalog. Runs once at load time; a failure
/// here is a defect in catalog data, never a user-facing workflow condition.
pub fn check_catalog(catalog: &[ModuleDefinition]) -> Result<(), CatalogError> {
    let mut module_ids = HashSet::new();
    for module in catalog {
        if !module_ids.insert(module.id.as_str()) {
            return Err(CatalogError::DuplicateModuleId(module.id.clone()));
        }
        if module.ports.is_empty() {
            return Err(CatalogError::NoPorts(module.id.clone()));
        }
        let mut port_ids = HashSet::new();
        for port in &module.ports {
            if !port_ids.insert(port.id.as_str()) {
                return Err(CatalogError::DuplicatePortId {
                    module: module.id.clone(),
                    port: port.id.clone(),
                });
            }
        }
    }
    Ok(())
}
