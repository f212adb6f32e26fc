//! Validation findings returned to the editor front-end.
//!
//! Issues are data, not errors: a workflow full of problems still validates
//! successfully and yields a list of these. The shapes here are the serde
//! target for the canvas UI, so field names stay camelCase on the wire.

use serde::{Deserialize, Serialize};

// =============================================================================
// SEVERITY
// =============================================================================

/// Issue severity, ordered most severe first so a plain sort on it floats
/// errors to the top of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

// =============================================================================
// RULE CODES
// =============================================================================

/// The closed set of validation rules. Every issue id starts with one of
/// these codes, and the front-end keys quick-fix actions off them, so the
/// strings are a UI contract: never rename one without a front-end change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCode {
    DanglingReference,
    DirectionConflict,
    PowerKindMismatch,
    BusKindMismatch,
    BusProtocolMismatch,
    KindMismatch,
    VoltageMismatch,
    LogicLevelMismatch,
    FanOutUnbuffered,
    DuplicateConnection,
    IsolatedModule,
    I2cPullupMissing,
    PowerDomainMismatch,
}

impl RuleCode {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleCode::DanglingReference => "dangling-reference",
            RuleCode::DirectionConflict => "direction-conflict",
            RuleCode::PowerKindMismatch => "power-kind-mismatch",
            RuleCode::BusKindMismatch => "bus-kind-mismatch",
            RuleCode::BusProtocolMismatch => "bus-protocol-mismatch",
            RuleCode::KindMismatch => "kind-mismatch",
            RuleCode::VoltageMismatch => "voltage-mismatch",
            RuleCode::LogicLevelMismatch => "logic-level-mismatch",
            RuleCode::FanOutUnbuffered => "fan-out-unbuffered",
            RuleCode::DuplicateConnection => "duplicate-connection",
            RuleCode::IsolatedModule => "isolated-module",
            RuleCode::I2cPullupMissing => "i2c-pullup-missing",
            RuleCode::PowerDomainMismatch => "power-domain-mismatch",
        }
    }

    /// Severity is fixed per rule, not chosen at the emit site.
    pub fn severity(self) -> Severity {
        match self {
            RuleCode::DanglingReference => Severity::Error,
            RuleCode::DirectionConflict => Severity::Error,
            RuleCode::PowerKindMismatch => Severity::Error,
            RuleCode::BusKindMismatch => Severity::Error,
            RuleCode::BusProtocolMismatch => Severity::Error,
            RuleCode::KindMismatch => Severity::Warning,
            RuleCode::VoltageMismatch => Severity::Warning,
            RuleCode::LogicLevelMismatch => Severity::Warning,
            RuleCode::FanOutUnbuffered => Severity::Warning,
            RuleCode::DuplicateConnection => Severity::Warning,
            RuleCode::IsolatedModule => Severity::Info,
            RuleCode::I2cPullupMissing => Severity::Warning,
            RuleCode::PowerDomainMismatch => Severity::Warning,
        }
    }
}

// =============================================================================
// VALIDATION ISSUE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Stable id the canvas uses as a render key and quick-fix handle.
    pub id: String,
    pub severity: Severity,
    pub message: String,
    pub connection_id: Option<String>,
    pub node_id: Option<String>,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.connection_id, &self.node_id) {
            (Some(id), _) => write!(
                f,
                "[{}:{}] {} (connection '{}')",
                self.severity, self.id, self.message, id
            ),
            (_, Some(id)) => write!(
                f,
                "[{}:{}] {} (node '{}')",
                self.severity, self.id, self.message, id
            ),
            _ => write!(f, "[{}:{}] {}", self.severity, self.id, self.message),
        }
    }
}

impl ValidationIssue {
    /// Issue tied to a single connection.
    pub fn connection(rule: RuleCode, connection_id: &str, message: impl Into<String>) -> Self {
        ValidationIssue {
            id: format!("{}:{}", rule.as_str(), connection_id),
            severity: rule.severity(),
            message: message.into(),
            connection_id: Some(connection_id.to_string()),
            node_id: None,
        }
    }

    /// Issue tied to a node as a whole.
    pub fn node(rule: RuleCode, node_id: &str, message: impl Into<String>) -> Self {
        ValidationIssue {
            id: format!("{}:{}", rule.as_str(), node_id),
            severity: rule.severity(),
            message: message.into(),
            connection_id: None,
            node_id: Some(node_id.to_string()),
        }
    }

    /// Issue tied to one port on a node.
    pub fn port(rule: RuleCode, node_id: &str, port_id: &str, message: impl Into<String>) -> Self {
        ValidationIssue {
            id: format!("{}:{}:{}", rule.as_str(), node_id, port_id),
            severity: rule.severity(),
            message: message.into(),
            connection_id: None,
            node_id: Some(node_id.to_string()),
        }
    }

    /// Workflow-wide issue. The id is the bare rule code, which is what lets
    /// the front-end match `i2c-pullup-missing` for its one-click fix.
    pub fn workflow(rule: RuleCode, message: impl Into<String>) -> Self {
        ValidationIssue {
            id: rule.as_str().to_string(),
            severity: rule.severity(),
            message: message.into(),
            connection_id: None,
            node_id: None,
        }
    }
}
