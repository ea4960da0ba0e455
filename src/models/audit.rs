//! Audit trail models.
//!
//! Every categorization decision is recorded as an [`AuditStep`] so that a
//! payroll clerk can see why a session landed in a given bucket. Run-level
//! anomalies that do not stop a reconciliation are recorded as
//! [`AuditWarning`]s.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a categorization decision.
///
/// # Example
///
/// ```
/// use attendance_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "weekday_hours".to_string(),
///     rule_name: "Weekday Hours".to_string(),
///     input: serde_json::json!({"total_hours": "11.5", "standard_hours": "9"}),
///     output: serde_json::json!({"normal_hours": "9", "overtime_hours": "2.5"}),
///     reasoning: "11.5 hours worked exceeds 9 hour standard shift".to_string(),
/// };
/// assert_eq!(step.rule_id, "weekday_hours");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during reconciliation.
///
/// Warnings flag data that was processed but may need a human look, such as
/// dropped input rows or days with more than two punches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of categorization steps, one per session.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during the run.
    pub warnings: Vec<AuditWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 3,
            rule_id: "weekend_hours".to_string(),
            rule_name: "Weekend Hours".to_string(),
            input: serde_json::json!({"total_hours": "6.25"}),
            output: serde_json::json!({"overtime_hours": "6"}),
            reasoning: "weekend".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":3"));
        assert!(json.contains("\"rule_id\":\"weekend_hours\""));

        let deserialized: AuditStep = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, step);
    }

    #[test]
    fn test_audit_warning_new() {
        let warning = AuditWarning::new("DROPPED_ROWS", "2 rows dropped", "low");
        assert_eq!(warning.code, "DROPPED_ROWS");
        assert_eq!(warning.severity, "low");
    }

    #[test]
    fn test_audit_trace_default_is_empty() {
        let trace = AuditTrace::default();
        assert!(trace.steps.is_empty());
        assert!(trace.warnings.is_empty());
    }
}
