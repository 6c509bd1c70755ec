use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::drift::drift_model::DriftDiff;

/// UTC timestamp, second precision, `Z` suffix.
pub fn utc_now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ============================================================================
// Apply report — one run of the setting application engine
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Applied,
    Skipped,
    Failed,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Applied => "applied",
            OutcomeStatus::Skipped => "skipped",
            OutcomeStatus::Failed => "failed",
        }
    }
}

/// Per-setting result of one application attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    #[serde(rename = "settingKey")]
    pub setting_key: String,
    #[serde(rename = "containerKey")]
    pub container_key: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub setting_type: Option<String>,
    pub desired: Value,
    pub status: OutcomeStatus,
    /// Reason code on failure, selector provenance on success.
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyCounts {
    pub total: usize,
    pub applied: usize,
    pub skipped: usize,
    pub failed: usize,
    #[serde(rename = "savedContainers")]
    pub saved_containers: usize,
}

/// Aggregated report for one apply run. Built once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyReport {
    #[serde(rename = "generatedAt")]
    pub generated_at: String,
    #[serde(rename = "schemaPath")]
    pub schema_path: String,
    #[serde(rename = "valuesPath")]
    pub values_path: String,
    #[serde(rename = "schemaFingerprint", skip_serializing_if = "Option::is_none")]
    pub schema_fingerprint: Option<String>,
    pub counts: ApplyCounts,
    #[serde(rename = "savedContainers")]
    pub saved_containers: Vec<String>,
    pub outcomes: Vec<Outcome>,
}

impl ApplyReport {
    /// Build a report from accumulated outcomes, computing the counts.
    pub fn from_outcomes(
        schema_path: &str,
        values_path: &str,
        schema_fingerprint: Option<String>,
        outcomes: Vec<Outcome>,
        saved_containers: Vec<String>,
    ) -> Self {
        let applied = outcomes
            .iter()
            .filter(|o| o.status == OutcomeStatus::Applied)
            .count();
        let skipped = outcomes
            .iter()
            .filter(|o| o.status == OutcomeStatus::Skipped)
            .count();
        let failed = outcomes
            .iter()
            .filter(|o| o.status == OutcomeStatus::Failed)
            .count();
        Self {
            generated_at: utc_now_iso(),
            schema_path: schema_path.to_string(),
            values_path: values_path.to_string(),
            schema_fingerprint,
            counts: ApplyCounts {
                total: outcomes.len(),
                applied,
                skipped,
                failed,
                saved_containers: saved_containers.len(),
            },
            saved_containers,
            outcomes,
        }
    }

    /// Whether every outcome succeeded (exit-status signal).
    pub fn all_ok(&self) -> bool {
        self.counts.failed == 0
    }
}

// ============================================================================
// Stability report — one schema drift comparison
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StabilityReport {
    #[serde(rename = "generatedAt")]
    pub generated_at: String,
    #[serde(rename = "schemaA")]
    pub schema_a: String,
    #[serde(rename = "schemaB")]
    pub schema_b: String,
    #[serde(rename = "schemaAFingerprint", skip_serializing_if = "Option::is_none")]
    pub schema_a_fingerprint: Option<String>,
    #[serde(rename = "schemaBFingerprint", skip_serializing_if = "Option::is_none")]
    pub schema_b_fingerprint: Option<String>,
    /// Drift was explicitly allowed for this run; it is still recorded.
    #[serde(rename = "allowDrift")]
    pub allow_drift: bool,
    #[serde(rename = "driftDetected")]
    pub drift_detected: bool,
    pub diff: DriftDiff,
}
