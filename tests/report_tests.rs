use serde_json::json;

use ui_settings::{
    drift::drift_model::DriftDiff,
    report::console::{format_apply_summary, format_drift_summary},
    report::report_model::{
        ApplyReport, Outcome, OutcomeStatus, StabilityReport, utc_now_iso,
    },
};

// =========================================================================
// Helpers
// =========================================================================

fn outcome(key: &str, status: OutcomeStatus, detail: &str) -> Outcome {
    Outcome {
        setting_key: key.to_string(),
        container_key: "c1".to_string(),
        setting_type: Some("checkbox".to_string()),
        desired: json!(true),
        status,
        detail: detail.to_string(),
    }
}

fn stability_report(diff: DriftDiff, allow_drift: bool) -> StabilityReport {
    let drift_detected = diff.has_drift();
    StabilityReport {
        generated_at: utc_now_iso(),
        schema_a: "a.json".to_string(),
        schema_b: "b.json".to_string(),
        schema_a_fingerprint: None,
        schema_b_fingerprint: None,
        allow_drift,
        drift_detected,
        diff,
    }
}

// =========================================================================
// Apply report aggregation
// =========================================================================

#[test]
fn counts_are_computed_from_outcomes() {
    let report = ApplyReport::from_outcomes(
        "schema.json",
        "values.json",
        Some("abc123".to_string()),
        vec![
            outcome("a", OutcomeStatus::Applied, "primary"),
            outcome("b", OutcomeStatus::Skipped, "primary"),
            outcome("c", OutcomeStatus::Applied, "fallback[0]"),
            outcome("d", OutcomeStatus::Failed, "no-unique-selector"),
        ],
        vec!["c1".to_string()],
    );

    assert_eq!(report.counts.total, 4);
    assert_eq!(report.counts.applied, 2);
    assert_eq!(report.counts.skipped, 1);
    assert_eq!(report.counts.failed, 1);
    assert_eq!(report.counts.saved_containers, 1);
    assert!(!report.all_ok());
}

#[test]
fn all_ok_requires_zero_failures() {
    let report = ApplyReport::from_outcomes(
        "schema.json",
        "values.json",
        None,
        vec![outcome("a", OutcomeStatus::Skipped, "primary")],
        vec![],
    );
    assert!(report.all_ok());
}

#[test]
fn apply_report_serializes_with_camel_case_keys() {
    let report = ApplyReport::from_outcomes(
        "schema.json",
        "values.json",
        Some("abc123".to_string()),
        vec![outcome("a", OutcomeStatus::Applied, "primary")],
        vec!["c1".to_string()],
    );

    let value = serde_json::to_value(&report).unwrap();
    assert!(value.get("generatedAt").is_some());
    assert_eq!(value["schemaPath"], "schema.json");
    assert_eq!(value["valuesPath"], "values.json");
    assert_eq!(value["schemaFingerprint"], "abc123");
    assert_eq!(value["counts"]["savedContainers"], 1);
    assert_eq!(value["savedContainers"], json!(["c1"]));
    assert_eq!(value["outcomes"][0]["settingKey"], "a");
    assert_eq!(value["outcomes"][0]["containerKey"], "c1");
    assert_eq!(value["outcomes"][0]["type"], "checkbox");
    assert_eq!(value["outcomes"][0]["status"], "applied");
}

#[test]
fn absent_optional_fields_are_omitted_from_json() {
    let mut bare = outcome("a", OutcomeStatus::Applied, "primary");
    bare.setting_type = None;
    let report = ApplyReport::from_outcomes("s.json", "v.json", None, vec![bare], vec![]);

    let value = serde_json::to_value(&report).unwrap();
    assert!(value.get("schemaFingerprint").is_none());
    assert!(value["outcomes"][0].get("type").is_none());
}

#[test]
fn stability_report_serializes_with_camel_case_keys() {
    let report = stability_report(DriftDiff::default(), false);
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["schemaA"], "a.json");
    assert_eq!(value["schemaB"], "b.json");
    assert_eq!(value["allowDrift"], false);
    assert_eq!(value["driftDetected"], false);
    assert!(value["diff"].get("fieldIdDrift").is_some());
    assert!(value["diff"].get("dropdownsMissingOptionsA").is_some());
    assert!(value["diff"].get("radioOrderingChangedWithoutLabelChange").is_some());
}

// =========================================================================
// Console summaries
// =========================================================================

#[test]
fn apply_summary_lists_only_failures() {
    let report = ApplyReport::from_outcomes(
        "s.json",
        "v.json",
        None,
        vec![
            outcome("good.key", OutcomeStatus::Applied, "primary"),
            outcome("bad.key", OutcomeStatus::Failed, "no-unique-selector"),
        ],
        vec![],
    );

    let summary = format_apply_summary(&report);
    assert!(summary.contains("=== Apply: 1 applied, 0 skipped, 1 failed (2 total, 0 saved) ==="));
    assert!(summary.contains("[FAIL] bad.key (c1)"));
    assert!(summary.contains("no-unique-selector"));
    assert!(!summary.contains("good.key"));
}

#[test]
fn drift_summary_reports_pass_fail_and_allowed() {
    let clean = stability_report(DriftDiff::default(), false);
    assert_eq!(format_drift_summary(&clean), "Stability check passed.\n");

    let mut diff = DriftDiff::default();
    diff.settings.added.push("new.key".to_string());
    let failing = stability_report(diff.clone(), false);
    assert!(format_drift_summary(&failing).starts_with("Stability check failed"));
    assert!(format_drift_summary(&failing).contains("1 setting changes"));

    let allowed = stability_report(diff, true);
    assert!(format_drift_summary(&allowed).starts_with("Drift detected (allowed)"));
}

// =========================================================================
// Timestamps
// =========================================================================

#[test]
fn generated_timestamp_is_utc_iso8601() {
    let timestamp = utc_now_iso();
    assert!(timestamp.ends_with('Z'));
    assert!(timestamp.contains('T'));
}
