use crate::report::report_model::{ApplyReport, OutcomeStatus, StabilityReport};

// ============================================================================
// Console summaries — one line per run, details only for failures
// ============================================================================

/// Format the apply-run summary for terminal output.
///
/// Produces output like:
/// ```text
/// === Apply: 3 applied, 1 skipped, 1 failed (5 total, 2 saved) ===
///     [FAIL] fax.header (modal_fax) — no-unique-selector
/// ```
pub fn format_apply_summary(report: &ApplyReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Apply: {} applied, {} skipped, {} failed ({} total, {} saved) ===\n",
        report.counts.applied,
        report.counts.skipped,
        report.counts.failed,
        report.counts.total,
        report.counts.saved_containers
    ));

    for outcome in &report.outcomes {
        if outcome.status == OutcomeStatus::Failed {
            out.push_str(&format!(
                "    [FAIL] {} ({}) — {}\n",
                outcome.setting_key, outcome.container_key, outcome.detail
            ));
        }
    }

    out
}

/// Format the stability-check verdict for terminal output.
pub fn format_drift_summary(report: &StabilityReport) -> String {
    if !report.drift_detected {
        return "Stability check passed.\n".to_string();
    }

    let diff = &report.diff;
    let mut parts = Vec::new();
    let counts = [
        (diff.containers.added.len() + diff.containers.removed.len(), "container changes"),
        (diff.settings.added.len() + diff.settings.removed.len(), "setting changes"),
        (diff.settings.label_or_type_changed.len(), "label/type changes"),
        (diff.field_id_drift.len(), "field-id drifts"),
        (
            diff.dropdowns_missing_options_a.len() + diff.dropdowns_missing_options_b.len(),
            "empty dropdowns",
        ),
        (diff.radio_ordering_changed.len(), "radio reorderings"),
    ];
    for (count, what) in counts {
        if count > 0 {
            parts.push(format!("{} {}", count, what));
        }
    }

    let verdict = if report.allow_drift {
        "Drift detected (allowed)"
    } else {
        "Stability check failed"
    };
    format!("{}: {}.\n", verdict, parts.join(", "))
}
