use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::apply::container::{close_modal, open_container, save_if_needed};
use crate::apply::strategy::apply_setting;
use crate::browser::driver::UiDriver;
use crate::report::report_model::{Outcome, OutcomeStatus};
use crate::schema::schema_model::{Container, Schema, Setting};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::{TraceEvent, now_ms};

// ============================================================================
// Setting application engine — top-level orchestration
// ============================================================================

/// Apply a desired-values map onto a schema through the driver.
///
/// Desired keys with no matching setting are silently dropped: values files
/// routinely carry entries for settings a given device does not expose.
/// Every other failure becomes a `failed` outcome; the run always completes.
///
/// Returns the accumulated outcomes and the keys of containers whose save
/// action was actually triggered.
pub fn apply_values(
    driver: &mut dyn UiDriver,
    schema: &Schema,
    values: &Map<String, Value>,
    tracer: &TraceLogger,
) -> (Vec<Outcome>, Vec<String>) {
    let mut settings_by_id: HashMap<&str, &Setting> = HashMap::new();
    for setting in schema.records() {
        if let Some(id) = setting.identifier() {
            settings_by_id.entry(id).or_insert(setting);
        }
    }
    let containers_by_key: HashMap<&str, &Container> = schema
        .containers
        .iter()
        .map(|c| (c.container_key.as_str(), c))
        .collect();

    // Group (setting, desired) pairs by container, in first-seen order so
    // report ordering is deterministic.
    let mut group_order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<(&str, &Setting, &Value)>> = HashMap::new();
    for (key, desired) in values {
        let Some(setting) = settings_by_id.get(key.as_str()) else {
            continue;
        };
        let container_key = setting.container_key.clone().unwrap_or_default();
        if !groups.contains_key(&container_key) {
            group_order.push(container_key.clone());
        }
        groups
            .entry(container_key)
            .or_default()
            .push((key.as_str(), *setting, desired));
    }

    tracer.log(&TraceEvent::RunStarted {
        timestamp_ms: now_ms(),
        containers: group_order.len(),
        values: values.len(),
    });

    let mut outcomes: Vec<Outcome> = Vec::new();
    let mut saved_containers: Vec<String> = Vec::new();

    for container_key in &group_order {
        let group = &groups[container_key];

        let Some(container) = containers_by_key.get(container_key.as_str()) else {
            for (key, setting, desired) in group {
                outcomes.push(outcome(key, container_key, setting, desired, OutcomeStatus::Failed, "missing-container"));
            }
            continue;
        };

        let scope = match open_container(driver, container) {
            Ok(scope) => scope,
            Err(e) => {
                let detail = format!("automation-error:{}", e);
                for (key, setting, desired) in group {
                    outcomes.push(outcome(key, container_key, setting, desired, OutcomeStatus::Failed, &detail));
                }
                continue;
            }
        };

        tracer.log(&TraceEvent::ContainerOpened {
            timestamp_ms: now_ms(),
            container_key: container_key.clone(),
            modal: container.is_modal(),
        });

        let mut changed_count = 0usize;
        for (key, setting, desired) in group {
            let attempt = apply_setting(driver, &scope, setting, desired);
            if attempt.changed {
                changed_count += 1;
            }
            // Not-writable types count as applied: the engine did everything
            // it can do for them.
            let status = if attempt.ok {
                if attempt.changed || attempt.note == "not-writable" {
                    OutcomeStatus::Applied
                } else {
                    OutcomeStatus::Skipped
                }
            } else {
                OutcomeStatus::Failed
            };
            tracer.log(&TraceEvent::OutcomeRecorded {
                timestamp_ms: now_ms(),
                setting_key: key.to_string(),
                status: status.as_str().to_string(),
                detail: attempt.note.clone(),
            });
            outcomes.push(outcome(key, container_key, setting, desired, status, &attempt.note));
        }

        if save_if_needed(driver, &scope, container, changed_count > 0) {
            saved_containers.push(container_key.clone());
            tracer.log(&TraceEvent::ContainerSaved {
                timestamp_ms: now_ms(),
                container_key: container_key.clone(),
            });
        }

        close_modal(driver, &scope, container);
    }

    let applied = count_status(&outcomes, OutcomeStatus::Applied);
    let skipped = count_status(&outcomes, OutcomeStatus::Skipped);
    let failed = count_status(&outcomes, OutcomeStatus::Failed);
    tracer.log(&TraceEvent::RunFinished {
        timestamp_ms: now_ms(),
        applied,
        skipped,
        failed,
    });

    (outcomes, saved_containers)
}

fn outcome(
    key: &str,
    container_key: &str,
    setting: &Setting,
    desired: &Value,
    status: OutcomeStatus,
    detail: &str,
) -> Outcome {
    Outcome {
        setting_key: key.to_string(),
        container_key: container_key.to_string(),
        setting_type: setting.setting_type.clone(),
        desired: (*desired).clone(),
        status,
        detail: detail.to_string(),
    }
}

fn count_status(outcomes: &[Outcome], status: OutcomeStatus) -> usize {
    outcomes.iter().filter(|o| o.status == status).count()
}
