use std::collections::{BTreeMap, BTreeSet};

use crate::drift::drift_model::{
    ContainerDiff, DriftDiff, DropdownIssue, FieldIdDrift, LabelType, LabelTypeChange,
    RadioOrderChange, SettingsDiff,
};
use crate::drift::signature::{is_timestamp_field, setting_label, setting_signature};
use crate::schema::schema_model::{Schema, Setting};

// ============================================================================
// Schema drift detection — pure comparison of two snapshots
// ============================================================================

fn diff_sets(first: &BTreeSet<String>, second: &BTreeSet<String>) -> (Vec<String>, Vec<String>) {
    let added = second.difference(first).cloned().collect();
    let removed = first.difference(second).cloned().collect();
    (added, removed)
}

fn settings_by_id(records: &[Setting]) -> BTreeMap<String, &Setting> {
    let mut map = BTreeMap::new();
    for setting in records {
        if let Some(id) = setting.identifier() {
            map.entry(id.to_string()).or_insert(setting);
        }
    }
    map
}

/// Signature -> identifier map, excluding timestamp-valued fields whose
/// captured value churns between runs. First signature occurrence wins so
/// the mapping is deterministic.
fn signature_map(records: &[Setting]) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for setting in records {
        let Some(id) = setting.identifier() else { continue };
        if is_timestamp_field(setting) {
            continue;
        }
        map.entry(setting_signature(setting)).or_insert_with(|| id.to_string());
    }
    map
}

/// Signature -> ordered option labels for every radio group.
fn radio_order_index(records: &[Setting]) -> BTreeMap<String, Vec<String>> {
    let mut index = BTreeMap::new();
    for setting in records {
        if setting.type_str() != "radio_group" {
            continue;
        }
        let labels: Vec<String> = setting
            .options
            .iter()
            .map(|option| {
                option
                    .label
                    .clone()
                    .filter(|s| !s.is_empty())
                    .or_else(|| option.value.clone().filter(|s| !s.is_empty()))
                    .unwrap_or_default()
            })
            .collect();
        index.entry(setting_signature(setting)).or_insert(labels);
    }
    index
}

/// Dropdowns whose extracted options list is empty.
fn dropdowns_missing_options(records: &[Setting]) -> Vec<DropdownIssue> {
    records
        .iter()
        .filter(|s| matches!(s.type_str(), "dropdown_native" | "dropdown_aria"))
        .filter(|s| s.options.is_empty())
        .map(|s| DropdownIssue {
            field_id: s.identifier().unwrap_or("").to_string(),
            label: setting_label(s),
            reason: "dropdown has empty options[]".to_string(),
        })
        .collect()
}

/// Compare two schema snapshots and produce a structured diff. Pure and
/// total: it never fails, only `DriftDiff::has_drift` communicates severity.
pub fn compare_schemas(first: &Schema, second: &Schema) -> DriftDiff {
    let first_records = first.records();
    let second_records = second.records();

    let first_containers: BTreeSet<String> = first
        .containers
        .iter()
        .map(|c| c.container_key.clone())
        .collect();
    let second_containers: BTreeSet<String> = second
        .containers
        .iter()
        .map(|c| c.container_key.clone())
        .collect();
    let (container_added, container_removed) = diff_sets(&first_containers, &second_containers);

    let first_settings = settings_by_id(first_records);
    let second_settings = settings_by_id(second_records);
    let first_ids: BTreeSet<String> = first_settings.keys().cloned().collect();
    let second_ids: BTreeSet<String> = second_settings.keys().cloned().collect();
    let (setting_added, setting_removed) = diff_sets(&first_ids, &second_ids);

    // Ids present in both: flag label or declared-type changes even when the
    // identifier itself is stable.
    let mut label_or_type_changed = Vec::new();
    for id in first_ids.intersection(&second_ids) {
        let first_item = first_settings[id];
        let second_item = second_settings[id];
        let first_label = setting_label(first_item);
        let second_label = setting_label(second_item);
        let first_type = first_item.type_str().to_string();
        let second_type = second_item.type_str().to_string();
        if first_label != second_label || first_type != second_type {
            label_or_type_changed.push(LabelTypeChange {
                setting_key: id.clone(),
                first: LabelType { label: first_label, setting_type: first_type },
                second: LabelType { label: second_label, setting_type: second_type },
            });
        }
    }

    // Same signature, different identifier: silent id drift that breaks any
    // automation keyed on the id.
    let first_signatures = signature_map(first_records);
    let second_signatures = signature_map(second_records);
    let mut field_id_drift = Vec::new();
    for (signature, first_id) in &first_signatures {
        let Some(second_id) = second_signatures.get(signature) else {
            continue;
        };
        if first_id != second_id {
            field_id_drift.push(FieldIdDrift {
                signature: signature.clone(),
                first_field_id: first_id.clone(),
                second_field_id: second_id.clone(),
            });
        }
    }

    // Same signature, same label set, different order.
    let first_radio = radio_order_index(first_records);
    let second_radio = radio_order_index(second_records);
    let mut radio_ordering_changed = Vec::new();
    for (signature, first_labels) in &first_radio {
        let Some(second_labels) = second_radio.get(signature) else {
            continue;
        };
        if first_labels == second_labels {
            continue;
        }
        let mut first_sorted = first_labels.clone();
        let mut second_sorted = second_labels.clone();
        first_sorted.sort();
        second_sorted.sort();
        if first_sorted == second_sorted {
            radio_ordering_changed.push(RadioOrderChange {
                signature: signature.clone(),
                first_order: first_labels.clone(),
                second_order: second_labels.clone(),
            });
        }
    }

    DriftDiff {
        containers: ContainerDiff { added: container_added, removed: container_removed },
        settings: SettingsDiff {
            added: setting_added,
            removed: setting_removed,
            label_or_type_changed,
        },
        field_id_drift,
        dropdowns_missing_options_a: dropdowns_missing_options(first_records),
        dropdowns_missing_options_b: dropdowns_missing_options(second_records),
        radio_ordering_changed,
    }
}
