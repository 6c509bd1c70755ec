use serde::{Deserialize, Serialize};

// ============================================================================
// Drift diff — structured difference between two schema snapshots
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelType {
    pub label: String,
    #[serde(rename = "type")]
    pub setting_type: String,
}

/// A setting whose id survived but whose label or declared type changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelTypeChange {
    #[serde(rename = "settingKey")]
    pub setting_key: String,
    pub first: LabelType,
    pub second: LabelType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    #[serde(rename = "labelOrTypeChanged")]
    pub label_or_type_changed: Vec<LabelTypeChange>,
}

/// The same logical field (matched by signature) carries a different stable
/// identifier in the two snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldIdDrift {
    pub signature: String,
    #[serde(rename = "firstFieldId")]
    pub first_field_id: String,
    #[serde(rename = "secondFieldId")]
    pub second_field_id: String,
}

/// A dropdown whose extracted options list is empty — an extraction defect
/// that would make option resolution impossible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownIssue {
    #[serde(rename = "fieldId")]
    pub field_id: String,
    pub label: String,
    pub reason: String,
}

/// A radio group with the same option label set but a different ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadioOrderChange {
    pub signature: String,
    #[serde(rename = "firstOrder")]
    pub first_order: Vec<String>,
    #[serde(rename = "secondOrder")]
    pub second_order: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftDiff {
    pub containers: ContainerDiff,
    pub settings: SettingsDiff,
    #[serde(rename = "fieldIdDrift")]
    pub field_id_drift: Vec<FieldIdDrift>,
    #[serde(rename = "dropdownsMissingOptionsA")]
    pub dropdowns_missing_options_a: Vec<DropdownIssue>,
    #[serde(rename = "dropdownsMissingOptionsB")]
    pub dropdowns_missing_options_b: Vec<DropdownIssue>,
    #[serde(rename = "radioOrderingChangedWithoutLabelChange")]
    pub radio_ordering_changed: Vec<RadioOrderChange>,
}

impl DriftDiff {
    /// Whether any collection is non-empty — the single verdict callers key
    /// their exit status on.
    pub fn has_drift(&self) -> bool {
        !self.containers.added.is_empty()
            || !self.containers.removed.is_empty()
            || !self.settings.added.is_empty()
            || !self.settings.removed.is_empty()
            || !self.settings.label_or_type_changed.is_empty()
            || !self.field_id_drift.is_empty()
            || !self.dropdowns_missing_options_a.is_empty()
            || !self.dropdowns_missing_options_b.is_empty()
            || !self.radio_ordering_changed.is_empty()
    }
}
