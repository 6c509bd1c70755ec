use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Selector — tagged union used everywhere an element must be located
// ============================================================================

/// How to locate an element: CSS, label text, or ARIA role + accessible name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Selector {
    Css { value: String },
    Label { text: String },
    Role { role: String, name: String },
}

impl Selector {
    pub fn css(value: &str) -> Self {
        Selector::Css { value: value.to_string() }
    }

    pub fn label(text: &str) -> Self {
        Selector::Label { text: text.to_string() }
    }

    pub fn role(role: &str, name: &str) -> Self {
        Selector::Role {
            role: role.to_string(),
            name: name.to_string(),
        }
    }
}

// ============================================================================
// Setting — one configurable field in the schema
// ============================================================================

/// Explicit selector block: primary candidate plus ordered fallbacks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectorBlock {
    #[serde(default)]
    pub primary: Option<Selector>,
    #[serde(default)]
    pub fallbacks: Vec<Selector>,
}

/// Crawler control block (richer schema variant). When a setting has no
/// explicit `selectors`, a role selector is synthesized from the primary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ControlBlock {
    #[serde(default)]
    pub primary_selector: Option<PrimarySelector>,
    #[serde(default)]
    pub fallback_selectors: Vec<Selector>,
    #[serde(default)]
    pub canonical_control_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrimarySelector {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One `{value, label}` entry for choice-based setting types.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionEntry {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

/// Group metadata from the richer crawler variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupBlock {
    #[serde(default)]
    pub title: Option<String>,
}

/// Owning-container metadata from the richer crawler variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerRef {
    #[serde(default)]
    pub title: Option<String>,
}

/// Capture context from the richer crawler variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextBlock {
    #[serde(default)]
    pub frame_url: Option<String>,
    #[serde(default)]
    pub modal_title: Option<String>,
}

/// Captured current value (richer variant nests it under `value`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueBlock {
    #[serde(default)]
    pub current_value: Option<Value>,
}

/// One field in the schema. Supports both the legacy flat shape
/// (`settingKey`, `label`, `selectors`) and the richer crawler shape
/// (`field_id`, `control`, `page`/`breadcrumb`/`group`/`context`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Setting {
    #[serde(default, rename = "settingKey")]
    pub setting_key: Option<String>,
    #[serde(default)]
    pub field_id: Option<String>,

    #[serde(default, rename = "type")]
    pub setting_type: Option<String>,
    #[serde(default, rename = "containerKey")]
    pub container_key: Option<String>,

    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, rename = "groupTitle")]
    pub group_title: Option<String>,

    #[serde(default)]
    pub options: Vec<OptionEntry>,
    #[serde(default)]
    pub selectors: Option<SelectorBlock>,
    #[serde(default)]
    pub control: Option<ControlBlock>,

    // Rich-variant context used for drift signatures
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub breadcrumb: Vec<String>,
    #[serde(default)]
    pub group: Option<GroupBlock>,
    #[serde(default)]
    pub container: Option<ContainerRef>,
    #[serde(default)]
    pub context: Option<ContextBlock>,

    #[serde(default, rename = "currentValue")]
    pub current_value: Option<Value>,
    #[serde(default)]
    pub value: Option<ValueBlock>,
}

impl Setting {
    /// Stable identifier: `field_id` first, legacy `settingKey` second.
    pub fn identifier(&self) -> Option<&str> {
        self.field_id
            .as_deref()
            .or(self.setting_key.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn type_str(&self) -> &str {
        self.setting_type.as_deref().unwrap_or("")
    }
}

// ============================================================================
// Container — a page or modal that owns settings and their actions
// ============================================================================

/// One navigation step: `goto` a URL or `click` a selector. Steps tagged
/// `modal_close` are skipped while opening.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavStep {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub selector: Option<Selector>,
    #[serde(default)]
    pub kind: Option<String>,
}

/// A container-level action: save, cancel, or close.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerAction {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub selector: Option<Selector>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Container {
    #[serde(rename = "containerKey")]
    pub container_key: String,
    #[serde(default, rename = "type")]
    pub container_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "navPath")]
    pub nav_path: Vec<NavStep>,
    #[serde(default)]
    pub actions: Vec<ContainerAction>,
}

impl Container {
    pub fn is_modal(&self) -> bool {
        self.container_type.as_deref() == Some("modal")
    }
}

// ============================================================================
// Schema — one crawler snapshot
// ============================================================================

/// A schema snapshot. Settings live under `settings` or, in the richer
/// crawler variant, `fieldRecords`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub containers: Vec<Container>,
    #[serde(default)]
    pub settings: Vec<Setting>,
    #[serde(default, rename = "fieldRecords")]
    pub field_records: Vec<Setting>,
}

impl Schema {
    /// The setting records, preferring `fieldRecords` when present.
    pub fn records(&self) -> &[Setting] {
        if !self.field_records.is_empty() {
            &self.field_records
        } else {
            &self.settings
        }
    }
}
