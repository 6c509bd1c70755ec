use crate::schema::schema_model::Setting;

// ============================================================================
// Setting signatures — identity-independent keys for cross-snapshot matching
// ============================================================================

/// Human-readable label, falling back to the control block's accessible name
/// for rich records that carry no `label` key.
pub fn setting_label(setting: &Setting) -> String {
    if let Some(label) = &setting.label {
        return label.clone();
    }
    setting
        .control
        .as_ref()
        .and_then(|c| c.primary_selector.as_ref())
        .and_then(|p| p.name.clone())
        .unwrap_or_default()
}

/// Order-sensitive signature built from identity-independent attributes, so
/// the "same" setting can be matched across snapshots even when its stable
/// identifier changed. Rich records use the full capture context; legacy
/// records fall back to container/group/label.
pub fn setting_signature(setting: &Setting) -> String {
    if setting.field_id.is_some() {
        let container_title = setting
            .container
            .as_ref()
            .and_then(|c| c.title.clone())
            .unwrap_or_default();
        let group_title = setting
            .group
            .as_ref()
            .and_then(|g| g.title.clone())
            .unwrap_or_default();
        let control_id = setting
            .control
            .as_ref()
            .and_then(|c| c.canonical_control_id.clone())
            .unwrap_or_default();
        let (frame_url, modal_title) = setting
            .context
            .as_ref()
            .map(|c| {
                (
                    c.frame_url.clone().unwrap_or_default(),
                    c.modal_title.clone().unwrap_or_default(),
                )
            })
            .unwrap_or_default();
        return [
            setting.page.clone().unwrap_or_default(),
            setting.breadcrumb.join("|"),
            container_title,
            group_title,
            control_id,
            frame_url,
            modal_title,
            setting.type_str().to_string(),
        ]
        .join("|");
    }
    [
        setting.container_key.clone().unwrap_or_default(),
        setting.group_title.clone().unwrap_or_default(),
        setting_label(setting),
        setting.type_str().to_string(),
    ]
    .join("|")
}

/// Heuristic for timestamp-valued fields: the label mentions time/date, or
/// the captured value looks like one (digits plus a date/time separator).
/// Such fields churn between captures for reasons unrelated to structural
/// drift, so they are excluded from signature-based identifier matching.
pub fn is_timestamp_field(setting: &Setting) -> bool {
    let label = setting_label(setting).to_lowercase();
    if label.contains("time") || label.contains("date") {
        return true;
    }
    let value = current_value_text(setting);
    !value.is_empty()
        && value.chars().any(|c| c == '/' || c == ':')
        && value.chars().any(|c| c.is_ascii_digit())
}

/// Captured current value as text, from either schema variant.
fn current_value_text(setting: &Setting) -> String {
    let raw = setting
        .value
        .as_ref()
        .and_then(|v| v.current_value.as_ref())
        .or(setting.current_value.as_ref());
    match raw {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
