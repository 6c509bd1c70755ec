use serde_json::Value;

use crate::apply::locator::resolve_field_locator;
use crate::apply::normalize::{normalize_bool, normalize_str, resolve_option_label};
use crate::browser::driver::{Scope, UiDriver};
use crate::browser::error::DriverError;
use crate::schema::schema_model::{Selector, Setting};

// ============================================================================
// Per-type write/verify strategies
// ============================================================================

/// Closed set of setting types this engine knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingType {
    Textbox,
    Spinbutton,
    Checkbox,
    Switch,
    RadioGroup,
    DropdownNative,
    DropdownAria,
    ButtonDialog,
    TextDisplay,
    Table,
}

impl SettingType {
    /// Parse a schema type string. `None` means the schema declares a type
    /// this engine has no strategy for.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "textbox" => Some(SettingType::Textbox),
            "spinbutton" => Some(SettingType::Spinbutton),
            "checkbox" => Some(SettingType::Checkbox),
            "switch" => Some(SettingType::Switch),
            "radio_group" => Some(SettingType::RadioGroup),
            "dropdown_native" => Some(SettingType::DropdownNative),
            "dropdown_aria" => Some(SettingType::DropdownAria),
            "button_dialog" => Some(SettingType::ButtonDialog),
            "text_display" => Some(SettingType::TextDisplay),
            "table" => Some(SettingType::Table),
            _ => None,
        }
    }
}

/// Result of one write/verify attempt against a live setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyOutcome {
    pub ok: bool,
    /// Whether a write was actually performed. Stays true on verification
    /// failure so the container still triggers its save action.
    pub changed: bool,
    /// Reason code on failure, selector provenance (or `not-writable`) on
    /// success.
    pub note: String,
}

impl StrategyOutcome {
    fn failed(note: impl Into<String>) -> Self {
        StrategyOutcome { ok: false, changed: false, note: note.into() }
    }
}

enum WriteResult {
    Done,
    NotWritable,
    /// Precondition failed before any write (missing option)
    Rejected(String),
}

/// Resolve the setting's locator and drive it to the desired value.
///
/// Every failure mode is folded into the returned outcome; driver errors
/// become `automation-error:<detail>` and never propagate.
pub fn apply_setting(
    driver: &mut dyn UiDriver,
    scope: &Scope,
    setting: &Setting,
    desired: &Value,
) -> StrategyOutcome {
    let (selector, provenance) = resolve_field_locator(driver, scope, setting);
    let Some(selector) = selector else {
        return StrategyOutcome::failed("no-unique-selector");
    };

    let Some(kind) = SettingType::parse(setting.type_str()) else {
        return StrategyOutcome::failed(format!("unsupported-type:{}", setting.type_str()));
    };

    let mut changed = false;
    match write_value(driver, scope, &selector, setting, kind, desired, &mut changed) {
        Ok(WriteResult::NotWritable) => StrategyOutcome {
            ok: true,
            changed: false,
            note: "not-writable".to_string(),
        },
        Ok(WriteResult::Rejected(note)) => StrategyOutcome::failed(note),
        Ok(WriteResult::Done) => {
            let mut verified = verify_value(driver, scope, &selector, setting, kind, desired);
            if !verified && matches!(kind, SettingType::RadioGroup | SettingType::DropdownAria) {
                // Group-level controls cannot cheaply re-read their state;
                // once the option click landed, the write is trusted.
                verified = true;
            }
            if verified {
                StrategyOutcome { ok: true, changed, note: provenance }
            } else {
                StrategyOutcome { ok: false, changed, note: "verification-failed".to_string() }
            }
        }
        Err(e) => StrategyOutcome {
            ok: false,
            changed,
            note: format!("automation-error:{}", e),
        },
    }
}

/// Write the desired value if the control does not already hold it.
/// Skips the write entirely when the current value normalizes equal.
fn write_value(
    driver: &mut dyn UiDriver,
    scope: &Scope,
    selector: &Selector,
    setting: &Setting,
    kind: SettingType,
    desired: &Value,
    changed: &mut bool,
) -> Result<WriteResult, DriverError> {
    match kind {
        SettingType::Textbox | SettingType::Spinbutton => {
            let current = driver.input_value(scope, selector)?.trim().to_string();
            let target = normalize_str(desired);
            if current != target {
                driver.fill(scope, selector, &target)?;
                *changed = true;
            }
            Ok(WriteResult::Done)
        }

        SettingType::Checkbox | SettingType::Switch => {
            let desired_bool = normalize_bool(desired);
            let current = driver.is_checked(scope, selector)?;
            if current != desired_bool {
                driver.set_checked(scope, selector, desired_bool)?;
                *changed = true;
            }
            Ok(WriteResult::Done)
        }

        SettingType::RadioGroup => {
            let label = resolve_option_label(setting, desired);
            let radio = Selector::role("radio", &label);
            if driver.count(scope, &radio)? == 0 {
                return Ok(WriteResult::Rejected(format!("radio-option-not-found:{}", label)));
            }
            if !driver.is_checked(scope, &radio)? {
                driver.click(scope, &radio)?;
                *changed = true;
            }
            Ok(WriteResult::Done)
        }

        SettingType::DropdownNative => {
            let desired_value = normalize_str(desired);
            let current = driver.input_value(scope, selector)?.trim().to_string();
            if current != desired_value {
                if driver.select_by_value(scope, selector, &desired_value).is_err() {
                    let label = resolve_option_label(setting, desired);
                    driver.select_by_label(scope, selector, &label)?;
                }
                *changed = true;
            }
            Ok(WriteResult::Done)
        }

        SettingType::DropdownAria => {
            let label = resolve_option_label(setting, desired);
            driver.click(scope, selector)?;
            let option = Selector::role("option", &label);
            if driver.count(&Scope::Page, &option)? == 0 {
                driver.press_key("Escape")?;
                return Ok(WriteResult::Rejected(format!("aria-option-not-found:{}", label)));
            }
            driver.wait_visible(&Scope::Page, &option)?;
            driver.click(&Scope::Page, &option)?;
            *changed = true;
            Ok(WriteResult::Done)
        }

        SettingType::ButtonDialog | SettingType::TextDisplay | SettingType::Table => {
            Ok(WriteResult::NotWritable)
        }
    }
}

/// Re-read the control and check it now holds the desired value. Any driver
/// failure during the read counts as unverified.
pub fn verify_value(
    driver: &mut dyn UiDriver,
    scope: &Scope,
    selector: &Selector,
    setting: &Setting,
    kind: SettingType,
    desired: &Value,
) -> bool {
    let desired_text = normalize_str(desired);

    let result: Result<bool, DriverError> = (|| match kind {
        SettingType::Checkbox | SettingType::Switch => {
            Ok(driver.is_checked(scope, selector)? == normalize_bool(desired))
        }
        SettingType::RadioGroup => Ok(true),
        SettingType::DropdownNative => {
            let current = driver.input_value(scope, selector)?.trim().to_string();
            // Loose match tolerates option text vs value mismatches
            Ok(current == desired_text || current.contains(&desired_text))
        }
        SettingType::DropdownAria => {
            let text = driver.inner_text(scope, selector)?.trim().to_string();
            let option_label = resolve_option_label(setting, desired);
            Ok(text.contains(&option_label) || text.contains(&desired_text))
        }
        SettingType::Textbox | SettingType::Spinbutton => {
            Ok(driver.input_value(scope, selector)?.trim() == desired_text)
        }
        _ => Ok(true),
    })();

    result.unwrap_or(false)
}
