use crate::browser::driver::{Scope, UiDriver};
use crate::browser::error::DriverError;
use crate::schema::schema_model::{Container, Selector};

// ============================================================================
// Container orchestration — open, save, close
// ============================================================================

/// Known modal roots tried when neither dialog role matches the title.
pub const MODAL_FALLBACK_CSS: &str =
    "#detailSettingsModalRoot, .ui-dialog:visible, [role='dialog'], [role='alertdialog']";

/// Open a container and return the scope its settings resolve against.
///
/// Executes the nav path in order: the first `goto` step navigates the page,
/// then `click` steps run opportunistically — a step that fails or matches
/// nothing is skipped, not fatal (some steps only dismiss promos that may
/// not be on screen). Steps tagged `modal_close` are for closing and are
/// skipped here. For modal containers the dialog surface is located by role
/// and title, falling back to known modal-root selectors; when no surface is
/// found the page itself is the scope.
pub fn open_container(
    driver: &mut dyn UiDriver,
    container: &Container,
) -> Result<Scope, DriverError> {
    let goto_url = container
        .nav_path
        .iter()
        .find(|step| step.action.as_deref() == Some("goto") && step.url.is_some())
        .and_then(|step| step.url.clone());

    if let Some(url) = goto_url {
        driver.navigate(&url)?;
    }

    for step in &container.nav_path {
        if step.action.as_deref() != Some("click") {
            continue;
        }
        if step.kind.as_deref() == Some("modal_close") {
            continue;
        }
        let Some(selector) = &step.selector else { continue };
        match driver.count(&Scope::Page, selector) {
            Ok(0) | Err(_) => continue,
            Ok(_) => {
                if let Err(e) = driver.click(&Scope::Page, selector) {
                    eprintln!(
                        "Warning: nav click skipped for '{}': {}",
                        container.container_key, e
                    );
                }
            }
        }
    }

    if container.is_modal() {
        let title = container.title.as_deref().unwrap_or("");
        for role in ["dialog", "alertdialog"] {
            if let Ok(Some(scope)) = driver.dialog_scope(role, title) {
                return Ok(scope);
            }
        }
        if let Ok(Some(scope)) = driver.css_scope(MODAL_FALLBACK_CSS) {
            return Ok(scope);
        }
    }

    Ok(Scope::Page)
}

/// Click an action selector, preferring the container scope and falling back
/// to page level. Returns whether a click happened.
fn click_action(
    driver: &mut dyn UiDriver,
    scope: &Scope,
    selector: &Selector,
) -> Result<bool, DriverError> {
    let target = if driver.count(scope, selector)? > 0 {
        scope.clone()
    } else if driver.count(&Scope::Page, selector)? > 0 {
        Scope::Page
    } else {
        return Ok(false);
    };
    driver.click(&target, selector)?;
    Ok(true)
}

/// Click the container's save action iff something changed. Returns whether
/// a save was triggered; a no-op run must not cause spurious saves.
pub fn save_if_needed(
    driver: &mut dyn UiDriver,
    scope: &Scope,
    container: &Container,
    changed: bool,
) -> bool {
    if !changed {
        return false;
    }
    for action in &container.actions {
        if action.kind.as_deref() != Some("save") {
            continue;
        }
        let Some(selector) = &action.selector else { continue };
        match click_action(driver, scope, selector) {
            Ok(true) => return true,
            Ok(false) => continue,
            Err(e) => {
                eprintln!(
                    "Warning: save click failed for '{}': {}",
                    container.container_key, e
                );
                continue;
            }
        }
    }
    false
}

/// Dismiss a modal container: click the first cancel/close action that
/// resolves, else press Escape. Never raises.
pub fn close_modal(driver: &mut dyn UiDriver, scope: &Scope, container: &Container) {
    if !container.is_modal() {
        return;
    }
    for action in &container.actions {
        if !matches!(action.kind.as_deref(), Some("cancel") | Some("close")) {
            continue;
        }
        let Some(selector) = &action.selector else { continue };
        match click_action(driver, scope, selector) {
            Ok(true) => return,
            _ => continue,
        }
    }
    let _ = driver.press_key("Escape");
}
