use crate::browser::driver::{Scope, UiDriver};
use crate::schema::schema_model::{Selector, Setting};

// ============================================================================
// Locator resolution — uniqueness or skip
// ============================================================================

/// Build the ordered candidate list for a setting: primary first, then
/// fallbacks. When no explicit `selectors` block exists, a role selector is
/// synthesized from the control block's primary selector. Slot 0 is always
/// the primary position, present or not, so provenance indexing is stable.
pub fn selector_candidates(setting: &Setting) -> Vec<Option<Selector>> {
    let mut primary: Option<Selector> = None;
    let mut fallbacks: Vec<Selector> = Vec::new();

    if let Some(block) = &setting.selectors {
        primary = block.primary.clone();
        fallbacks = block.fallbacks.clone();
    } else if let Some(control) = &setting.control {
        if let Some(ps) = &control.primary_selector {
            if let (Some(role), Some(name)) = (ps.role.as_deref(), ps.name.as_deref()) {
                primary = Some(Selector::role(role, name));
            }
        }
        fallbacks = control.fallback_selectors.clone();
    }

    let mut candidates = vec![primary];
    candidates.extend(fallbacks.into_iter().map(Some));
    candidates
}

/// Resolve the single live element for a setting.
///
/// Tries each candidate in order and accepts the first that matches exactly
/// one element; 0 or >1 matches (or a driver failure) moves on to the next
/// candidate. Ambiguity is never accepted even when a later candidate would
/// be unique for the skipped one — writing to the wrong element is worse
/// than not writing at all.
///
/// Returns the winning selector plus a provenance tag: `"primary"`,
/// `"fallback[i]"`, or `"none"` when nothing resolved uniquely.
pub fn resolve_field_locator(
    driver: &mut dyn UiDriver,
    scope: &Scope,
    setting: &Setting,
) -> (Option<Selector>, String) {
    for (index, candidate) in selector_candidates(setting).into_iter().enumerate() {
        let Some(selector) = candidate else { continue };
        match driver.count(scope, &selector) {
            Ok(1) => {
                let provenance = if index == 0 {
                    "primary".to_string()
                } else {
                    format!("fallback[{}]", index - 1)
                };
                return (Some(selector), provenance);
            }
            Ok(_) => continue,
            Err(_) => continue,
        }
    }
    (None, "none".to_string())
}
