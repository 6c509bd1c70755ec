use ui_settings::{
    apply::locator::{resolve_field_locator, selector_candidates},
    browser::driver::Scope,
    schema::schema_model::{ControlBlock, PrimarySelector, Selector, SelectorBlock, Setting},
};

use crate::common::fake_driver::{FakeDriver, FakeElement};

mod common;

// =========================================================================
// Helpers
// =========================================================================

fn setting_with_selectors(primary: Option<Selector>, fallbacks: Vec<Selector>) -> Setting {
    Setting {
        setting_type: Some("textbox".to_string()),
        selectors: Some(SelectorBlock { primary, fallbacks }),
        ..Default::default()
    }
}

// =========================================================================
// Candidate construction
// =========================================================================

#[test]
fn candidates_keep_primary_in_slot_zero_even_when_absent() {
    let setting = setting_with_selectors(None, vec![Selector::css("#fb")]);
    let candidates = selector_candidates(&setting);
    assert_eq!(candidates.len(), 2);
    assert!(candidates[0].is_none());
    assert_eq!(candidates[1], Some(Selector::css("#fb")));
}

#[test]
fn control_block_synthesizes_role_primary() {
    let setting = Setting {
        setting_type: Some("checkbox".to_string()),
        control: Some(ControlBlock {
            primary_selector: Some(PrimarySelector {
                role: Some("checkbox".to_string()),
                name: Some("Enable DHCP".to_string()),
            }),
            fallback_selectors: vec![Selector::css("#dhcp")],
            canonical_control_id: None,
        }),
        ..Default::default()
    };
    let candidates = selector_candidates(&setting);
    assert_eq!(candidates[0], Some(Selector::role("checkbox", "Enable DHCP")));
    assert_eq!(candidates[1], Some(Selector::css("#dhcp")));
}

// =========================================================================
// Uniqueness-first resolution
// =========================================================================

#[test]
fn unique_primary_wins() {
    let setting = setting_with_selectors(Some(Selector::css("#a")), vec![Selector::css("#b")]);
    let mut driver = FakeDriver::new();
    driver.put_page(&Selector::css("#a"), FakeElement::unique());
    driver.put_page(&Selector::css("#b"), FakeElement::unique());

    let (selector, provenance) = resolve_field_locator(&mut driver, &Scope::Page, &setting);
    assert_eq!(selector, Some(Selector::css("#a")));
    assert_eq!(provenance, "primary");
}

#[test]
fn ambiguous_primary_yields_to_unique_fallback() {
    let setting = setting_with_selectors(
        Some(Selector::css(".row input")),
        vec![Selector::label("Host name"), Selector::css("#host")],
    );
    let mut driver = FakeDriver::new();
    driver.put_page(&Selector::css(".row input"), FakeElement::many(2));
    driver.put_page(&Selector::label("Host name"), FakeElement::unique());

    let (selector, provenance) = resolve_field_locator(&mut driver, &Scope::Page, &setting);
    assert_eq!(selector, Some(Selector::label("Host name")));
    assert_eq!(provenance, "fallback[0]");
}

#[test]
fn nothing_unique_resolves_to_none() {
    let setting = setting_with_selectors(
        Some(Selector::css("#missing")),
        vec![Selector::css(".ambiguous")],
    );
    let mut driver = FakeDriver::new();
    driver.put_page(&Selector::css(".ambiguous"), FakeElement::many(3));

    let (selector, provenance) = resolve_field_locator(&mut driver, &Scope::Page, &setting);
    assert!(selector.is_none());
    assert_eq!(provenance, "none");
}

#[test]
fn missing_primary_keeps_fallback_indexing_stable() {
    let setting = setting_with_selectors(None, vec![Selector::css("#only")]);
    let mut driver = FakeDriver::new();
    driver.put_page(&Selector::css("#only"), FakeElement::unique());

    let (selector, provenance) = resolve_field_locator(&mut driver, &Scope::Page, &setting);
    assert_eq!(selector, Some(Selector::css("#only")));
    assert_eq!(provenance, "fallback[0]");
}

#[test]
fn resolution_respects_the_given_scope() {
    let setting = setting_with_selectors(Some(Selector::css("#inside")), vec![]);
    let modal = Scope::Node("dlg1".to_string());
    let mut driver = FakeDriver::new();
    driver.put(&modal, &Selector::css("#inside"), FakeElement::unique());

    // Page scope sees nothing, modal scope resolves
    let (page_hit, _) = resolve_field_locator(&mut driver, &Scope::Page, &setting);
    assert!(page_hit.is_none());
    let (modal_hit, provenance) = resolve_field_locator(&mut driver, &modal, &setting);
    assert_eq!(modal_hit, Some(Selector::css("#inside")));
    assert_eq!(provenance, "primary");
}
