use crate::browser::error::DriverError;
use crate::schema::schema_model::Selector;

// ============================================================================
// UiDriver — the browser automation capability consumed by the engines
// ============================================================================

/// The root a selector resolves against: the top-level page, or a registered
/// element handle (a modal dialog surface).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Page,
    Node(String),
}

impl Scope {
    pub fn handle(&self) -> Option<&str> {
        match self {
            Scope::Page => None,
            Scope::Node(id) => Some(id),
        }
    }
}

/// Minimal browser capability the application engine requires.
///
/// Every call is timeout-bounded by the implementation and may fail; callers
/// catch `DriverError` and convert it into outcome detail strings rather
/// than letting it abort the run. Object safe so engines take
/// `&mut dyn UiDriver` and tests substitute a scripted fake.
pub trait UiDriver {
    /// Navigate the top-level page and wait for network idle.
    fn navigate(&mut self, url: &str) -> Result<(), DriverError>;

    /// Number of elements the selector matches within the scope.
    fn count(&mut self, scope: &Scope, selector: &Selector) -> Result<u32, DriverError>;

    fn click(&mut self, scope: &Scope, selector: &Selector) -> Result<(), DriverError>;

    /// Replace an input's contents.
    fn fill(&mut self, scope: &Scope, selector: &Selector, value: &str) -> Result<(), DriverError>;

    fn is_checked(&mut self, scope: &Scope, selector: &Selector) -> Result<bool, DriverError>;

    fn set_checked(
        &mut self,
        scope: &Scope,
        selector: &Selector,
        checked: bool,
    ) -> Result<(), DriverError>;

    /// Current value of an input/select element.
    fn input_value(&mut self, scope: &Scope, selector: &Selector) -> Result<String, DriverError>;

    /// Rendered text content of an element.
    fn inner_text(&mut self, scope: &Scope, selector: &Selector) -> Result<String, DriverError>;

    /// Select a native dropdown option by its value attribute.
    fn select_by_value(
        &mut self,
        scope: &Scope,
        selector: &Selector,
        value: &str,
    ) -> Result<(), DriverError>;

    /// Select a native dropdown option by its visible label.
    fn select_by_label(
        &mut self,
        scope: &Scope,
        selector: &Selector,
        label: &str,
    ) -> Result<(), DriverError>;

    /// Wait until the element is visible.
    fn wait_visible(&mut self, scope: &Scope, selector: &Selector) -> Result<(), DriverError>;

    /// Locate a dialog surface by ARIA role and accessible name, wait for it
    /// to be visible, and register it as a scope. `Ok(None)` when absent.
    fn dialog_scope(&mut self, role: &str, name: &str) -> Result<Option<Scope>, DriverError>;

    /// Locate the first visible match of a CSS selector and register it as a
    /// scope. `Ok(None)` when absent.
    fn css_scope(&mut self, css: &str) -> Result<Option<Scope>, DriverError>;

    /// Press a keyboard key (page-level, e.g. "Escape").
    fn press_key(&mut self, key: &str) -> Result<(), DriverError>;
}
