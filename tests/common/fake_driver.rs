use std::collections::HashMap;

use ui_settings::browser::driver::{Scope, UiDriver};
use ui_settings::browser::error::DriverError;
use ui_settings::schema::schema_model::Selector;

/// Scripted state for one locatable element.
#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    pub count: u32,
    pub value: String,
    pub checked: bool,
    pub text: String,
    /// Writes to this element do not stick (control silently rejects input).
    pub stuck: bool,
    /// select-by-value fails, forcing the label fallback path.
    pub reject_select_value: bool,
}

impl FakeElement {
    pub fn unique() -> Self {
        FakeElement { count: 1, ..Default::default() }
    }

    pub fn many(count: u32) -> Self {
        FakeElement { count, ..Default::default() }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn stuck(mut self) -> Self {
        self.stuck = true;
        self
    }

    pub fn reject_select_value(mut self) -> Self {
        self.reject_select_value = true;
        self
    }
}

/// In-memory UiDriver: elements are keyed by (scope, selector), actions are
/// recorded for assertions, and reads reflect earlier writes so verify
/// passes naturally.
#[derive(Debug, Default)]
pub struct FakeDriver {
    elements: HashMap<String, FakeElement>,
    dialogs: HashMap<String, String>,
    css_scopes: HashMap<String, String>,
    pub navigations: Vec<String>,
    pub clicks: Vec<String>,
    pub keys: Vec<String>,
}

fn selector_key(selector: &Selector) -> String {
    match selector {
        Selector::Css { value } => format!("css:{}", value),
        Selector::Label { text } => format!("label:{}", text),
        Selector::Role { role, name } => format!("role:{}:{}", role, name),
    }
}

fn element_key(scope: &Scope, selector: &Selector) -> String {
    format!("{}|{}", scope.handle().unwrap_or("page"), selector_key(selector))
}

impl FakeDriver {
    pub fn new() -> Self {
        FakeDriver::default()
    }

    pub fn put(&mut self, scope: &Scope, selector: &Selector, element: FakeElement) {
        self.elements.insert(element_key(scope, selector), element);
    }

    pub fn put_page(&mut self, selector: &Selector, element: FakeElement) {
        self.put(&Scope::Page, selector, element);
    }

    pub fn register_dialog(&mut self, role: &str, name: &str, handle: &str) {
        self.dialogs
            .insert(format!("{}|{}", role, name), handle.to_string());
    }

    pub fn register_css_scope(&mut self, css: &str, handle: &str) {
        self.css_scopes.insert(css.to_string(), handle.to_string());
    }

    pub fn element(&self, scope: &Scope, selector: &Selector) -> Option<&FakeElement> {
        self.elements.get(&element_key(scope, selector))
    }

    fn get_mut(
        &mut self,
        scope: &Scope,
        selector: &Selector,
        command: &str,
    ) -> Result<&mut FakeElement, DriverError> {
        let key = element_key(scope, selector);
        self.elements.get_mut(&key).ok_or_else(|| DriverError::Protocol {
            command: command.to_string(),
            error: format!("no element for {}", key),
        })
    }
}

impl UiDriver for FakeDriver {
    fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        self.navigations.push(url.to_string());
        Ok(())
    }

    fn count(&mut self, scope: &Scope, selector: &Selector) -> Result<u32, DriverError> {
        Ok(self.element(scope, selector).map(|e| e.count).unwrap_or(0))
    }

    fn click(&mut self, scope: &Scope, selector: &Selector) -> Result<(), DriverError> {
        let key = element_key(scope, selector);
        let element = self.get_mut(scope, selector, "click")?;
        // Radio-style behavior: a click checks the clicked element
        element.checked = true;
        self.clicks.push(key);
        Ok(())
    }

    fn fill(&mut self, scope: &Scope, selector: &Selector, value: &str) -> Result<(), DriverError> {
        let element = self.get_mut(scope, selector, "fill")?;
        if !element.stuck {
            element.value = value.to_string();
        }
        Ok(())
    }

    fn is_checked(&mut self, scope: &Scope, selector: &Selector) -> Result<bool, DriverError> {
        self.get_mut(scope, selector, "is_checked").map(|e| e.checked)
    }

    fn set_checked(
        &mut self,
        scope: &Scope,
        selector: &Selector,
        checked: bool,
    ) -> Result<(), DriverError> {
        let element = self.get_mut(scope, selector, "set_checked")?;
        if !element.stuck {
            element.checked = checked;
        }
        Ok(())
    }

    fn input_value(&mut self, scope: &Scope, selector: &Selector) -> Result<String, DriverError> {
        self.get_mut(scope, selector, "input_value").map(|e| e.value.clone())
    }

    fn inner_text(&mut self, scope: &Scope, selector: &Selector) -> Result<String, DriverError> {
        self.get_mut(scope, selector, "inner_text").map(|e| e.text.clone())
    }

    fn select_by_value(
        &mut self,
        scope: &Scope,
        selector: &Selector,
        value: &str,
    ) -> Result<(), DriverError> {
        let element = self.get_mut(scope, selector, "select_value")?;
        if element.reject_select_value {
            return Err(DriverError::Protocol {
                command: "select_value".to_string(),
                error: format!("no option with value '{}'", value),
            });
        }
        if !element.stuck {
            element.value = value.to_string();
        }
        Ok(())
    }

    fn select_by_label(
        &mut self,
        scope: &Scope,
        selector: &Selector,
        label: &str,
    ) -> Result<(), DriverError> {
        let element = self.get_mut(scope, selector, "select_label")?;
        if !element.stuck {
            element.value = label.to_string();
        }
        Ok(())
    }

    fn wait_visible(&mut self, scope: &Scope, selector: &Selector) -> Result<(), DriverError> {
        self.get_mut(scope, selector, "wait_visible").map(|_| ())
    }

    fn dialog_scope(&mut self, role: &str, name: &str) -> Result<Option<Scope>, DriverError> {
        Ok(self
            .dialogs
            .get(&format!("{}|{}", role, name))
            .cloned()
            .map(Scope::Node))
    }

    fn css_scope(&mut self, css: &str) -> Result<Option<Scope>, DriverError> {
        Ok(self.css_scopes.get(css).cloned().map(Scope::Node))
    }

    fn press_key(&mut self, key: &str) -> Result<(), DriverError> {
        self.keys.push(key.to_string());
        Ok(())
    }
}
