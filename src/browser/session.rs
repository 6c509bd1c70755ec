use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};

use serde::{Deserialize, Serialize};

use crate::browser::driver::{Scope, UiDriver};
use crate::browser::error::DriverError;
use crate::schema::schema_model::Selector;

/// Request sent to the Playwright driver server over stdin (one JSON line).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DriverRequest<'a> {
    Navigate {
        cmd: &'static str,
        url: &'a str,
        timeout_ms: u64,
    },
    Count {
        cmd: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        scope: Option<&'a str>,
        selector: &'a Selector,
    },
    Action {
        cmd: &'static str,
        action: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        scope: Option<&'a str>,
        selector: &'a Selector,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        checked: Option<bool>,
        timeout_ms: u64,
    },
    Read {
        cmd: &'static str,
        read: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        scope: Option<&'a str>,
        selector: &'a Selector,
    },
    ScopeRole {
        cmd: &'static str,
        role: &'a str,
        name: &'a str,
        timeout_ms: u64,
    },
    ScopeCss {
        cmd: &'static str,
        css: &'a str,
        timeout_ms: u64,
    },
    Press {
        cmd: &'static str,
        key: &'a str,
    },
    Quit {
        cmd: &'static str,
    },
}

/// Response received from the driver server over stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct DriverResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub ready: Option<bool>,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub checked: Option<bool>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Launch options for the driver server.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Path to the Node.js driver server script.
    pub script: String,
    pub headless: bool,
    /// Per-action timeout applied to every UI-touching command.
    pub timeout_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            script: "node/ui_driver_server.js".to_string(),
            headless: false,
            timeout_ms: 15000,
        }
    }
}

/// A persistent browser session backed by a Node.js Playwright server.
///
/// Launches a long-lived process that keeps a Chromium page open. Commands
/// are sent as NDJSON over stdin, responses read from stdout. Modal scopes
/// are registered server-side and referenced by handle id.
pub struct BrowserSession {
    child: Child,
    stdin: std::process::ChildStdin,
    reader: BufReader<std::process::ChildStdout>,
    timeout_ms: u64,
}

impl BrowserSession {
    /// Launch the driver server and wait for its ready signal.
    pub fn launch(config: &SessionConfig) -> Result<Self, DriverError> {
        let mut command = Command::new("node");
        command.arg(&config.script);
        if config.headless {
            command.arg("--headless");
        }

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| DriverError::SubprocessSpawn {
                script: config.script.clone(),
                source: e,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            DriverError::SessionIo("Failed to capture stdin of driver server".into())
        })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            DriverError::SessionIo("Failed to capture stdout of driver server".into())
        })?;

        let mut reader = BufReader::new(stdout);

        // Wait for the ready signal
        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|e| DriverError::SessionIo(format!("Failed to read ready signal: {}", e)))?;

        let response: DriverResponse =
            serde_json::from_str(line.trim()).map_err(|e| DriverError::JsonParse {
                context: "driver server ready signal".into(),
                source: e,
            })?;

        if !response.ok || response.ready != Some(true) {
            return Err(DriverError::Protocol {
                command: "launch".into(),
                error: "Did not receive ready signal from driver server".into(),
            });
        }

        Ok(BrowserSession {
            child,
            stdin,
            reader,
            timeout_ms: config.timeout_ms,
        })
    }

    /// Send a request and read the response.
    fn send(&mut self, request: &DriverRequest) -> Result<DriverResponse, DriverError> {
        let json = serde_json::to_string(request).map_err(|e| DriverError::JsonSerialize {
            context: "DriverRequest".into(),
            source: e,
        })?;

        writeln!(self.stdin, "{}", json).map_err(|e| {
            DriverError::SessionIo(format!("Failed to write to driver server stdin: {}", e))
        })?;

        self.stdin.flush().map_err(|e| {
            DriverError::SessionIo(format!("Failed to flush driver server stdin: {}", e))
        })?;

        let mut line = String::new();
        self.reader.read_line(&mut line).map_err(|e| {
            DriverError::SessionIo(format!("Failed to read from driver server stdout: {}", e))
        })?;

        if line.trim().is_empty() {
            return Err(DriverError::SessionIo(
                "Empty response from driver server (process may have died)".into(),
            ));
        }

        serde_json::from_str(line.trim()).map_err(|e| DriverError::JsonParse {
            context: "driver server response".into(),
            source: e,
        })
    }

    /// Send a request and verify it succeeded.
    fn send_ok(
        &mut self,
        request: &DriverRequest,
        command_name: &str,
    ) -> Result<DriverResponse, DriverError> {
        let response = self.send(request)?;
        if !response.ok {
            return Err(DriverError::Protocol {
                command: command_name.into(),
                error: response.error.unwrap_or_else(|| "Unknown error".into()),
            });
        }
        Ok(response)
    }

    fn action(
        &mut self,
        action: &'static str,
        scope: &Scope,
        selector: &Selector,
        value: Option<&str>,
        checked: Option<bool>,
    ) -> Result<(), DriverError> {
        let request = DriverRequest::Action {
            cmd: "action",
            action,
            scope: scope.handle(),
            selector,
            value,
            checked,
            timeout_ms: self.timeout_ms,
        };
        self.send_ok(&request, action)?;
        Ok(())
    }

    fn read_one(
        &mut self,
        read: &'static str,
        scope: &Scope,
        selector: &Selector,
    ) -> Result<DriverResponse, DriverError> {
        let request = DriverRequest::Read {
            cmd: "read",
            read,
            scope: scope.handle(),
            selector,
        };
        self.send_ok(&request, read)
    }

    /// Quit the browser session. Best-effort; the process may already be gone.
    pub fn quit(&mut self) -> Result<(), DriverError> {
        let _ = self.send(&DriverRequest::Quit { cmd: "quit" });
        let _ = self.child.wait();
        Ok(())
    }
}

impl UiDriver for BrowserSession {
    fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        let timeout_ms = self.timeout_ms;
        let request = DriverRequest::Navigate { cmd: "navigate", url, timeout_ms };
        self.send_ok(&request, "navigate")?;
        Ok(())
    }

    fn count(&mut self, scope: &Scope, selector: &Selector) -> Result<u32, DriverError> {
        let request = DriverRequest::Count {
            cmd: "count",
            scope: scope.handle(),
            selector,
        };
        let response = self.send_ok(&request, "count")?;
        Ok(response.count.unwrap_or(0))
    }

    fn click(&mut self, scope: &Scope, selector: &Selector) -> Result<(), DriverError> {
        self.action("click", scope, selector, None, None)
    }

    fn fill(&mut self, scope: &Scope, selector: &Selector, value: &str) -> Result<(), DriverError> {
        self.action("fill", scope, selector, Some(value), None)
    }

    fn is_checked(&mut self, scope: &Scope, selector: &Selector) -> Result<bool, DriverError> {
        let response = self.read_one("is_checked", scope, selector)?;
        Ok(response.checked.unwrap_or(false))
    }

    fn set_checked(
        &mut self,
        scope: &Scope,
        selector: &Selector,
        checked: bool,
    ) -> Result<(), DriverError> {
        self.action("set_checked", scope, selector, None, Some(checked))
    }

    fn input_value(&mut self, scope: &Scope, selector: &Selector) -> Result<String, DriverError> {
        let response = self.read_one("input_value", scope, selector)?;
        Ok(response.value.unwrap_or_default())
    }

    fn inner_text(&mut self, scope: &Scope, selector: &Selector) -> Result<String, DriverError> {
        let response = self.read_one("inner_text", scope, selector)?;
        Ok(response.value.unwrap_or_default())
    }

    fn select_by_value(
        &mut self,
        scope: &Scope,
        selector: &Selector,
        value: &str,
    ) -> Result<(), DriverError> {
        self.action("select_value", scope, selector, Some(value), None)
    }

    fn select_by_label(
        &mut self,
        scope: &Scope,
        selector: &Selector,
        label: &str,
    ) -> Result<(), DriverError> {
        self.action("select_label", scope, selector, Some(label), None)
    }

    fn wait_visible(&mut self, scope: &Scope, selector: &Selector) -> Result<(), DriverError> {
        self.action("wait_visible", scope, selector, None, None)
    }

    fn dialog_scope(&mut self, role: &str, name: &str) -> Result<Option<Scope>, DriverError> {
        let timeout_ms = self.timeout_ms;
        let request = DriverRequest::ScopeRole { cmd: "scope_role", role, name, timeout_ms };
        let response = self.send_ok(&request, "scope_role")?;
        Ok(response.scope.map(Scope::Node))
    }

    fn css_scope(&mut self, css: &str) -> Result<Option<Scope>, DriverError> {
        let timeout_ms = self.timeout_ms;
        let request = DriverRequest::ScopeCss { cmd: "scope_css", css, timeout_ms };
        let response = self.send_ok(&request, "scope_css")?;
        Ok(response.scope.map(Scope::Node))
    }

    fn press_key(&mut self, key: &str) -> Result<(), DriverError> {
        let request = DriverRequest::Press { cmd: "press", key };
        self.send_ok(&request, "press")?;
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Best-effort cleanup
        let _ = self.quit();
    }
}
