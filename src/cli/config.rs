use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "ui-settings",
    version,
    about = "Schema-driven settings applier and stability checker for web admin UIs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the Node.js Playwright driver server script
    #[arg(long, global = true)]
    pub driver_script: Option<String>,

    /// Path to config file (default: ui-settings.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply a desired-values map onto a schema through the live UI
    Apply {
        /// Path to the schema snapshot JSON
        #[arg(long, default_value = "dist/ui_schema.json")]
        schema: String,

        /// Path to the values JSON (settingKey -> value)
        #[arg(long, default_value = "values.json")]
        values: String,

        /// Output report path
        #[arg(long, default_value = "dist/apply_report.json")]
        report: String,

        /// Run the browser headless
        #[arg(long)]
        headless: bool,

        /// Per-action driver timeout in milliseconds
        #[arg(long, default_value_t = 15000)]
        timeout_ms: u64,

        /// JSONL trace log path (tracing off when omitted)
        #[arg(long)]
        trace: Option<String>,
    },

    /// Compare two schema captures and flag structural drift
    Stability {
        /// First schema snapshot path
        #[arg(long)]
        schema_a: Option<String>,

        /// Second schema snapshot path
        #[arg(long)]
        schema_b: Option<String>,

        /// Output report path
        #[arg(long, default_value = "dist/stability_report.json")]
        report: String,

        /// Record drift without failing the process
        #[arg(long)]
        allow_drift: bool,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `ui-settings.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub driver: DriverConfig,
    #[serde(default)]
    pub stability: StabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DriverConfig {
    /// Driver server script path; the session default applies when unset.
    pub script: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StabilityConfig {
    /// Fallback baseline snapshot compared when no pair is given on the CLI.
    #[serde(default = "default_baseline")]
    pub baseline: String,

    /// Fallback candidate snapshot compared against the baseline.
    #[serde(default = "default_candidate")]
    pub candidate: String,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            baseline: default_baseline(),
            candidate: default_candidate(),
        }
    }
}

// Serde default helpers
fn default_baseline() -> String { "dist/ui_schema.baseline.json".to_string() }
fn default_candidate() -> String { "dist/ui_schema.json".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("ui-settings.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}
