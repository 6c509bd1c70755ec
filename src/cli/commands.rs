use std::path::Path;

use serde::Serialize;

use crate::apply::engine::apply_values;
use crate::browser::session::{BrowserSession, SessionConfig};
use crate::cli::config::StabilityConfig;
use crate::drift::compare::compare_schemas;
use crate::report::console::{format_apply_summary, format_drift_summary};
use crate::report::report_model::{ApplyReport, StabilityReport, utc_now_iso};
use crate::schema::loader::{file_fingerprint, load_schema, load_values};
use crate::trace::logger::TraceLogger;

// ============================================================================
// apply subcommand
// ============================================================================

/// Apply desired values through the live UI and return whether every
/// outcome succeeded. A report is written even when outcomes failed; only
/// the returned bool feeds the process exit status.
#[allow(clippy::too_many_arguments)]
pub fn cmd_apply(
    schema: &str,
    values: &str,
    report: &str,
    headless: bool,
    timeout_ms: u64,
    trace: Option<&str>,
    driver_script: Option<&str>,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let schema_doc = load_schema(Path::new(schema))?;
    let values_map = load_values(Path::new(values))?;
    let fingerprint = file_fingerprint(Path::new(schema));

    let tracer = match trace {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    if verbose > 0 {
        eprintln!(
            "Applying {} desired value(s) from {} onto {}...",
            values_map.len(),
            values,
            schema
        );
    }

    let mut session_config = SessionConfig { headless, timeout_ms, ..SessionConfig::default() };
    if let Some(script) = driver_script {
        session_config.script = script.to_string();
    }
    let mut session = BrowserSession::launch(&session_config)?;

    let (outcomes, saved_containers) = apply_values(&mut session, &schema_doc, &values_map, &tracer);
    session.quit()?;

    let report_doc = ApplyReport::from_outcomes(schema, values, fingerprint, outcomes, saved_containers);
    write_report(report, &report_doc)?;

    println!("Wrote {}", report);
    print!("{}", format_apply_summary(&report_doc));
    Ok(report_doc.all_ok())
}

// ============================================================================
// stability subcommand
// ============================================================================

/// Compare two schema captures and return whether the process should pass:
/// drift only fails the run when it was not explicitly allowed.
pub fn cmd_stability(
    schema_a: Option<&str>,
    schema_b: Option<&str>,
    report: &str,
    allow_drift: bool,
    fallback: &StabilityConfig,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let (first_path, second_path) = resolve_schema_pair(schema_a, schema_b, fallback)?;

    if verbose > 0 {
        eprintln!("Comparing {} against {}...", first_path, second_path);
    }

    let first = load_schema(Path::new(&first_path))?;
    let second = load_schema(Path::new(&second_path))?;
    let diff = compare_schemas(&first, &second);
    let drift_detected = diff.has_drift();

    let schema_a_fingerprint = file_fingerprint(Path::new(&first_path));
    let schema_b_fingerprint = file_fingerprint(Path::new(&second_path));
    let report_doc = StabilityReport {
        generated_at: utc_now_iso(),
        schema_a: first_path,
        schema_b: second_path,
        schema_a_fingerprint,
        schema_b_fingerprint,
        allow_drift,
        drift_detected,
        diff,
    };
    write_report(report, &report_doc)?;

    println!("Wrote {}", report);
    print!("{}", format_drift_summary(&report_doc));
    Ok(!drift_detected || allow_drift)
}

/// Pick the snapshot pair: explicit paths win, otherwise the configured
/// baseline/candidate pair when both exist on disk.
fn resolve_schema_pair(
    schema_a: Option<&str>,
    schema_b: Option<&str>,
    fallback: &StabilityConfig,
) -> Result<(String, String), Box<dyn std::error::Error>> {
    match (schema_a, schema_b) {
        (Some(a), Some(b)) => Ok((a.to_string(), b.to_string())),
        (None, None) => {
            if Path::new(&fallback.baseline).exists() && Path::new(&fallback.candidate).exists() {
                Ok((fallback.baseline.clone(), fallback.candidate.clone()))
            } else {
                Err(format!(
                    "Provide --schema-a/--schema-b, or create {} + {}.",
                    fallback.baseline, fallback.candidate
                )
                .into())
            }
        }
        _ => Err("Provide both --schema-a and --schema-b.".into()),
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Write a report document as pretty JSON with a trailing newline, creating
/// parent directories as needed.
pub fn write_report<T: Serialize>(path: &str, report: &T) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    std::fs::write(path, json)?;
    Ok(())
}
