use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// One line in the apply-run trace log (JSONL).
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    RunStarted {
        timestamp_ms: u128,
        containers: usize,
        values: usize,
    },
    ContainerOpened {
        timestamp_ms: u128,
        container_key: String,
        modal: bool,
    },
    OutcomeRecorded {
        timestamp_ms: u128,
        setting_key: String,
        status: String,
        detail: String,
    },
    ContainerSaved {
        timestamp_ms: u128,
        container_key: String,
    },
    RunFinished {
        timestamp_ms: u128,
        applied: usize,
        skipped: usize,
        failed: usize,
    },
}

pub fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
