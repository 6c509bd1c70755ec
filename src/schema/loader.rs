use std::path::Path;

use serde_json::{Map, Value};

use crate::schema::schema_model::Schema;

// ============================================================================
// JSON document loading
// ============================================================================

/// Read and parse a schema snapshot from disk.
pub fn load_schema(path: &Path) -> Result<Schema, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read schema {}: {}", path.display(), e))?;
    let schema: Schema = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid schema JSON {}: {}", path.display(), e))?;
    Ok(schema)
}

/// Load a desired-values document: either a flat `identifier -> value` map
/// or the same map wrapped as `{"values": {...}}`.
pub fn load_values(path: &Path) -> Result<Map<String, Value>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read values {}: {}", path.display(), e))?;
    let raw: Value = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid values JSON {}: {}", path.display(), e))?;

    if let Some(Value::Object(values)) = raw.get("values") {
        return Ok(values.clone());
    }
    match raw {
        Value::Object(values) => Ok(values),
        _ => Err(format!("Unsupported values payload: {}", path.display()).into()),
    }
}

/// SHA-1 fingerprint of a file's raw bytes, recorded in reports so two runs
/// can be traced back to the exact inputs they saw.
pub fn file_fingerprint(path: &Path) -> Option<String> {
    use sha1::{Digest, Sha1};

    let bytes = std::fs::read(path).ok()?;
    let mut hasher = Sha1::new();
    hasher.update(&bytes);
    Some(format!("{:x}", hasher.finalize()))
}
