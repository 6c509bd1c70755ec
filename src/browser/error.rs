use std::fmt;

#[derive(Debug)]
pub enum DriverError {
    /// Node.js driver server failed to spawn
    SubprocessSpawn { script: String, source: std::io::Error },

    /// stdin/stdout plumbing to the driver server failed
    SessionIo(String),

    /// JSON parsing failed (driver server response)
    JsonParse { context: String, source: serde_json::Error },

    /// JSON serialization failed (request to the driver server)
    JsonSerialize { context: String, source: serde_json::Error },

    /// The driver server reported a command failure (timeout, detached
    /// element, navigation error, ...)
    Protocol { command: String, error: String },
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::SubprocessSpawn { script, source } => {
                write!(f, "Failed to spawn {} (is Node.js installed?): {}", script, source)
            }
            DriverError::SessionIo(msg) => {
                write!(f, "Driver session I/O error: {}", msg)
            }
            DriverError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            DriverError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            DriverError::Protocol { command, error } => {
                write!(f, "Driver command '{}' failed: {}", command, error)
            }
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::SubprocessSpawn { source, .. } => Some(source),
            DriverError::JsonParse { source, .. } => Some(source),
            DriverError::JsonSerialize { source, .. } => Some(source),
            _ => None,
        }
    }
}
