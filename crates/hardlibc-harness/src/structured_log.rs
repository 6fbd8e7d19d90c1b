//! Structured logging for verification runs.
//!
//! Provides:
//! - [`LogEntry`]: canonical JSONL log record with required + optional fields.
//! - [`LogEmitter`]: writes JSONL lines to a file or stdout.
//! - [`validate_log_line`] / [`validate_log_file`]: schema validation.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Severity level for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// Verification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
    Error,
}

/// Canonical structured log entry.
///
/// Required fields: `timestamp`, `level`, `event`. Optional fields carry
/// per-case context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    // Required
    pub timestamp: String,
    pub level: LogLevel,
    pub event: String,

    // Optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl LogEntry {
    /// A minimal entry with the required fields only.
    pub fn new(timestamp: impl Into<String>, level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            level,
            event: event.into(),
            family: None,
            case: None,
            outcome: None,
            detail: None,
        }
    }
}

/// Writes JSONL entries to a file or stdout.
pub struct LogEmitter {
    sink: Box<dyn Write>,
}

impl LogEmitter {
    /// Emitter appending to the file at `path`.
    pub fn to_file(path: &Path) -> std::io::Result<Self> {
        let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { sink: Box::new(file) })
    }

    /// Emitter writing to stdout.
    pub fn to_stdout() -> Self {
        Self { sink: Box::new(std::io::stdout()) }
    }

    /// Serializes one entry as a JSONL line.
    pub fn emit(&mut self, entry: &LogEntry) -> std::io::Result<()> {
        let line = serde_json::to_string(entry)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
        writeln!(self.sink, "{line}")
    }
}

/// Validates a single JSONL line against the schema.
pub fn validate_log_line(line: &str) -> Result<LogEntry, serde_json::Error> {
    serde_json::from_str(line)
}

/// Validates an entire JSONL file; returns the entry count.
pub fn validate_log_file(path: &Path) -> Result<usize, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let mut count = 0;
    for line in content.lines().filter(|line| !line.trim().is_empty()) {
        validate_log_line(line)?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_roundtrip() {
        let mut entry = LogEntry::new("1754000000", LogLevel::Info, "case_verified");
        entry.family = Some("stdlib/parse".to_string());
        entry.case = Some("hex_26".to_string());
        entry.outcome = Some(Outcome::Pass);

        let line = serde_json::to_string(&entry).unwrap();
        let back = validate_log_line(&line).unwrap();
        assert_eq!(back.event, "case_verified");
        assert_eq!(back.outcome, Some(Outcome::Pass));
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let entry = LogEntry::new("1754000000", LogLevel::Warn, "campaign_started");
        let line = serde_json::to_string(&entry).unwrap();
        assert!(!line.contains("family"));
        assert!(!line.contains("outcome"));
    }

    #[test]
    fn test_invalid_line_is_rejected() {
        assert!(validate_log_line("{\"event\":\"missing fields\"}").is_err());
        assert!(validate_log_line("not json").is_err());
    }
}
