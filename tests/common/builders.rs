//! Test builders — ergonomic constructors for log lines and log files.
//!
//! These are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use std::path::PathBuf;

// ---------------------------------------------------------------------------
// LineBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a single Lighthouse-style log line.
///
/// ```rust
/// let line = LineBuilder::at("Apr 23 19:25:20")
///     .message("Requested blinded execution payload")
///     .field("relay_response_ms", 120)
///     .build();
/// ```
pub struct LineBuilder {
    ts: String,
    level: &'static str,
    message: String,
    fields: Vec<(String, String)>,
}

impl LineBuilder {
    pub fn at(ts: &str) -> Self {
        Self {
            ts: ts.to_string(),
            level: "INFO",
            message: String::new(),
            fields: Vec::new(),
        }
    }

    pub fn level(mut self, level: &'static str) -> Self {
        self.level = level;
        self
    }

    pub fn message(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }

    pub fn field(mut self, key: &str, value: impl std::fmt::Display) -> Self {
        self.fields.push((key.to_string(), value.to_string()));
        self
    }

    pub fn build(self) -> String {
        let fields = self
            .fields
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}.000 {} {}  {}", self.ts, self.level, self.message, fields)
    }
}

/// `Block broadcast was delayed` at `ts` with the given delay.
pub fn broadcast_delay(ts: &str, delay_ms: u64) -> String {
    LineBuilder::at(ts)
        .level("WARN")
        .message("Block broadcast was delayed")
        .field("delay_ms", delay_ms)
        .build()
}

/// `Signed block received in HTTP API` at `ts`.
pub fn signed_block(ts: &str) -> String {
    LineBuilder::at(ts)
        .message("Signed block received in HTTP API")
        .field("slot", 1)
        .build()
}

// ---------------------------------------------------------------------------
// Rotated log directory
// ---------------------------------------------------------------------------

/// A temp directory holding `beacon.log`, `beacon.log.1`, … files.
pub struct LogDir {
    dir: tempfile::TempDir,
}

impl LogDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp log dir"),
        }
    }

    /// Write `lines` to `name` and return its full path.
    pub fn write<S: AsRef<str>>(&self, name: &str, lines: &[S]) -> PathBuf {
        let path = self.join(name);
        let mut text = lines
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        text.push('\n');
        std::fs::write(&path, text).expect("write log file");
        path
    }

    /// Path of `name` inside the directory, whether or not it exists.
    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
