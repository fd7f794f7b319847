//! Error kinds raised by the aggregation engine.
//!
//! Only [`Error::MalformedTimestamp`] ever reaches a caller of the public
//! entry points. The other variants are built inside the scan loop, logged,
//! counted in [`ScanStats`](crate::scan::ScanStats) and dropped.

/// Errors produced while resolving a window or reading log sources.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The target timestamp does not look like `Apr-23-2025 07:25:25 PM`.
    #[error("malformed target timestamp {input:?} (expected e.g. \"Apr-23-2025 07:25:25 PM\")")]
    MalformedTimestamp {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A line's leading `Mon DD HH:MM:SS` fragment matched the prefix pattern
    /// but did not parse as a date (bad month name, Feb 29 in a common year).
    #[error("unparseable log timestamp {raw:?}: {source}")]
    UnparseableLogTimestamp {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A log source could not be opened, or failed part-way through reading.
    #[error("log source {name} unavailable: {source}")]
    SourceUnavailable {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
