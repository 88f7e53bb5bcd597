use std::io;

use thiserror::Error;

/// Result alias used across the parser and query engine.
pub type Result<T> = std::result::Result<T, AddressBookError>;

/// Error type for address book ingestion and queries.
#[derive(Debug, Error)]
pub enum AddressBookError {
    /// Caller handed in a blank or unusable argument.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The source file could not be opened or read.
    #[error("file on provided path cannot be read: {path}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A row failed schema, gender or date validation.
    #[error("malformed record at line {line} ({row:?}): {reason}")]
    MalformedRecord {
        line: u64,
        row: String,
        reason: String,
    },

    #[error("persons list must be set before querying")]
    NotInitialized,

    /// Name resolution did not yield exactly one A/B pairing.
    #[error("no unique match for persons '{name_a}' and '{name_b}'")]
    AmbiguousOrMissingMatch { name_a: String, name_b: String },
}

impl AddressBookError {
    pub fn malformed(line: u64, row: impl Into<String>, reason: impl Into<String>) -> Self {
        AddressBookError::MalformedRecord {
            line,
            row: row.into(),
            reason: reason.into(),
        }
    }

    /// True for errors the report shell may downgrade to "no result".
    pub fn is_soft(&self) -> bool {
        matches!(self, AddressBookError::AmbiguousOrMissingMatch { .. })
    }
}
