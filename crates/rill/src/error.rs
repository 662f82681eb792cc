//! Error and Result types for Rill ingestion operations.

use std::io;
use thiserror::Error;

/// A convenience `Result` type for Rill operations.
pub type Result<T> = std::result::Result<T, RillError>;

/// The error type for ingestion operations.
///
/// Every variant is fatal for a run: the workload is a single deterministic
/// pass over a stream, so there is nothing to retry against.
#[derive(Debug, Error)]
pub enum RillError {
    /// Trie node arena capacity reached while interning a key.
    #[error("Trie node arena full: capacity {capacity} nodes exceeded")]
    TrieNodesFull {
        /// Configured maximum number of trie nodes.
        capacity: usize,
    },

    /// Station table capacity reached while issuing a fresh key id.
    #[error("Station table full: capacity {capacity} distinct keys exceeded")]
    StationTableFull {
        /// Configured maximum number of distinct keys.
        capacity: usize,
    },

    /// Record line contained no `;` separator.
    #[error("Malformed record: missing ';' separator in {0:?}")]
    MissingSeparator(String),

    /// Record key was empty.
    #[error("Malformed record: empty key")]
    EmptyKey,

    /// Value text was not a signed one-decimal fixed-point number.
    #[error("Malformed record: invalid measurement {0:?}")]
    InvalidValue(String),

    /// Input line exceeded the configured line buffer bound.
    #[error("Line exceeds maximum length of {limit} bytes")]
    LineTooLong {
        /// Configured maximum line length, excluding the terminator.
        limit: usize,
    },

    /// Underlying I/O error reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
