use serde::Serialize;

use crate::types::TagKind;

/// Errors that abort an extraction run.
///
/// None of these are recoverable: a malformed block stops the scan and no
/// record is produced for it.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Unknown mode '{0}' (expected one of: data, rpc, version, events, changelog, property)")]
    UnknownMode(String),

    #[error("{kind} block opened at line {line} ended before '{expected}' was found")]
    TruncatedBlock {
        kind: TagKind,
        line: usize,
        expected: &'static str,
    },

    #[error("{kind} block opened at line {line}: expected '{expected}' on line {found_at}")]
    MalformedHeader {
        kind: TagKind,
        line: usize,
        found_at: usize,
        expected: &'static str,
    },

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;

/// A non-fatal note about the input, reported alongside extracted records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 1-based line the note refers to.
    pub line: usize,
    pub message: String,
}
