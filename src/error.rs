//! Error taxonomy shared by parsing, loading and persisting.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{FieldName, Position};

/// Every failure the store can report.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A line does not match the record shape or carries an impossible date.
    #[error(
        "malformed record{}: {reason}: {line:?}",
        .line_number.map(|n| format!(" on line {n}")).unwrap_or_default()
    )]
    MalformedRecord {
        /// Offending line text, without its terminator.
        line: String,
        /// 1-based line number when the line came from a file.
        line_number: Option<usize>,
        /// Short description of what failed.
        reason: &'static str,
    },

    /// A load was requested without a path and none was configured before.
    #[error("no postcard file configured")]
    NoFileConfigured,

    /// The backing file does not exist.
    #[error("postcard file not found: {}", .path.display())]
    FileNotFound {
        /// Path that was opened.
        path: PathBuf,
    },

    /// Any other I/O failure on the backing file.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A draft field cannot be represented in the line format.
    #[error("invalid {field}: {value:?}")]
    InvalidField {
        /// Name of the rejected field.
        field: FieldName,
        /// Rejected value.
        value: String,
    },

    /// Snapshot positions are not the contiguous range `0..n`.
    #[error("snapshot entry out of order: expected position {expected}, found {found}")]
    InvalidSnapshot {
        /// Position required at this slot.
        expected: Position,
        /// Position actually stored.
        found: Position,
    },
}

impl StoreError {
    pub(crate) fn malformed(line: &str, reason: &'static str) -> Self {
        Self::MalformedRecord {
            line: line.to_string(),
            line_number: None,
            reason,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// Tags a parse failure with the file line it came from.
    pub(crate) fn at_line(self, number: usize) -> Self {
        match self {
            Self::MalformedRecord { line, reason, .. } => Self::MalformedRecord {
                line,
                line_number: Some(number),
                reason,
            },
            other => other,
        }
    }
}

/// Result alias used across the crate.
pub type StoreResult<T> = Result<T, StoreError>;
