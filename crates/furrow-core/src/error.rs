//! Error types for the planning engine.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::SequenceIssue;

/// Kind of entity a lookup failed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Planting,
    Bed,
    ResourceGroup,
    Sequence,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Planting => "Planting",
            EntityKind::Bed => "Bed",
            EntityKind::ResourceGroup => "Resource group",
            EntityKind::Sequence => "Sequence",
        };
        f.write_str(name)
    }
}

/// Comprehensive error type for all planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Unknown bed, resource group, sequence or planting
    #[error("{kind} '{id}' not found")]
    NotFound { kind: EntityKind, id: String },
    /// A requested edit would break a plan invariant; nothing was applied
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// A sequence failed its structural invariant during a normal edit
    #[error(
        "Sequence '{sequence_id}' is corrupted ({}); run `furrow repair --sequence {sequence_id}` first",
        format_issues(.issues)
    )]
    CorruptedSequence {
        sequence_id: String,
        issues: Vec<SequenceIssue>,
    },
    /// Footage requirement exceeds the contiguous beds left in the row
    #[error(
        "Planting '{planting_id}' needs {feet_needed}ft but only {feet_available}ft of contiguous beds are available"
    )]
    IncompleteSpan {
        planting_id: String,
        feet_needed: u32,
        feet_available: u32,
    },
    /// Date arithmetic left the supported calendar range
    #[error("Date out of range: {source}")]
    DateOutOfRange {
        #[from]
        source: jiff::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

fn format_issues(issues: &[SequenceIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a lookup failure for the given entity.
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// True for errors the caller should answer by running the repair tool.
    pub fn needs_repair(&self) -> bool {
        matches!(self, Self::CorruptedSequence { .. })
    }
}

/// Specialized extension trait for file-system Results.
pub trait IoResultExt<T> {
    /// Attach the offending path to an I/O error.
    fn fs_context(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| PlannerError::FileSystem {
            path: path.into(),
            source,
        })
    }
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;
