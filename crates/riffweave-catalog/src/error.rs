//! Error types for catalog loading and lookup.

use std::path::PathBuf;

use thiserror::Error;

use crate::role::CellRole;

/// Common interface for reportable Riffweave errors.
///
/// Every error enum in the workspace implements this so the CLI can print
/// a stable code alongside the message.
pub trait ErrorCode: std::error::Error {
    /// Stable error code, e.g. "CATALOG_001".
    fn code(&self) -> &'static str;

    /// Human-readable message, normally the `Display` output.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Grouping for related errors, e.g. "catalog" or "generate".
    fn category(&self) -> &'static str;
}

/// Errors raised while reading or querying a catalog set.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file is not valid JSON of the expected shape.
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A cell contains a note name that cannot be parsed.
    #[error("Invalid note {note:?} in {role} cell {cell}")]
    InvalidNote {
        role: CellRole,
        cell: usize,
        note: String,
    },

    /// A cell has no notes.
    #[error("Empty cell in {role} at index {cell}")]
    EmptyCell { role: CellRole, cell: usize },

    /// The file names a role that does not exist.
    #[error("Unknown cell role: {0:?}")]
    UnknownRole(String),

    /// A role needed for generation is absent from the set.
    #[error("Missing catalog for role: {0}")]
    MissingRole(CellRole),

    /// Reading the catalog file failed.
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ErrorCode for CatalogError {
    fn code(&self) -> &'static str {
        match self {
            CatalogError::Json(_) => "CATALOG_001",
            CatalogError::InvalidNote { .. } => "CATALOG_002",
            CatalogError::EmptyCell { .. } => "CATALOG_003",
            CatalogError::UnknownRole(_) => "CATALOG_004",
            CatalogError::MissingRole(_) => "CATALOG_005",
            CatalogError::Io { .. } => "CATALOG_006",
        }
    }

    fn category(&self) -> &'static str {
        "catalog"
    }
}
