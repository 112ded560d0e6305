// ==========================================
// Nominal Compounds - Import Error Types
// ==========================================
// thiserror-derived taxonomy; row-scoped errors are caught at the row
// loop, sheet-scoped errors at the file loop, nothing aborts the run.
// ==========================================

use thiserror::Error;

/// Import error taxonomy.
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== row-scoped =====
    #[error("malformed cell (row {row}, column {col}): expected {expected}, found {found}")]
    MalformedCell {
        row: usize,
        col: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("missing field (row {row}): {field}")]
    MissingField { row: usize, field: &'static str },

    #[error("invariant violation (row {row}): {message}")]
    InvariantViolation { row: usize, message: String },

    // ===== sheet-scoped =====
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    // ===== ambient boundary =====
    #[error("workbook error: {0}")]
    Workbook(String),

    #[error("graph store error: {0}")]
    Graph(#[from] neo4rs::Error),

    #[error("file read error: {0}")]
    FileRead(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ImportError {
    /// Sheet-scoped errors abort the current sheet; everything else is a
    /// counted, logged per-row skip.
    pub fn is_sheet_fatal(&self) -> bool {
        matches!(self, ImportError::InvalidHeader(_) | ImportError::Workbook(_))
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileRead(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::Workbook(err.to_string())
    }
}

/// Result type alias for the importer layer.
pub type ImportResult<T> = Result<T, ImportError>;
