//! Error types for the catalog readers.

use thiserror::Error;

use crate::core::SqlType;

/// Process exit code for configuration errors.
pub const EXIT_CONFIG_ERROR: u8 = 1;

/// Process exit code for unknown views or columns.
pub const EXIT_LOOKUP_ERROR: u8 = 2;

/// Process exit code for row mapping failures.
pub const EXIT_MAPPING_ERROR: u8 = 3;

/// Process exit code for file system errors.
pub const EXIT_IO_ERROR: u8 = 7;

/// Main error type for catalog reader operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A typed getter was called on a column holding a different type.
    #[error("Type mismatch at ordinal {ordinal} ({column}): expected {expected}, found {found}")]
    TypeMismatch {
        ordinal: usize,
        column: String,
        expected: SqlType,
        found: SqlType,
    },

    /// A non-nullable getter was called on a SQL NULL.
    #[error("Unexpected NULL at ordinal {ordinal} ({column})")]
    UnexpectedNull { ordinal: usize, column: String },

    /// Ordinal past the end of the row.
    #[error("Ordinal {ordinal} is out of range (row has {field_count} fields)")]
    OrdinalOutOfRange { ordinal: usize, field_count: usize },

    /// Column access before the first `read()` or after the last row.
    #[error("No current row: call read() and check that it returned true")]
    NoCurrentRow,

    /// Access after the reader or cursor was disposed.
    #[error("Reader is closed")]
    ReaderClosed,

    /// Cursor layout does not match the view descriptor.
    #[error("Layout mismatch for {view}: {message}")]
    LayoutMismatch { view: String, message: String },

    /// No column with the given name.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// No view with the given name in the catalog.
    #[error("Unknown catalog view: {0}")]
    UnknownView(String),

    /// Malformed in-memory or serialized result set.
    #[error("Invalid result set: {0}")]
    InvalidResultSet(String),

    /// Configuration error (invalid YAML, bad glob pattern, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error raised by the SQL Server driver while decoding a result set
    #[error("Source database error: {0}")]
    Source(#[from] tiberius::error::Error),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// Create a LayoutMismatch error
    pub fn layout(view: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::LayoutMismatch {
            view: view.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidResultSet error
    pub fn invalid_result_set(message: impl Into<String>) -> Self {
        CatalogError::InvalidResultSet(message.into())
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CatalogError::Config(_) | CatalogError::Yaml(_) => EXIT_CONFIG_ERROR,
            CatalogError::UnknownView(_) | CatalogError::UnknownColumn(_) => EXIT_LOOKUP_ERROR,
            CatalogError::Io(_) => EXIT_IO_ERROR,
            _ => EXIT_MAPPING_ERROR,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
