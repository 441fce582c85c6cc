//! Schema loading error types

use std::path::PathBuf;

/// Errors that can occur while building or loading a form schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema file could not be read.
    #[error("Failed to read schema {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema document is not valid JSON or has the wrong shape.
    #[error("Schema parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field was declared without a name.
    #[error("Field at position {index} has an empty name")]
    EmptyName { index: usize },

    /// Two fields share the same name.
    #[error("Duplicate field name '{name}'")]
    DuplicateField { name: String },
}

impl SchemaError {
    /// Creates a new I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a new duplicate field error.
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateField { name: name.into() }
    }
}
