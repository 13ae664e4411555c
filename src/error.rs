//! Error types for catalog loading and configuration.

use thiserror::Error;

/// Errors that can occur while fetching or parsing the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// I/O error while reading a local catalog
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The source answered, but not with a usable body
    #[error("Catalog unavailable from {source_name}: {reason}")]
    Unavailable {
        /// Human-readable description of the source
        source_name: String,
        /// Why the body could not be used
        reason: String,
    },

    /// The body is an HTML page, not a published sheet
    #[error("Catalog source returned HTML; publish it as TSV or CSV")]
    HtmlResponse,

    /// A required column is not present in the header row
    #[error("Missing required column: {column}")]
    MissingColumn {
        /// Name of the missing column
        column: String,
    },
}

impl CatalogError {
    /// Create an unavailable-source error.
    pub fn unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }
}

/// Errors raised while loading a [`ToolConfig`](crate::ToolConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
