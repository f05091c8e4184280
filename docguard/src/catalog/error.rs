//! Error types for catalog loading and validation

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or loading a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Two entries share the same id
    #[error("Duplicate catalog id '{id}'")]
    DuplicateId {
        /// The repeated id
        id: String,
    },

    /// An entry has an empty or whitespace-only id
    #[error("Catalog entry '{title}' has an empty id")]
    EmptyId {
        /// Title of the offending entry
        title: String,
    },

    /// IO error when reading a catalog file
    #[error("IO error reading {path}: {source}", path = .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing a TOML catalog
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Error parsing a JSON catalog
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Catalog file extension is neither .toml nor .json
    #[error("Unsupported catalog format for {path} (expected .toml or .json)", path = .path.display())]
    UnsupportedFormat {
        /// The catalog file path
        path: PathBuf,
    },
}
