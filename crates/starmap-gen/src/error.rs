//! Error types for starmap-gen.

use thiserror::Error;

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a star map.
#[derive(Debug, Error)]
pub enum Error {
    /// The lattice rejected an operation.
    #[error("lattice error: {0}")]
    Lattice(#[from] starmap_lattice::Error),

    /// A configuration value could not be parsed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
