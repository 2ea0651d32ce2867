//! Error types for the docugraph library.

use std::io;
use thiserror::Error;

/// Result type alias for docugraph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while resolving a block graph.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading a response file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The payload is not valid response JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field required for resolution is absent on a block.
    #[error("block {block_id} is missing required field {field}")]
    MissingField {
        /// Id of the offending block
        block_id: String,
        /// Name of the absent field
        field: &'static str,
    },

    /// A relationship references an id that is not in the block map.
    #[error("block not found: {0}")]
    BlockNotFound(String),

    /// A document-page block list contains no PAGE block.
    #[error("page block list contains no PAGE block")]
    MissingPageBlock,
}

impl Error {
    pub(crate) fn missing_field(block_id: impl Into<String>, field: &'static str) -> Self {
        Error::MissingField {
            block_id: block_id.into(),
            field,
        }
    }
}
