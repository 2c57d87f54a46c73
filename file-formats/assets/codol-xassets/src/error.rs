//! Error types for animation and model decoding

use thiserror::Error;

/// Result type alias for decoder operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for decoder operations
#[derive(Error, Debug)]
pub enum Error {
    /// The requested LOD index does not exist on the model
    #[error("no LODs available on model")]
    NoLods,

    /// A descriptor field named a format variant this decoder does not
    /// implement
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A submesh's `material_index` does not point at an entry in its
    /// LOD's material list
    #[error("submesh material index {0} out of range")]
    InvalidMaterialIndex(i32),
}
