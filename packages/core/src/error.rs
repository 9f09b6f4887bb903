//! Error types for the value model.

use thiserror::Error;

/// Errors raised while binding or encoding merge values.
///
/// Every variant is detected locally, before anything is sent to the
/// service, and none of them carries a nested cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The arguments of an assignment do not describe a field, an image,
    /// a bulk mapping or a named block.
    #[error("incorrect parameters for assignment: {message}")]
    InvalidAssignment { message: String },

    /// A block name was empty.
    #[error("block name must be a non empty string")]
    InvalidBlockName,

    /// The block name was read before it was set.
    #[error("block name has not been set")]
    BlockNameNotSet,

    /// Values bound to a block are not a mapping or a sequence of mappings.
    #[error("invalid block value: {message}")]
    InvalidBlockValue { message: String },

    /// A field key was empty.
    #[error("field name must be a non empty string")]
    InvalidFieldKey,

    /// A field value was empty or not a finite number.
    #[error("value bound to '{key}' must be a non empty string or a finite number")]
    InvalidFieldValue { key: String },

    /// A block row does not bind the same keys as the first row.
    #[error("row {row} binds {found:?} but the header row binds {expected:?}")]
    InconsistentRow {
        row: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A tabular encoding was requested for zero rows.
    #[error("cannot encode a table without rows")]
    EmptyTable,
}

/// Result type alias for value model operations.
pub type Result<T> = std::result::Result<T, Error>;
