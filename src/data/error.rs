use thiserror::Error;

/// Schema problems found while preparing a freshly loaded table.
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("required column '{0}' is missing")]
    MissingColumn(String),

    #[error("row {row}: '{column}' is missing and cannot be converted to an integer")]
    MissingRating { row: usize, column: String },

    #[error("row {row}: '{column}' value '{value}' is not numeric")]
    NonNumericRating {
        row: usize,
        column: String,
        value: String,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}
