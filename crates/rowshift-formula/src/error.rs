//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while translating formulas
#[derive(Debug, Error)]
pub enum FormulaError {
    /// The requested translation is not available
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}
