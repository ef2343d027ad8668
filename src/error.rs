use thiserror::Error;

/// Custom Result type for vectable operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for vectable
///
/// `Clone` so that a failed registry initialization can be handed to every caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed decimal literal or encoded vector
    #[error("parse error {0}")]
    Parse(String),
    #[error("invalid schema {0}")]
    InvalidSchema(String),
    #[error("table {0} does not exist")]
    TableNotFound(String),
    #[error("function {0} does not exist")]
    FunctionNotFound(String),
    #[error("invalid argument {0}")]
    InvalidArgument(String),
    /// A decimal result does not fit the narrower type it is returned as
    #[error("arithmetic overflow in {0}")]
    Overflow(String),
    /// A table loader failed while the registry was initializing
    #[error("loading table {table} failed: {reason}")]
    Load { table: String, reason: String },
    #[error("invalid config {0}")]
    Config(String),
    #[error("internal error {0}")]
    Internal(String),
}
