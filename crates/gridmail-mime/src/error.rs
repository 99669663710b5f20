//! Error types for MIME construction.

/// Result type alias for MIME operations.
pub type Result<T> = std::result::Result<T, Error>;

/// MIME construction error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Mailbox address failed validation.
    #[error("Invalid mailbox address: {0}")]
    InvalidAddress(String),
}
