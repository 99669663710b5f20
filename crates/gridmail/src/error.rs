//! Error types for message validation and delivery.

/// Result type alias for gridmail operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while composing or sending a message.
///
/// The validation variants reject a message before any network activity;
/// [`Error::Service`] wraps any failure in the connect/authenticate/submit
/// sequence, with the underlying cause preserved as `source()`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither a text nor an HTML body was provided.
    #[error("message has neither a text nor an HTML body")]
    MissingBody,

    /// The message has no To recipients.
    #[error("message has no recipients")]
    NoRecipients,

    /// A custom header entry failed validation; the whole message is
    /// rejected, not just the offending entry.
    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader {
        /// Name of the first offending header.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A sender or recipient address failed validation.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The X-SMTPAPI block could not be serialized to JSON.
    #[error("X-SMTPAPI serialization failed: {0}")]
    SmtpApi(#[from] serde_json::Error),

    /// A failure while talking to the relay (connect, STARTTLS,
    /// authenticate, submit, or quit).
    #[error("SMTP service error: {0}")]
    Service(#[from] gridmail_smtp::Error),
}
