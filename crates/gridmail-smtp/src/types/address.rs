//! Envelope address type.

use crate::error::{Error, Result};

/// Email address for the SMTP envelope (MAIL FROM / RCPT TO).
///
/// Envelope addresses must be ASCII; internationalized display names never
/// reach the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Creates a new envelope address.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is empty, non-ASCII, or not of the
    /// form `local@domain`.
    pub fn new(addr: impl Into<String>) -> Result<Self> {
        let addr = addr.into();

        if addr.is_empty() {
            return Err(Error::InvalidAddress("address is empty".into()));
        }

        if !addr.is_ascii() {
            return Err(Error::InvalidAddress(format!(
                "address {addr:?} contains non-ASCII characters"
            )));
        }

        if addr.contains(|c: char| c.is_ascii_control() || c == '<' || c == '>') {
            return Err(Error::InvalidAddress(format!(
                "address {addr:?} contains forbidden characters"
            )));
        }

        match addr.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {}
            _ => {
                return Err(Error::InvalidAddress(format!(
                    "address {addr:?} is not of the form local@domain"
                )));
            }
        }

        Ok(Self(addr))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
