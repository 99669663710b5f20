//! Mailbox rendering for address headers.

use crate::encoding::HeaderValue;
use crate::error::{Error, Result};
use std::fmt;

/// A mailbox: an email address with an optional display name.
///
/// The address itself must be ASCII; only the display name may carry
/// non-ASCII text, which is rendered in encoded-word form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    /// Display name (optional).
    pub name: Option<String>,
    /// Email address (ASCII).
    pub address: String,
}

impl Mailbox {
    /// Creates a mailbox without a display name.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is empty, non-ASCII, or not of the
    /// form `local@domain`.
    pub fn new(address: impl Into<String>) -> Result<Self> {
        let address = address.into();
        validate_address(&address)?;
        Ok(Self {
            name: None,
            address,
        })
    }

    /// Creates a mailbox with a display name.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid.
    pub fn with_name(name: impl Into<String>, address: impl Into<String>) -> Result<Self> {
        let mut mailbox = Self::new(address)?;
        mailbox.name = Some(name.into());
        Ok(mailbox)
    }
}

fn validate_address(address: &str) -> Result<()> {
    if address.is_empty() {
        return Err(Error::InvalidAddress("address is empty".to_string()));
    }

    if !address.is_ascii() {
        return Err(Error::InvalidAddress(format!(
            "address {address:?} contains non-ASCII characters"
        )));
    }

    let Some((local, domain)) = address.split_once('@') else {
        return Err(Error::InvalidAddress(format!(
            "address {address:?} is missing '@'"
        )));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(Error::InvalidAddress(format!(
            "address {address:?} is malformed"
        )));
    }

    Ok(())
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let address = &self.address;
        match &self.name {
            None => write!(f, "{address}"),
            Some(name) => match HeaderValue::encode(name) {
                HeaderValue::Plain(plain) => {
                    let escaped = plain.replace('\\', "\\\\").replace('"', "\\\"");
                    write!(f, "\"{escaped}\" <{address}>")
                }
                HeaderValue::Encoded(word) => write!(f, "{word} <{address}>"),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_address() {
        let mailbox = Mailbox::new("user@example.com").unwrap();
        assert_eq!(mailbox.to_string(), "user@example.com");
    }

    #[test]
    fn test_ascii_display_name_is_quoted() {
        let mailbox = Mailbox::with_name("Alice", "a@x.com").unwrap();
        assert_eq!(mailbox.to_string(), "\"Alice\" <a@x.com>");
    }

    #[test]
    fn test_display_name_quotes_escaped() {
        let mailbox = Mailbox::with_name("A \"B\" C", "a@x.com").unwrap();
        assert_eq!(mailbox.to_string(), "\"A \\\"B\\\" C\" <a@x.com>");
    }

    #[test]
    fn test_non_ascii_display_name_is_encoded() {
        let mailbox = Mailbox::with_name("Andr\u{e9}", "andre@example.com").unwrap();
        let rendered = mailbox.to_string();
        assert!(rendered.starts_with("=?utf-8?B?"));
        assert!(rendered.ends_with(" <andre@example.com>"));
        assert!(rendered.is_ascii());
    }

    #[test]
    fn test_rejects_non_ascii_address() {
        assert!(Mailbox::new("andr\u{e9}@example.com").is_err());
    }

    #[test]
    fn test_rejects_malformed_address() {
        assert!(Mailbox::new("").is_err());
        assert!(Mailbox::new("nodomain").is_err());
        assert!(Mailbox::new("@example.com").is_err());
        assert!(Mailbox::new("user@").is_err());
        assert!(Mailbox::new("a@b@c").is_err());
    }
}
