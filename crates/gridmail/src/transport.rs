//! SMTP relay transport.

use crate::compose::{BodyEncoding, Envelope, compose};
use crate::error::Result;
use crate::message::Message;
use gridmail_smtp::{Client, connect};

/// Default relay host.
pub const DEFAULT_HOST: &str = "smtp.sendgrid.net";
/// Default submission port.
pub const DEFAULT_PORT: u16 = 587;

/// Hostname announced in EHLO.
const CLIENT_HOSTNAME: &str = "localhost";

/// Transport for sending messages through the SendGrid SMTP relay.
///
/// Each [`send`](Self::send) composes the message and performs one full
/// connection round trip: connect, EHLO, optional STARTTLS, AUTH PLAIN,
/// submit, QUIT. No state is shared between sends and nothing is retried.
#[derive(Debug, Clone)]
pub struct Transport {
    host: String,
    port: u16,
    username: String,
    password: String,
    starttls: bool,
    body_encoding: BodyEncoding,
}

impl Transport {
    /// Creates a transport for the default relay endpoint with STARTTLS
    /// enabled.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            username: username.into(),
            password: password.into(),
            starttls: true,
            body_encoding: BodyEncoding::default(),
        }
    }

    /// Overrides the relay host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Overrides the relay port.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables or disables the STARTTLS upgrade (enabled by default).
    #[must_use]
    pub const fn starttls(mut self, enabled: bool) -> Self {
        self.starttls = enabled;
        self
    }

    /// Sets the transfer encoding used for text and HTML bodies.
    #[must_use]
    pub const fn body_encoding(mut self, encoding: BodyEncoding) -> Self {
        self.body_encoding = encoding;
        self
    }

    /// Composes a message into an envelope without sending it.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a message with no body, no recipients,
    /// an invalid address, or an invalid extra-header entry.
    pub fn compose(&self, message: &Message) -> Result<Envelope> {
        compose(message, self.body_encoding)
    }

    /// Composes and sends a message.
    ///
    /// Validation failures surface before any network activity; any failure
    /// while talking to the relay is wrapped in
    /// [`Error::Service`](crate::Error::Service).
    ///
    /// # Errors
    ///
    /// Returns an error if composition fails or any step of the delivery
    /// sequence is rejected.
    pub async fn send(&self, message: &Message) -> Result<()> {
        let envelope = self.compose(message)?;

        tracing::debug!(
            sender = %envelope.sender,
            recipients = envelope.recipients.len(),
            "delivering message"
        );
        self.deliver(&envelope).await?;
        tracing::debug!(sender = %envelope.sender, "message delivered");

        Ok(())
    }

    async fn deliver(&self, envelope: &Envelope) -> gridmail_smtp::Result<()> {
        let stream = connect(&self.host, self.port).await?;
        let client = Client::from_stream(stream).await?;
        let mut client = client.ehlo(CLIENT_HOSTNAME).await?;

        if self.starttls {
            client = client.starttls(&self.host).await?;
        }

        let client = client.auth_plain(&self.username, &self.password).await?;
        let client = client
            .submit(
                &envelope.sender,
                &envelope.recipients,
                envelope.document.as_bytes(),
            )
            .await?;

        client.quit().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let transport = Transport::new("user", "pass");
        assert_eq!(transport.host, DEFAULT_HOST);
        assert_eq!(transport.port, DEFAULT_PORT);
        assert!(transport.starttls);
        assert_eq!(transport.body_encoding, BodyEncoding::QuotedPrintable);
    }

    #[test]
    fn test_builder_overrides() {
        let transport = Transport::new("user", "pass")
            .host("localhost")
            .port(2525)
            .starttls(false)
            .body_encoding(BodyEncoding::Base64);

        assert_eq!(transport.host, "localhost");
        assert_eq!(transport.port, 2525);
        assert!(!transport.starttls);
        assert_eq!(transport.body_encoding, BodyEncoding::Base64);
    }
}
