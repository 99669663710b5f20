//! Type-state SMTP submission client.
//!
//! The client moves `Connected` → `Authenticated` through the fixed relay
//! sequence (EHLO, optional STARTTLS, AUTH PLAIN); an authenticated client
//! submits a whole message in one call.

use crate::command::Command;
use crate::error::{Error, Result};
use crate::parser::{is_final_line, parse_reply};
use crate::stream::SmtpStream;
use crate::types::{Address, Extension, Reply, ReplyCode};
use std::marker::PhantomData;

/// Type-state marker: greeting consumed, not yet authenticated.
#[derive(Debug)]
pub struct Connected;

/// Type-state marker: authentication accepted.
#[derive(Debug)]
pub struct Authenticated;

/// Server capabilities discovered from the greeting and EHLO response.
#[derive(Debug, Clone, Default)]
pub struct ServerInfo {
    /// Server hostname from the greeting.
    pub hostname: String,
    /// Extensions advertised in the last EHLO response.
    pub extensions: Vec<Extension>,
}

impl ServerInfo {
    /// Checks if STARTTLS is advertised.
    #[must_use]
    pub fn supports_starttls(&self) -> bool {
        self.extensions.contains(&Extension::StartTls)
    }

    /// Checks if the PLAIN authentication mechanism is advertised.
    #[must_use]
    pub fn supports_auth_plain(&self) -> bool {
        self.extensions.iter().any(|ext| {
            matches!(ext, Extension::Auth(mechanisms) if mechanisms.iter().any(|m| m == "PLAIN"))
        })
    }
}

/// SMTP client over a single connection.
#[derive(Debug)]
pub struct Client<State> {
    stream: SmtpStream,
    server_info: ServerInfo,
    _state: PhantomData<State>,
}

impl Client<Connected> {
    /// Creates a client from a fresh stream, consuming the server greeting.
    ///
    /// # Errors
    ///
    /// Returns an error if the greeting cannot be read or is not a success
    /// reply.
    pub async fn from_stream(mut stream: SmtpStream) -> Result<Self> {
        let greeting = read_reply(&mut stream).await?;
        if !greeting.is_success() {
            return Err(Error::smtp(greeting.code.as_u16(), greeting.message_text()));
        }

        let hostname = greeting
            .message
            .first()
            .and_then(|msg| msg.split_whitespace().next())
            .unwrap_or("unknown")
            .to_string();

        Ok(Self {
            stream,
            server_info: ServerInfo {
                hostname,
                extensions: Vec::new(),
            },
            _state: PhantomData,
        })
    }

    /// Sends EHLO and records the advertised extensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the EHLO exchange fails.
    pub async fn ehlo(mut self, client_hostname: &str) -> Result<Self> {
        let reply = self
            .exchange(&Command::Ehlo {
                hostname: client_hostname.to_string(),
            })
            .await?;

        if !reply.is_success() {
            return Err(Error::smtp(reply.code.as_u16(), reply.message_text()));
        }

        self.server_info.extensions = parse_extensions(&reply);
        Ok(self)
    }

    /// Upgrades the connection to TLS via STARTTLS and re-issues EHLO.
    ///
    /// # Errors
    ///
    /// Returns an error if STARTTLS is not advertised, the handshake fails,
    /// or either exchange is rejected.
    pub async fn starttls(mut self, hostname: &str) -> Result<Self> {
        if !self.server_info.supports_starttls() {
            return Err(Error::NotSupported("STARTTLS".into()));
        }

        let reply = self.exchange(&Command::StartTls).await?;
        if !reply.is_success() {
            return Err(Error::smtp(reply.code.as_u16(), reply.message_text()));
        }

        self.stream = self.stream.upgrade_to_tls(hostname).await?;
        tracing::debug!(hostname, "TLS established");

        // Extensions must be rediscovered on the encrypted channel
        let reply = self
            .exchange(&Command::Ehlo {
                hostname: hostname.to_string(),
            })
            .await?;
        if !reply.is_success() {
            return Err(Error::smtp(reply.code.as_u16(), reply.message_text()));
        }

        self.server_info.extensions = parse_extensions(&reply);
        Ok(self)
    }

    /// Authenticates with AUTH PLAIN.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the credentials.
    pub async fn auth_plain(
        mut self,
        username: &str,
        password: &str,
    ) -> Result<Client<Authenticated>> {
        let reply = self
            .exchange(&Command::AuthPlain {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await?;

        if !reply.is_success() {
            return Err(Error::smtp(reply.code.as_u16(), reply.message_text()));
        }

        tracing::debug!(username, "authenticated");
        Ok(Client {
            stream: self.stream,
            server_info: self.server_info,
            _state: PhantomData,
        })
    }
}

impl Client<Authenticated> {
    /// Submits one message: MAIL FROM, RCPT TO per recipient, DATA, the
    /// dot-stuffed document, and the terminating dot.
    ///
    /// The document should be RFC 5322 formatted; line endings are
    /// normalized to CRLF on the wire.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipient list is empty or the server rejects
    /// any step of the transaction.
    pub async fn submit(
        mut self,
        from: &Address,
        recipients: &[Address],
        document: &[u8],
    ) -> Result<Self> {
        if recipients.is_empty() {
            return Err(Error::Protocol("no envelope recipients".into()));
        }

        let reply = self.exchange(&Command::MailFrom { from: from.clone() }).await?;
        if !reply.is_success() {
            return Err(Error::smtp(reply.code.as_u16(), reply.message_text()));
        }

        for recipient in recipients {
            let reply = self
                .exchange(&Command::RcptTo {
                    to: recipient.clone(),
                })
                .await?;
            if !reply.is_success() {
                return Err(Error::smtp(reply.code.as_u16(), reply.message_text()));
            }
        }

        let reply = self.exchange(&Command::Data).await?;
        if reply.code != ReplyCode::START_DATA {
            return Err(Error::smtp(reply.code.as_u16(), reply.message_text()));
        }

        self.write_dot_stuffed(document).await?;
        self.stream.write_all(b".\r\n").await?;

        let reply = read_reply(&mut self.stream).await?;
        if !reply.is_success() {
            return Err(Error::smtp(reply.code.as_u16(), reply.message_text()));
        }

        tracing::debug!(recipients = recipients.len(), "message accepted");
        Ok(self)
    }

    /// Writes the document line by line, normalizing endings to CRLF and
    /// byte-stuffing lines that start with a dot.
    async fn write_dot_stuffed(&mut self, document: &[u8]) -> Result<()> {
        for line in document.split(|&b| b == b'\n') {
            let line = line.strip_suffix(b"\r").unwrap_or(line);

            if line.first() == Some(&b'.') {
                self.stream.write_all(b".").await?;
            }
            self.stream.write_all(line).await?;
            self.stream.write_all(b"\r\n").await?;
        }
        Ok(())
    }
}

impl<S> Client<S> {
    /// Returns the discovered server information.
    #[must_use]
    pub fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    async fn exchange(&mut self, cmd: &Command) -> Result<Reply> {
        tracing::debug!(command = cmd.name(), "sending");
        self.stream.write_all(cmd.serialize().as_bytes()).await?;
        let reply = read_reply(&mut self.stream).await?;
        tracing::debug!(command = cmd.name(), code = reply.code.as_u16(), "reply");
        Ok(reply)
    }

    /// Sends QUIT and closes the connection (available in any state).
    ///
    /// # Errors
    ///
    /// Returns an error if the QUIT exchange fails.
    pub async fn quit(mut self) -> Result<()> {
        let reply = self.exchange(&Command::Quit).await?;
        if !reply.is_success() && reply.code != ReplyCode::CLOSING {
            return Err(Error::smtp(reply.code.as_u16(), reply.message_text()));
        }
        Ok(())
    }
}

async fn read_reply(stream: &mut SmtpStream) -> Result<Reply> {
    let mut lines = Vec::new();
    loop {
        let line = stream.read_line().await?;
        if line.is_empty() {
            continue;
        }

        let last = is_final_line(&line);
        lines.push(line);
        if last {
            break;
        }
    }

    parse_reply(&lines)
}

fn parse_extensions(reply: &Reply) -> Vec<Extension> {
    // First line of the EHLO reply is the server greeting, not an extension
    reply
        .message
        .iter()
        .skip(1)
        .map(|line| Extension::parse(line))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new)]
mod tests {
    use super::*;

    #[test]
    fn test_server_info_starttls() {
        let info = ServerInfo {
            hostname: "smtp.sendgrid.net".to_string(),
            extensions: vec![Extension::StartTls, Extension::EightBitMime],
        };
        assert!(info.supports_starttls());
    }

    #[test]
    fn test_server_info_auth_plain() {
        let info = ServerInfo {
            hostname: "smtp.sendgrid.net".to_string(),
            extensions: vec![Extension::Auth(vec![
                "PLAIN".to_string(),
                "LOGIN".to_string(),
            ])],
        };
        assert!(info.supports_auth_plain());

        let info = ServerInfo {
            hostname: "smtp.sendgrid.net".to_string(),
            extensions: vec![Extension::Auth(vec!["LOGIN".to_string()])],
        };
        assert!(!info.supports_auth_plain());
    }

    #[test]
    fn test_parse_extensions_skips_greeting() {
        let reply = Reply::new(
            ReplyCode::OK,
            vec![
                "smtp.sendgrid.net".to_string(),
                "STARTTLS".to_string(),
                "AUTH PLAIN".to_string(),
            ],
        );
        let extensions = parse_extensions(&reply);
        assert_eq!(extensions.len(), 2);
        assert_eq!(extensions[0], Extension::StartTls);
    }
}
