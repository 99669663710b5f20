//! SMTP command serialization.

use crate::types::Address;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// SMTP commands issued by the submission client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// EHLO - extended greeting
    Ehlo {
        /// Client hostname
        hostname: String,
    },
    /// STARTTLS - upgrade to TLS
    StartTls,
    /// AUTH PLAIN with SASL initial response
    AuthPlain {
        /// Authentication identity (username)
        username: String,
        /// Password
        password: String,
    },
    /// MAIL FROM - start mail transaction
    MailFrom {
        /// Envelope sender
        from: Address,
    },
    /// RCPT TO - add envelope recipient
    RcptTo {
        /// Envelope recipient
        to: Address,
    },
    /// DATA - begin message data
    Data,
    /// QUIT - close connection
    Quit,
}

impl Command {
    /// Serializes the command as a CRLF-terminated line.
    #[must_use]
    pub fn serialize(&self) -> String {
        let line = match self {
            Self::Ehlo { hostname } => format!("EHLO {hostname}"),
            Self::StartTls => "STARTTLS".to_string(),
            Self::AuthPlain { username, password } => {
                // SASL PLAIN initial response: \0authcid\0password
                let credentials = format!("\0{username}\0{password}");
                let encoded = STANDARD.encode(credentials.as_bytes());
                format!("AUTH PLAIN {encoded}")
            }
            Self::MailFrom { from } => format!("MAIL FROM:<{from}>"),
            Self::RcptTo { to } => format!("RCPT TO:<{to}>"),
            Self::Data => "DATA".to_string(),
            Self::Quit => "QUIT".to_string(),
        };

        format!("{line}\r\n")
    }

    /// Returns the command keyword, safe to log (never credentials).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ehlo { .. } => "EHLO",
            Self::StartTls => "STARTTLS",
            Self::AuthPlain { .. } => "AUTH PLAIN",
            Self::MailFrom { .. } => "MAIL FROM",
            Self::RcptTo { .. } => "RCPT TO",
            Self::Data => "DATA",
            Self::Quit => "QUIT",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new)]
mod tests {
    use super::*;

    #[test]
    fn test_ehlo() {
        let cmd = Command::Ehlo {
            hostname: "client.example.com".to_string(),
        };
        assert_eq!(cmd.serialize(), "EHLO client.example.com\r\n");
    }

    #[test]
    fn test_starttls() {
        assert_eq!(Command::StartTls.serialize(), "STARTTLS\r\n");
    }

    #[test]
    fn test_auth_plain_initial_response() {
        let cmd = Command::AuthPlain {
            username: "user".to_string(),
            password: "pass".to_string(),
        };
        assert_eq!(cmd.serialize(), "AUTH PLAIN AHVzZXIAcGFzcw==\r\n");
    }

    #[test]
    fn test_mail_from() {
        let cmd = Command::MailFrom {
            from: Address::new("sender@example.com").unwrap(),
        };
        assert_eq!(cmd.serialize(), "MAIL FROM:<sender@example.com>\r\n");
    }

    #[test]
    fn test_rcpt_to() {
        let cmd = Command::RcptTo {
            to: Address::new("recipient@example.com").unwrap(),
        };
        assert_eq!(cmd.serialize(), "RCPT TO:<recipient@example.com>\r\n");
    }

    #[test]
    fn test_data_and_quit() {
        assert_eq!(Command::Data.serialize(), "DATA\r\n");
        assert_eq!(Command::Quit.serialize(), "QUIT\r\n");
    }

    #[test]
    fn test_name_redacts_credentials() {
        let cmd = Command::AuthPlain {
            username: "user".to_string(),
            password: "secret".to_string(),
        };
        assert_eq!(cmd.name(), "AUTH PLAIN");
    }
}
