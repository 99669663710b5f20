//! # gridmail
//!
//! Client library for composing and sending email through the SendGrid SMTP
//! relay.
//!
//! A [`Message`] describes the mail: sender, recipients, subject, text and/or
//! HTML bodies, extra headers, attachments, and the X-SMTPAPI instruction
//! block. A [`Transport`] composes it into a single MIME document and submits
//! it over one SMTP connection. BCC recipients receive the message but never
//! appear in any rendered header; non-ASCII header content is carried in
//! encoded-word form so the document on the wire is pure ASCII.
//!
//! ## Quick Start
//!
//! ```ignore
//! use gridmail::{Message, Transport};
//!
//! #[tokio::main]
//! async fn main() -> gridmail::Result<()> {
//!     let message = Message::new("sender@example.com")
//!         .from_name("Example Sender")
//!         .to("recipient@example.com")
//!         .subject("Hello")
//!         .text("Hello, World!")
//!         .html("<h1>Hello, World!</h1>");
//!
//!     let transport = Transport::new("sendgrid_username", "sendgrid_password");
//!     transport.send(&message).await
//! }
//! ```
//!
//! ## Attachments
//!
//! ```ignore
//! use gridmail::{Attachment, Message};
//!
//! let message = Message::new("sender@example.com")
//!     .to("recipient@example.com")
//!     .text("See attached.")
//!     .attach(Attachment::from_path("report.pdf", "/tmp/report.pdf"))
//!     .attach(Attachment::from_bytes("logo.png", logo_bytes).with_cid("logo1"));
//! ```
//!
//! ## The X-SMTPAPI block
//!
//! ```ignore
//! use gridmail::{Message, SmtpApi};
//!
//! let message = Message::new("sender@example.com")
//!     .to("recipient@example.com")
//!     .text("Hi -name-!")
//!     .smtpapi(
//!         SmtpApi::new()
//!             .add_substitution("-name-", "Alice")
//!             .add_category("welcome"),
//!     );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod compose;
mod error;
mod message;
mod smtpapi;
mod transport;

pub use compose::{BodyEncoding, Envelope};
pub use error::{Error, Result};
pub use message::{Attachment, AttachmentSource, Message};
pub use smtpapi::SmtpApi;
pub use transport::{DEFAULT_HOST, DEFAULT_PORT, Transport};
