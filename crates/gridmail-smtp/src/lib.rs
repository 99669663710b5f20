//! # gridmail-smtp
//!
//! Minimal async SMTP submission client for relay delivery.
//!
//! Implements the fixed submission sequence a relay client needs: EHLO,
//! in-band STARTTLS upgrade, AUTH PLAIN, and a one-shot mail transaction
//! (MAIL FROM, RCPT TO, DATA with dot-stuffing). Valid ordering is enforced
//! at compile time with a type-state [`Client`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use gridmail_smtp::{Address, Client, connect};
//!
//! #[tokio::main]
//! async fn main() -> gridmail_smtp::Result<()> {
//!     let stream = connect("smtp.sendgrid.net", 587).await?;
//!     let client = Client::from_stream(stream).await?;
//!     let client = client.ehlo("localhost").await?;
//!     let client = client.starttls("smtp.sendgrid.net").await?;
//!     let client = client.auth_plain("username", "password").await?;
//!
//!     let from = Address::new("sender@example.com")?;
//!     let to = Address::new("recipient@example.com")?;
//!     let document = b"Subject: Test\r\n\r\nHello, World!\r\n";
//!
//!     let client = client.submit(&from, &[to], document).await?;
//!     client.quit().await
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod stream;

pub mod command;
pub mod parser;
pub mod types;

pub use client::{Authenticated, Client, Connected, ServerInfo};
pub use error::{Error, Result};
pub use stream::{SmtpStream, connect};
pub use types::{Address, Extension, Reply, ReplyCode};
