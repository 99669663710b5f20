//! # gridmail-mime
//!
//! MIME document construction for the gridmail SendGrid relay client.
//!
//! ## Features
//!
//! - **Document composition**: parts, multipart/alternative and
//!   multipart/related containers, CRLF rendering
//! - **Encoding**: Base64, Quoted-Printable, RFC 2047 encoded-word headers
//! - **Addresses**: mailbox rendering with display-name quoting and encoding
//! - **Content types**: construction plus filename-extension inference
//!
//! ## Quick Start
//!
//! ```ignore
//! use gridmail_mime::{ContentType, Document, Headers, MultiPart, Part, TransferEncoding};
//!
//! let mut root = MultiPart::related();
//! root.push_part(Part::text(
//!     ContentType::text_plain(),
//!     "Hello, World!",
//!     TransferEncoding::QuotedPrintable,
//! ));
//!
//! let mut headers = Headers::new();
//! headers.set("From", "sender@example.com");
//! headers.set("Subject", "Test");
//!
//! let document = Document::new(headers, root);
//! println!("{}", document.render());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod address;
mod content_type;
mod error;
mod header;
mod message;

pub mod encoding;

pub use address::Mailbox;
pub use content_type::{ContentType, has_compression_suffix};
pub use encoding::HeaderValue;
pub use error::{Error, Result};
pub use header::Headers;
pub use message::{Body, Document, MultiPart, MultipartKind, Part, TransferEncoding};
