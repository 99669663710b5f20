//! MIME document composition.
//!
//! A [`Document`] is a tree of [`Part`]s under [`MultiPart`] containers,
//! rendered to a single CRLF-terminated string with payloads encoded
//! according to each part's transfer encoding.

use crate::content_type::ContentType;
use crate::encoding::{encode_base64_wrapped, encode_quoted_printable};
use crate::header::Headers;
use std::fmt;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};

/// Transfer encoding applied to a part payload at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEncoding {
    /// 7-bit ASCII, payload emitted as-is.
    SevenBit,
    /// Quoted-Printable encoding.
    QuotedPrintable,
    /// Base64 encoding, wrapped at 76 columns.
    Base64,
}

impl fmt::Display for TransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SevenBit => write!(f, "7bit"),
            Self::QuotedPrintable => write!(f, "quoted-printable"),
            Self::Base64 => write!(f, "base64"),
        }
    }
}

/// Sequence counter for boundary generation.
static BOUNDARY_SEQ: AtomicU64 = AtomicU64::new(0);

/// Generates a process-unique multipart boundary.
fn next_boundary() -> String {
    let sequence = BOUNDARY_SEQ.fetch_add(1, Ordering::Relaxed);
    let pid = std::process::id();
    format!("----=_Part_{pid}_{sequence:06}")
}

/// A leaf MIME part: typed content plus extra headers.
///
/// The payload is stored raw and encoded only when the document is rendered.
#[derive(Debug, Clone)]
pub struct Part {
    /// Content type of the part.
    pub content_type: ContentType,
    /// Transfer encoding applied at render time.
    pub encoding: TransferEncoding,
    /// Additional part headers (Content-ID, Content-Disposition, ...).
    pub headers: Headers,
    content: Vec<u8>,
}

impl Part {
    /// Creates a text part from a string payload.
    #[must_use]
    pub fn text(content_type: ContentType, text: &str, encoding: TransferEncoding) -> Self {
        Self {
            content_type,
            encoding,
            headers: Headers::new(),
            content: text.as_bytes().to_vec(),
        }
    }

    /// Creates a binary part, always Base64 encoded.
    #[must_use]
    pub fn binary(content_type: ContentType, content: Vec<u8>) -> Self {
        Self {
            content_type,
            encoding: TransferEncoding::Base64,
            headers: Headers::new(),
            content,
        }
    }

    /// Marks the part as an inline resource referenced by a content-id.
    pub fn set_content_id(&mut self, cid: &str) {
        self.headers.set("Content-ID", format!("<{cid}>"));
    }

    /// Marks the part as a downloadable attachment with a filename.
    pub fn set_attachment_filename(&mut self, filename: &str) {
        self.headers
            .set("Content-Disposition", format!("attachment; filename=\"{filename}\""));
    }

    /// Returns the raw (unencoded) payload.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    fn render(&self, out: &mut String) {
        let content_type = &self.content_type;
        let encoding = &self.encoding;
        let _ = write!(out, "Content-Type: {content_type}\r\n");
        let _ = write!(out, "Content-Transfer-Encoding: {encoding}\r\n");
        let _ = write!(out, "{}", self.headers);
        out.push_str("\r\n");

        match self.encoding {
            TransferEncoding::SevenBit => {
                out.push_str(&String::from_utf8_lossy(&self.content));
            }
            TransferEncoding::QuotedPrintable => {
                out.push_str(&encode_quoted_printable(&String::from_utf8_lossy(
                    &self.content,
                )));
            }
            TransferEncoding::Base64 => {
                out.push_str(&encode_base64_wrapped(&self.content));
            }
        }
        out.push_str("\r\n");
    }
}

/// A node in the composition tree.
#[derive(Debug, Clone)]
pub enum Body {
    /// A leaf part.
    Part(Part),
    /// A nested multipart container.
    Multi(MultiPart),
}

/// Multipart container subtypes used by the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultipartKind {
    /// Alternative renderings of the same content, least preferred first.
    Alternative,
    /// A root part with related inline resources.
    Related,
}

/// A multipart container with a generated boundary.
#[derive(Debug, Clone)]
pub struct MultiPart {
    kind: MultipartKind,
    boundary: String,
    children: Vec<Body>,
}

impl MultiPart {
    /// Creates a multipart/alternative container.
    #[must_use]
    pub fn alternative() -> Self {
        Self::new(MultipartKind::Alternative)
    }

    /// Creates a multipart/related container.
    #[must_use]
    pub fn related() -> Self {
        Self::new(MultipartKind::Related)
    }

    fn new(kind: MultipartKind) -> Self {
        Self {
            kind,
            boundary: next_boundary(),
            children: Vec::new(),
        }
    }

    /// Appends a leaf part.
    pub fn push_part(&mut self, part: Part) {
        self.children.push(Body::Part(part));
    }

    /// Appends a nested container.
    pub fn push_multi(&mut self, multi: Self) {
        self.children.push(Body::Multi(multi));
    }

    /// Returns this container's boundary string.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Returns the children in order.
    #[must_use]
    pub fn children(&self) -> &[Body] {
        &self.children
    }

    /// Returns the container's content type, boundary included.
    #[must_use]
    pub fn content_type(&self) -> ContentType {
        match self.kind {
            MultipartKind::Alternative => ContentType::multipart_alternative(&self.boundary),
            MultipartKind::Related => ContentType::multipart_related(&self.boundary),
        }
    }

    fn render_children(&self, out: &mut String) {
        let boundary = &self.boundary;
        for child in &self.children {
            let _ = write!(out, "--{boundary}\r\n");
            match child {
                Body::Part(part) => part.render(out),
                Body::Multi(multi) => {
                    let content_type = multi.content_type();
                    let _ = write!(out, "Content-Type: {content_type}\r\n\r\n");
                    multi.render_children(out);
                }
            }
        }
        let _ = write!(out, "--{boundary}--\r\n");
    }
}

/// A complete MIME document: top-level headers over a multipart root.
#[derive(Debug, Clone)]
pub struct Document {
    /// Top-level message headers, rendered in insertion order.
    pub headers: Headers,
    /// Root container.
    pub root: MultiPart,
}

impl Document {
    /// Creates a document over the given root container.
    #[must_use]
    pub fn new(headers: Headers, root: MultiPart) -> Self {
        Self { headers, root }
    }

    /// Renders the full document with CRLF line endings.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let content_type = self.root.content_type();

        out.push_str("MIME-Version: 1.0\r\n");
        let _ = write!(out, "Content-Type: {content_type}\r\n");
        let _ = write!(out, "{}", self.headers);
        out.push_str("\r\n");
        self.root.render_children(&mut out);

        out
    }
}
