//! The outgoing message model.

use crate::smtpapi::SmtpApi;
use std::path::PathBuf;

/// An email message to compose and send.
///
/// All fields are plain data; the message is handed to
/// [`Transport::send`](crate::Transport::send) once and discarded. BCC
/// recipients are delivered to but never appear in any rendered header.
#[derive(Debug, Clone, Default)]
pub struct Message {
    /// Sender address.
    pub from_address: String,
    /// Sender display name.
    pub from_name: Option<String>,
    /// To recipient addresses, in order.
    pub to: Vec<String>,
    /// Display names parallel to `to`. When non-empty, names apply
    /// positionally; recipients beyond the list render unadorned.
    pub to_name: Vec<String>,
    /// CC recipient addresses.
    pub cc: Vec<String>,
    /// BCC recipient addresses (envelope-only).
    pub bcc: Vec<String>,
    /// Reply-To address.
    pub reply_to: Option<String>,
    /// Subject line, possibly non-ASCII.
    pub subject: String,
    /// Plain-text body.
    pub text: Option<String>,
    /// HTML body.
    pub html: Option<String>,
    /// Preformatted RFC 2822 date. Stamped at compose time when absent.
    pub date: Option<String>,
    /// The X-SMTPAPI block.
    pub smtpapi: SmtpApi,
    /// Extra headers, rendered in insertion order after the standard set.
    pub headers: Vec<(String, String)>,
    /// File attachments, in order.
    pub attachments: Vec<Attachment>,
}

impl Message {
    /// Creates a new message from the given sender address.
    #[must_use]
    pub fn new(from_address: impl Into<String>) -> Self {
        Self {
            from_address: from_address.into(),
            ..Self::default()
        }
    }

    /// Sets the sender display name.
    #[must_use]
    pub fn from_name(mut self, name: impl Into<String>) -> Self {
        self.from_name = Some(name.into());
        self
    }

    /// Adds a To recipient.
    #[must_use]
    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.to.push(address.into());
        self
    }

    /// Adds a To recipient with a display name.
    #[must_use]
    pub fn to_named(mut self, name: impl Into<String>, address: impl Into<String>) -> Self {
        self.to_name.push(name.into());
        self.to.push(address.into());
        self
    }

    /// Adds a CC recipient.
    #[must_use]
    pub fn cc(mut self, address: impl Into<String>) -> Self {
        self.cc.push(address.into());
        self
    }

    /// Adds a BCC recipient.
    #[must_use]
    pub fn bcc(mut self, address: impl Into<String>) -> Self {
        self.bcc.push(address.into());
        self
    }

    /// Sets the Reply-To address.
    #[must_use]
    pub fn reply_to(mut self, address: impl Into<String>) -> Self {
        self.reply_to = Some(address.into());
        self
    }

    /// Sets the subject.
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Sets the plain-text body.
    #[must_use]
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.text = Some(body.into());
        self
    }

    /// Sets the HTML body.
    #[must_use]
    pub fn html(mut self, body: impl Into<String>) -> Self {
        self.html = Some(body.into());
        self
    }

    /// Sets a preformatted Date header value.
    #[must_use]
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Adds an extra header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replaces the X-SMTPAPI block.
    #[must_use]
    pub fn smtpapi(mut self, smtpapi: SmtpApi) -> Self {
        self.smtpapi = smtpapi;
        self
    }

    /// Adds an attachment.
    #[must_use]
    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// Where an attachment's content comes from.
#[derive(Debug, Clone)]
pub enum AttachmentSource {
    /// A filesystem path, read at compose time.
    Path(PathBuf),
    /// Raw bytes supplied by the caller.
    Bytes(Vec<u8>),
}

/// An attachment descriptor.
///
/// The MIME type is inferred from `name`, never sniffed from content.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Filename, used for type inference and the attachment disposition.
    pub name: String,
    /// Content source.
    pub source: AttachmentSource,
    /// Content-ID for inline reference. When set, the part is inline
    /// rather than a downloadable attachment.
    pub cid: Option<String>,
}

impl Attachment {
    /// Creates an attachment read from a filesystem path at compose time.
    #[must_use]
    pub fn from_path(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: AttachmentSource::Path(path.into()),
            cid: None,
        }
    }

    /// Creates an attachment from raw bytes.
    #[must_use]
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            source: AttachmentSource::Bytes(bytes.into()),
            cid: None,
        }
    }

    /// Sets the Content-ID, marking the part as an inline resource.
    #[must_use]
    pub fn with_cid(mut self, cid: impl Into<String>) -> Self {
        self.cid = Some(cid.into());
        self
    }

    /// Resolves the attachment content.
    ///
    /// A path that cannot be read falls back to the path text itself as
    /// literal content; this never fails.
    #[must_use]
    pub fn content(&self) -> Vec<u8> {
        match &self.source {
            AttachmentSource::Bytes(bytes) => bytes.clone(),
            AttachmentSource::Path(path) => std::fs::read(path)
                .unwrap_or_else(|_| path.to_string_lossy().into_owned().into_bytes()),
        }
    }
}
