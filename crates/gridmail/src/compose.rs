//! Message composition.
//!
//! Turns a [`Message`] into an [`Envelope`]: a rendered MIME document plus
//! the envelope sender and recipient list. Composition is pure; nothing here
//! touches the network.

use crate::error::{Error, Result};
use crate::message::{Attachment, Message};
use gridmail_mime::{
    ContentType, Document, HeaderValue, Headers, Mailbox, MultiPart, Part, TransferEncoding,
};
use gridmail_smtp::Address;

/// Transfer encoding applied to text and HTML bodies.
///
/// Quoted-printable keeps bodies human-readable on the wire and is the
/// default; the option is passed into serialization explicitly rather than
/// being process-wide state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BodyEncoding {
    /// UTF-8 quoted-printable (default).
    #[default]
    QuotedPrintable,
    /// UTF-8 base64.
    Base64,
}

impl BodyEncoding {
    const fn transfer(self) -> TransferEncoding {
        match self {
            Self::QuotedPrintable => TransferEncoding::QuotedPrintable,
            Self::Base64 => TransferEncoding::Base64,
        }
    }
}

/// A composed message ready for delivery.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Envelope sender.
    pub sender: Address,
    /// Envelope recipients: To, then CC, then BCC. BCC entries appear here
    /// and nowhere in the document.
    pub recipients: Vec<Address>,
    /// The rendered MIME document.
    pub document: String,
}

/// Composes a message into an envelope.
pub(crate) fn compose(message: &Message, body_encoding: BodyEncoding) -> Result<Envelope> {
    if message.text.is_none() && message.html.is_none() {
        return Err(Error::MissingBody);
    }
    if message.to.is_empty() {
        return Err(Error::NoRecipients);
    }
    validate_extra_headers(&message.headers)?;

    let transfer = body_encoding.transfer();
    let mut root = MultiPart::related();

    if let (Some(text), Some(html)) = (&message.text, &message.html) {
        let mut alternative = MultiPart::alternative();
        alternative.push_part(Part::text(ContentType::text_plain(), text, transfer));
        alternative.push_part(Part::text(ContentType::text_html(), html, transfer));
        root.push_multi(alternative);
    } else if let Some(text) = &message.text {
        root.push_part(Part::text(ContentType::text_plain(), text, transfer));
    } else if let Some(html) = &message.html {
        root.push_part(Part::text(ContentType::text_html(), html, transfer));
    }

    for attachment in &message.attachments {
        root.push_part(attachment_part(attachment));
    }

    let headers = build_headers(message)?;
    let document = Document::new(headers, root);

    let sender = envelope_address(&message.from_address)?;
    let mut recipients = Vec::with_capacity(message.to.len() + message.cc.len() + message.bcc.len());
    for address in message.to.iter().chain(&message.cc).chain(&message.bcc) {
        recipients.push(envelope_address(address)?);
    }

    Ok(Envelope {
        sender,
        recipients,
        document: document.render(),
    })
}

/// Rejects the whole header set on the first invalid entry.
fn validate_extra_headers(extra: &[(String, String)]) -> Result<()> {
    for (name, value) in extra {
        if name.is_empty()
            || !name.is_ascii()
            || name.contains(|c: char| c.is_ascii_control() || c == ':' || c == ' ')
        {
            return Err(Error::InvalidHeader {
                name: name.clone(),
                reason: "header names must be printable ASCII without colons or spaces".into(),
            });
        }
        if value.contains(['\r', '\n']) {
            return Err(Error::InvalidHeader {
                name: name.clone(),
                reason: "header values must not contain line breaks".into(),
            });
        }
    }
    Ok(())
}

fn build_headers(message: &Message) -> Result<Headers> {
    let mut headers = Headers::new();

    headers.set(
        "From",
        render_mailbox(&message.from_address, message.from_name.as_deref())?,
    );
    headers.set("To", render_to_list(message)?);

    if let Some(reply_to) = &message.reply_to {
        headers.set("Reply-To", reply_to.clone());
    }
    if !message.cc.is_empty() {
        headers.set("Cc", message.cc.join(", "));
    }

    headers.set("Subject", HeaderValue::encode(&message.subject).to_string());

    let date = message
        .date
        .clone()
        .unwrap_or_else(|| chrono::Utc::now().to_rfc2822());
    headers.set("Date", date);

    if !message.smtpapi.is_empty() {
        headers.set("X-SMTPAPI", message.smtpapi.to_json()?);
    }

    for (name, value) in &message.headers {
        headers.append(name.clone(), HeaderValue::encode(value).to_string());
    }

    Ok(headers)
}

fn envelope_address(address: &str) -> Result<Address> {
    Address::new(address).map_err(|e| Error::InvalidAddress(e.to_string()))
}

fn render_mailbox(address: &str, name: Option<&str>) -> Result<String> {
    let mailbox = match name {
        Some(name) => Mailbox::with_name(name, address),
        None => Mailbox::new(address),
    }
    .map_err(|e| Error::InvalidAddress(e.to_string()))?;

    Ok(mailbox.to_string())
}

fn render_to_list(message: &Message) -> Result<String> {
    if message.to_name.is_empty() {
        return Ok(message.to.join(", "));
    }

    let mut rendered = Vec::with_capacity(message.to.len());
    for (i, address) in message.to.iter().enumerate() {
        rendered.push(render_mailbox(
            address,
            message.to_name.get(i).map(String::as_str),
        )?);
    }
    Ok(rendered.join(", "))
}

fn attachment_part(attachment: &Attachment) -> Part {
    let content = attachment.content();

    let mut part = match ContentType::from_filename(&attachment.name) {
        Some(ct) if ct.main_type == "text" => {
            let ct = ct.with_parameter("charset", "utf-8");
            Part::text(
                ct,
                &String::from_utf8_lossy(&content),
                TransferEncoding::QuotedPrintable,
            )
        }
        Some(ct) => Part::binary(ct, content),
        None => Part::binary(ContentType::octet_stream(), content),
    };

    match &attachment.cid {
        Some(cid) => part.set_content_id(cid),
        None => part.set_attachment_filename(&attachment.name),
    }

    part
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new)]
mod tests {
    use super::*;

    fn base_message() -> Message {
        Message::new("sender@example.com")
            .to("rcpt@example.com")
            .subject("test")
            .text("hello")
    }

    #[test]
    fn test_missing_body_rejected() {
        let message = Message::new("sender@example.com").to("rcpt@example.com");
        assert!(matches!(
            compose(&message, BodyEncoding::default()),
            Err(Error::MissingBody)
        ));
    }

    #[test]
    fn test_no_recipients_rejected() {
        let message = Message::new("sender@example.com").text("hello");
        assert!(matches!(
            compose(&message, BodyEncoding::default()),
            Err(Error::NoRecipients)
        ));
    }

    #[test]
    fn test_invalid_header_key_rejects_whole_message() {
        let message = base_message()
            .header("X-Fine", "ok")
            .header("X-Bad\u{e9}", "value")
            .header("X-Never-Checked", "\r\ninjected");

        let err = compose(&message, BodyEncoding::default()).unwrap_err();
        match err {
            Error::InvalidHeader { name, .. } => assert_eq!(name, "X-Bad\u{e9}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_multiline_header_value_rejected() {
        let message = base_message().header("X-Data", "line1\r\nline2");
        assert!(matches!(
            compose(&message, BodyEncoding::default()),
            Err(Error::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_invalid_sender_address() {
        let message = Message::new("not-an-address")
            .to("rcpt@example.com")
            .text("hello");
        assert!(matches!(
            compose(&message, BodyEncoding::default()),
            Err(Error::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_envelope_recipient_order() {
        let message = Message::new("s@example.com")
            .to("to@example.com")
            .cc("cc@example.com")
            .bcc("bcc@example.com")
            .text("hello");

        let envelope = compose(&message, BodyEncoding::default()).unwrap();
        let recipients: Vec<&str> = envelope.recipients.iter().map(Address::as_str).collect();
        assert_eq!(
            recipients,
            vec!["to@example.com", "cc@example.com", "bcc@example.com"]
        );
    }

    #[test]
    fn test_date_preserved_when_provided() {
        let message = base_message().date("Mon, 3 Aug 2026 10:00:00 +0000");
        let envelope = compose(&message, BodyEncoding::default()).unwrap();
        assert!(
            envelope
                .document
                .contains("Date: Mon, 3 Aug 2026 10:00:00 +0000\r\n")
        );
    }

    #[test]
    fn test_date_stamped_when_absent() {
        let envelope = compose(&base_message(), BodyEncoding::default()).unwrap();
        assert!(envelope.document.contains("Date: "));
    }

    #[test]
    fn test_body_encoding_option_switches_to_base64() {
        let envelope = compose(&base_message(), BodyEncoding::Base64).unwrap();
        assert!(
            envelope
                .document
                .contains("Content-Transfer-Encoding: base64")
        );
        // "hello" in base64
        assert!(envelope.document.contains("aGVsbG8="));
    }

    #[test]
    fn test_text_attachment_part_is_quoted_printable() {
        let part = attachment_part(&Attachment::from_bytes("notes.txt", b"plain text".to_vec()));
        assert_eq!(part.content_type.main_type, "text");
        assert_eq!(part.encoding, TransferEncoding::QuotedPrintable);
    }

    #[test]
    fn test_unknown_extension_attachment_is_octet_stream() {
        let part = attachment_part(&Attachment::from_bytes("blob.xyz", vec![0_u8, 1]));
        assert_eq!(part.content_type.main_type, "application");
        assert_eq!(part.content_type.sub_type, "octet-stream");
        assert_eq!(part.encoding, TransferEncoding::Base64);
    }

    #[test]
    fn test_compressed_attachment_is_octet_stream() {
        let part = attachment_part(&Attachment::from_bytes("notes.txt.gz", vec![0x1f_u8, 0x8b]));
        assert_eq!(part.content_type.sub_type, "octet-stream");
    }
}
