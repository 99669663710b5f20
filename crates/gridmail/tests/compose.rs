//! Integration tests for message composition through the public API.

#![allow(clippy::unwrap_used)]

use gridmail::{Attachment, BodyEncoding, Error, Message, SmtpApi, Transport};

fn transport() -> Transport {
    Transport::new("user", "pass")
}

/// Extracts the boundary following the first occurrence of `marker`.
fn boundary_after(document: &str, marker: &str) -> String {
    let idx = document.find(marker).unwrap();
    let rest = &document[idx..];
    let start = rest.find("boundary=\"").unwrap() + "boundary=\"".len();
    let rest = &rest[start..];
    rest[..rest.find('"').unwrap()].to_string()
}

fn count_parts(document: &str, boundary: &str) -> usize {
    document.matches(&format!("--{boundary}\r\n")).count()
}

#[test]
fn both_bodies_render_one_alternative_with_two_parts() {
    let message = Message::new("s@example.com")
        .to("r@example.com")
        .subject("test")
        .text("plain version")
        .html("<p>html version</p>");

    let envelope = transport().compose(&message).unwrap();
    let document = &envelope.document;

    assert_eq!(document.matches("multipart/alternative").count(), 1);

    let alt_boundary = boundary_after(document, "multipart/alternative");
    assert_eq!(count_parts(document, &alt_boundary), 2);

    // Text part precedes the HTML part
    let plain_at = document.find("Content-Type: text/plain").unwrap();
    let html_at = document.find("Content-Type: text/html").unwrap();
    assert!(plain_at < html_at);
}

#[test]
fn single_text_body_renders_one_part_and_no_alternative() {
    let message = Message::new("s@example.com")
        .to("r@example.com")
        .text("only text");

    let envelope = transport().compose(&message).unwrap();
    let document = &envelope.document;

    assert!(!document.contains("multipart/alternative"));
    let root_boundary = boundary_after(document, "multipart/related");
    assert_eq!(count_parts(document, &root_boundary), 1);
    assert!(document.contains("Content-Type: text/plain; charset=utf-8"));
}

#[test]
fn single_html_body_renders_one_html_part() {
    let message = Message::new("s@example.com")
        .to("r@example.com")
        .html("<p>only html</p>");

    let envelope = transport().compose(&message).unwrap();
    let document = &envelope.document;

    assert!(!document.contains("multipart/alternative"));
    assert!(document.contains("Content-Type: text/html; charset=utf-8"));
    assert!(!document.contains("Content-Type: text/plain"));
}

#[test]
fn bcc_addresses_never_appear_in_headers_but_are_delivered() {
    let message = Message::new("s@example.com")
        .to("to@example.com")
        .cc("cc@example.com")
        .bcc("hidden@example.com")
        .text("hello");

    let envelope = transport().compose(&message).unwrap();

    assert!(!envelope.document.contains("hidden@example.com"));
    assert!(envelope.document.contains("To: to@example.com\r\n"));
    assert!(envelope.document.contains("Cc: cc@example.com\r\n"));

    let recipients: Vec<&str> = envelope
        .recipients
        .iter()
        .map(gridmail_smtp::Address::as_str)
        .collect();
    assert!(recipients.contains(&"hidden@example.com"));
}

#[test]
fn ascii_subject_passes_through_unchanged() {
    let message = Message::new("s@example.com")
        .to("r@example.com")
        .subject("Plain ASCII subject")
        .text("hi");

    let envelope = transport().compose(&message).unwrap();
    assert!(
        envelope
            .document
            .contains("Subject: Plain ASCII subject\r\n")
    );
}

#[test]
fn non_ascii_headers_render_ascii_only() {
    let message = Message::new("s@example.com")
        .to("r@example.com")
        .subject("G\u{fc}nstige Angebote")
        .header("X-Campaign", "\u{e9}t\u{e9} 2026")
        .text("hi");

    let envelope = transport().compose(&message).unwrap();
    let document = &envelope.document;

    assert!(document.is_ascii());
    assert!(document.contains("Subject: =?utf-8?B?"));
    assert!(document.contains("X-Campaign: =?utf-8?B?"));
}

#[test]
fn rendered_to_header_matches_named_recipient_scenario() {
    let message = Message::new("s@example.com")
        .to_named("Alice", "a@x.com")
        .to_named("Bob", "b@x.com")
        .text("hi");

    let envelope = transport().compose(&message).unwrap();
    let document = &envelope.document;

    assert!(document.contains("To: \"Alice\" <a@x.com>, \"Bob\" <b@x.com>\r\n"));
    assert!(document.contains("Content-Type: text/plain; charset=utf-8"));
    assert!(document.contains("Content-Transfer-Encoding: quoted-printable"));
    assert!(document.contains("\r\nhi\r\n"));
}

#[test]
fn attachment_without_cid_gets_disposition() {
    let message = Message::new("s@example.com")
        .to("r@example.com")
        .text("see attached")
        .attach(Attachment::from_bytes("photo.png", vec![0x89_u8, 0x50, 0x4e, 0x47]));

    let envelope = transport().compose(&message).unwrap();
    let document = &envelope.document;

    assert!(document.contains("Content-Type: image/png"));
    assert!(document.contains("Content-Disposition: attachment; filename=\"photo.png\""));
    assert!(!document.contains("Content-ID"));
}

#[test]
fn attachment_with_cid_gets_content_id_and_no_disposition() {
    let message = Message::new("s@example.com")
        .to("r@example.com")
        .text("inline image")
        .attach(
            Attachment::from_bytes("photo.png", vec![0x89_u8, 0x50, 0x4e, 0x47]).with_cid("logo1"),
        );

    let envelope = transport().compose(&message).unwrap();
    let document = &envelope.document;

    assert!(document.contains("Content-ID: <logo1>"));
    assert!(!document.contains("Content-Disposition"));
}

#[test]
fn unreadable_attachment_path_becomes_literal_content() {
    let message = Message::new("s@example.com")
        .to("r@example.com")
        .text("fallback")
        .attach(Attachment::from_path("data.bin", "/definitely/not/here.bin"));

    let envelope = transport().compose(&message).unwrap();

    // The path text, base64-encoded, is the payload
    let expected = gridmail_mime::encoding::encode_base64(b"/definitely/not/here.bin");
    assert!(envelope.document.contains(&expected));
}

#[test]
fn smtpapi_header_is_attached_as_one_json_line() {
    let message = Message::new("s@example.com")
        .to("r@example.com")
        .text("hi")
        .smtpapi(
            SmtpApi::new()
                .add_category("newsletter")
                .set_unique_arg("campaign", "x".repeat(2048)),
        );

    let envelope = transport().compose(&message).unwrap();

    let header_line = envelope
        .document
        .split("\r\n")
        .find(|line| line.starts_with("X-SMTPAPI: "))
        .unwrap();
    let json: serde_json::Value =
        serde_json::from_str(header_line.strip_prefix("X-SMTPAPI: ").unwrap()).unwrap();
    assert_eq!(json["category"][0], "newsletter");
}

#[test]
fn empty_smtpapi_block_omits_the_header() {
    let message = Message::new("s@example.com").to("r@example.com").text("hi");
    let envelope = transport().compose(&message).unwrap();
    assert!(!envelope.document.contains("X-SMTPAPI"));
}

#[test]
fn reply_to_header_present_when_set() {
    let message = Message::new("s@example.com")
        .to("r@example.com")
        .reply_to("replies@example.com")
        .text("hi");

    let envelope = transport().compose(&message).unwrap();
    assert!(
        envelope
            .document
            .contains("Reply-To: replies@example.com\r\n")
    );
}

#[tokio::test]
async fn invalid_headers_fail_send_before_any_network_io() {
    // Unroutable endpoint: if validation did not fire first, this would
    // surface as a Service error instead.
    let transport = Transport::new("user", "pass").host("127.0.0.1").port(1);

    let message = Message::new("s@example.com")
        .to("r@example.com")
        .text("hi")
        .header("X-Bad\u{e9}", "value");

    let err = transport.send(&message).await.unwrap_err();
    assert!(matches!(err, Error::InvalidHeader { .. }));
}

#[test]
fn body_encoding_option_applies_to_both_bodies() {
    let message = Message::new("s@example.com")
        .to("r@example.com")
        .text("plain")
        .html("<p>html</p>");

    let envelope = transport()
        .body_encoding(BodyEncoding::Base64)
        .compose(&message)
        .unwrap();

    assert_eq!(
        envelope
            .document
            .matches("Content-Transfer-Encoding: base64")
            .count(),
        2
    );
    assert!(!envelope.document.contains("quoted-printable"));
}
