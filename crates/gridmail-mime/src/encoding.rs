//! Transfer and header encoding.
//!
//! Base64 and Quoted-Printable for part payloads (RFC 2045), encoded-word
//! encoding for header values (RFC 2047).

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use std::fmt::Write as _;

/// Maximum encoded line length for part payloads.
const MAX_LINE_LENGTH: usize = 76;

/// Encodes data as a single unwrapped Base64 string.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Encodes data as Base64 wrapped at 76 columns with CRLF line breaks,
/// suitable for a part payload.
#[must_use]
pub fn encode_base64_wrapped(data: &[u8]) -> String {
    let encoded = STANDARD.encode(data);
    let mut out = String::with_capacity(encoded.len() + encoded.len() / MAX_LINE_LENGTH * 2);
    let bytes = encoded.as_bytes();

    for (i, chunk) in bytes.chunks(MAX_LINE_LENGTH).enumerate() {
        if i > 0 {
            out.push_str("\r\n");
        }
        // Base64 output is pure ASCII
        out.push_str(std::str::from_utf8(chunk).unwrap_or_default());
    }

    out
}

/// Encodes text using Quoted-Printable encoding (RFC 2045).
///
/// Line structure of the input is preserved: input line breaks (LF or CRLF)
/// become hard CRLF breaks in the output. Lines longer than 76 columns are
/// split with soft breaks, and trailing whitespace is escaped so it survives
/// transport.
#[must_use]
pub fn encode_quoted_printable(text: &str) -> String {
    let mut out = String::new();

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push_str("\r\n");
        }
        let line = line.strip_suffix('\r').unwrap_or(line);
        encode_qp_line(line.as_bytes(), &mut out);
    }

    out
}

fn encode_qp_line(bytes: &[u8], out: &mut String) {
    let mut column = 0;

    for (i, &byte) in bytes.iter().enumerate() {
        let at_line_end = i + 1 == bytes.len();
        let escape = match byte {
            b'=' => true,
            // Whitespace is only escaped when it would end the line
            b' ' | b'\t' => at_line_end,
            0x21..=0x7e => false,
            _ => true,
        };

        let width = if escape { 3 } else { 1 };
        // Reserve one column for a possible soft-break '='
        if column + width > MAX_LINE_LENGTH - 1 {
            out.push_str("=\r\n");
            column = 0;
        }

        if escape {
            let _ = write!(out, "={byte:02X}");
        } else {
            out.push(byte as char);
        }
        column += width;
    }
}

/// A header value after encoding, tagged with the path taken.
///
/// Pure-ASCII input passes through byte-for-byte as [`HeaderValue::Plain`];
/// anything else becomes a UTF-8 Base64 encoded word (RFC 2047) as
/// [`HeaderValue::Encoded`]. The two variants make the chosen path observable
/// to callers and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    /// Input was pure ASCII and is carried unchanged.
    Plain(String),
    /// Input contained non-ASCII characters; carries the `=?utf-8?B?...?=`
    /// encoded-word form.
    Encoded(String),
}

impl HeaderValue {
    /// Encodes a header value, choosing the plain or encoded-word path.
    #[must_use]
    pub fn encode(text: &str) -> Self {
        if text.is_ascii() {
            return Self::Plain(text.to_string());
        }

        let encoded = encode_base64(text.as_bytes());
        Self::Encoded(format!("=?utf-8?B?{encoded}?="))
    }

    /// Returns the rendered header value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(s) | Self::Encoded(s) => s,
        }
    }

    /// Returns true if the encoded-word path was taken.
    #[must_use]
    pub const fn is_encoded(&self) -> bool {
        matches!(self, Self::Encoded(_))
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::unreadable_literal
)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_base64_encode() {
        assert_eq!(encode_base64(b"Hello, World!"), "SGVsbG8sIFdvcmxkIQ==");
    }

    #[test]
    fn test_base64_wrapped_short_input_is_single_line() {
        let encoded = encode_base64_wrapped(b"Hello, World!");
        assert_eq!(encoded, "SGVsbG8sIFdvcmxkIQ==");
        assert!(!encoded.contains("\r\n"));
    }

    #[test]
    fn test_base64_wrapped_lines_within_limit() {
        let data = vec![0xAB_u8; 300];
        let encoded = encode_base64_wrapped(&data);
        for line in encoded.split("\r\n") {
            assert!(line.len() <= 76);
            assert!(!line.is_empty());
        }
    }

    #[test]
    fn test_quoted_printable_ascii_passthrough() {
        assert_eq!(encode_quoted_printable("Hello, World!"), "Hello, World!");
    }

    #[test]
    fn test_quoted_printable_escapes_non_ascii() {
        assert_eq!(encode_quoted_printable("H\u{e9}llo"), "H=C3=A9llo");
    }

    #[test]
    fn test_quoted_printable_escapes_equals() {
        assert_eq!(encode_quoted_printable("a=b"), "a=3Db");
    }

    #[test]
    fn test_quoted_printable_preserves_line_breaks() {
        assert_eq!(encode_quoted_printable("one\ntwo"), "one\r\ntwo");
        assert_eq!(encode_quoted_printable("one\r\ntwo"), "one\r\ntwo");
    }

    #[test]
    fn test_quoted_printable_escapes_trailing_space() {
        assert_eq!(encode_quoted_printable("hi \nthere"), "hi=20\r\nthere");
        assert_eq!(encode_quoted_printable("mid dle"), "mid dle");
    }

    #[test]
    fn test_quoted_printable_soft_breaks_long_lines() {
        let long = "x".repeat(200);
        let encoded = encode_quoted_printable(&long);
        for line in encoded.split("\r\n") {
            assert!(line.len() <= 76);
        }
        assert_eq!(encoded.replace("=\r\n", ""), long);
    }

    #[test]
    fn test_header_value_plain_for_ascii() {
        let value = HeaderValue::encode("Plain subject");
        assert_eq!(value, HeaderValue::Plain("Plain subject".to_string()));
        assert!(!value.is_encoded());
        assert_eq!(value.as_str(), "Plain subject");
    }

    #[test]
    fn test_header_value_encoded_for_non_ascii() {
        let value = HeaderValue::encode("H\u{e9}llo");
        assert!(value.is_encoded());
        assert!(value.as_str().starts_with("=?utf-8?B?"));
        assert!(value.as_str().ends_with("?="));
        assert!(value.as_str().is_ascii());
    }

    #[test]
    fn test_header_value_display() {
        let value = HeaderValue::encode("Subject");
        assert_eq!(value.to_string(), "Subject");
    }

    proptest! {
        #[test]
        fn prop_quoted_printable_output_is_ascii(text in "\\PC{0,200}") {
            let encoded = encode_quoted_printable(&text);
            prop_assert!(encoded.is_ascii());
        }

        #[test]
        fn prop_quoted_printable_lines_bounded(text in "\\PC{0,400}") {
            let encoded = encode_quoted_printable(&text);
            for line in encoded.split("\r\n") {
                prop_assert!(line.len() <= 76);
            }
        }

        #[test]
        fn prop_header_value_output_is_ascii(text in "\\PC{0,100}") {
            let value = HeaderValue::encode(&text);
            prop_assert!(value.as_str().is_ascii());
        }
    }
}
