//! MIME content types and filename-based inference.

use std::fmt;
use std::path::Path;

/// MIME content type with parameters.
///
/// Parameters keep insertion order so rendered documents are deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    /// Main type (e.g., "text", "image", "multipart").
    pub main_type: String,
    /// Subtype (e.g., "plain", "html", "png").
    pub sub_type: String,
    /// Parameters (e.g., charset=utf-8, boundary=xxx).
    pub parameters: Vec<(String, String)>,
}

impl ContentType {
    /// Creates a new content type without parameters.
    #[must_use]
    pub fn new(main_type: impl Into<String>, sub_type: impl Into<String>) -> Self {
        Self {
            main_type: main_type.into(),
            sub_type: sub_type.into(),
            parameters: Vec::new(),
        }
    }

    /// Creates a text/plain content type with UTF-8 charset.
    #[must_use]
    pub fn text_plain() -> Self {
        Self::new("text", "plain").with_parameter("charset", "utf-8")
    }

    /// Creates a text/html content type with UTF-8 charset.
    #[must_use]
    pub fn text_html() -> Self {
        Self::new("text", "html").with_parameter("charset", "utf-8")
    }

    /// Creates an application/octet-stream content type.
    #[must_use]
    pub fn octet_stream() -> Self {
        Self::new("application", "octet-stream")
    }

    /// Creates a multipart/alternative content type with boundary.
    #[must_use]
    pub fn multipart_alternative(boundary: impl Into<String>) -> Self {
        Self::new("multipart", "alternative").with_parameter("boundary", boundary)
    }

    /// Creates a multipart/related content type with boundary.
    #[must_use]
    pub fn multipart_related(boundary: impl Into<String>) -> Self {
        Self::new("multipart", "related").with_parameter("boundary", boundary)
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push((key.into(), value.into()));
        self
    }

    /// Returns the boundary parameter if present.
    #[must_use]
    pub fn boundary(&self) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(key, _)| key == "boundary")
            .map(|(_, value)| value.as_str())
    }

    /// Infers a content type from a filename extension.
    ///
    /// Returns `None` for unknown extensions and for filenames carrying a
    /// compression suffix (the caller is expected to fall back to
    /// `application/octet-stream`). Inference never inspects content.
    #[must_use]
    pub fn from_filename(name: &str) -> Option<Self> {
        if has_compression_suffix(name) {
            return None;
        }

        let extension = Path::new(name).extension()?.to_str()?.to_lowercase();

        let (main_type, sub_type) = match extension.as_str() {
            "txt" | "text" | "log" => ("text", "plain"),
            "html" | "htm" => ("text", "html"),
            "css" => ("text", "css"),
            "csv" => ("text", "csv"),
            "md" => ("text", "markdown"),
            "xml" => ("text", "xml"),
            "js" => ("text", "javascript"),
            "png" => ("image", "png"),
            "jpg" | "jpeg" => ("image", "jpeg"),
            "gif" => ("image", "gif"),
            "webp" => ("image", "webp"),
            "bmp" => ("image", "bmp"),
            "svg" => ("image", "svg+xml"),
            "ico" => ("image", "vnd.microsoft.icon"),
            "tif" | "tiff" => ("image", "tiff"),
            "wav" => ("audio", "x-wav"),
            "mp3" => ("audio", "mpeg"),
            "ogg" => ("audio", "ogg"),
            "flac" => ("audio", "flac"),
            "mp4" => ("video", "mp4"),
            "mov" => ("video", "quicktime"),
            "avi" => ("video", "x-msvideo"),
            "json" => ("application", "json"),
            "pdf" => ("application", "pdf"),
            "zip" => ("application", "zip"),
            "tar" => ("application", "x-tar"),
            "doc" => ("application", "msword"),
            "xls" => ("application", "vnd.ms-excel"),
            "bin" | "exe" | "dll" => ("application", "octet-stream"),
            _ => return None,
        };

        Some(Self::new(main_type, sub_type))
    }
}

/// Checks whether a filename ends in a standalone compression suffix.
///
/// Compressed files map to `application/octet-stream` regardless of the
/// underlying type, matching the guess-type-plus-encoding rule.
#[must_use]
pub fn has_compression_suffix(name: &str) -> bool {
    let extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);

    matches!(
        extension.as_deref(),
        Some("gz" | "bz2" | "xz" | "zst" | "br" | "z")
    )
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let main = &self.main_type;
        let sub = &self.sub_type;
        write!(f, "{main}/{sub}")?;

        for (key, value) in &self.parameters {
            // Quote values containing tspecials or whitespace
            if value.contains(|c: char| c.is_whitespace() || "()<>@,;:\\\"/[]?=".contains(c)) {
                write!(f, "; {key}=\"{value}\"")?;
            } else {
                write!(f, "; {key}={value}")?;
            }
        }

        Ok(())
    }
}
