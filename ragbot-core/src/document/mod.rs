//! Document classification and text extraction
//!
//! A document arrives either as a chat attachment or as bytes fetched from a
//! user-supplied URL. The format is picked by filename suffix alone (no
//! content sniffing); each format has its own decoder that either yields the
//! plain text to vectorize or fails atomically.

mod json;
mod pdf;
mod xml;

use crate::error::{Error, Result};
use std::fmt;
use std::sync::OnceLock;

/// Supported document formats, classified by filename suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// `.pdf` suffix
    Pdf,
    /// `.json` suffix
    Json,
    /// `.xml` suffix
    Xml,
    /// Anything else; rejected before decoding
    Unknown,
}

impl DocumentKind {
    /// Classify a filename or URL by its suffix (case-sensitive)
    pub fn from_name(name: &str) -> Self {
        if name.ends_with(".pdf") {
            Self::Pdf
        } else if name.ends_with(".json") {
            Self::Json
        } else if name.ends_with(".xml") {
            Self::Xml
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pdf => "PDF",
            Self::Json => "JSON",
            Self::Xml => "XML",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Result of decoding a document payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// Extracted plain text, ready for embedding. May be empty (an empty
    /// catalog still flows to embedding).
    Text(String),
    /// The payload parsed but carried no text to vectorize; nothing is
    /// indexed.
    NoText,
}

/// Decode a document payload into plain text
///
/// Whole-document decode either succeeds or fails; no partial recovery is
/// attempted.
pub async fn decode(kind: DocumentKind, payload: Vec<u8>) -> Result<DecodeOutcome> {
    match kind {
        DocumentKind::Pdf => pdf::decode(payload).await,
        DocumentKind::Json => json::decode(&payload),
        DocumentKind::Xml => xml::decode(&payload),
        DocumentKind::Unknown => Err(Error::document_parse(
            "unknown",
            "unsupported filename suffix",
        )),
    }
}

/// True when the string is an absolute http(s) URL reference
pub fn looks_like_url(text: &str) -> bool {
    text.starts_with("http://") || text.starts_with("https://")
}

/// Remove every `<...>` markup tag from the text
///
/// Idempotent: stripping twice equals stripping once.
pub fn strip_tags(text: &str) -> String {
    static TAG_PATTERN: OnceLock<regex::Regex> = OnceLock::new();
    let pattern =
        TAG_PATTERN.get_or_init(|| regex::Regex::new(r"<[^>]*>").expect("tag pattern"));
    pattern.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_suffixes() {
        assert_eq!(DocumentKind::from_name("report.pdf"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_name("data.json"), DocumentKind::Json);
        assert_eq!(DocumentKind::from_name("catalog.xml"), DocumentKind::Xml);
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert_eq!(DocumentKind::from_name("report.PDF"), DocumentKind::Unknown);
        assert_eq!(DocumentKind::from_name("data.Json"), DocumentKind::Unknown);
        assert_eq!(DocumentKind::from_name("catalog.XML"), DocumentKind::Unknown);
    }

    #[test]
    fn test_classify_unknown_suffixes() {
        assert_eq!(DocumentKind::from_name("notes.txt"), DocumentKind::Unknown);
        assert_eq!(DocumentKind::from_name("archive.tar.gz"), DocumentKind::Unknown);
        assert_eq!(DocumentKind::from_name("noextension"), DocumentKind::Unknown);
    }

    #[test]
    fn test_classify_urls_by_suffix() {
        assert_eq!(
            DocumentKind::from_name("https://example.com/feed/catalog.xml"),
            DocumentKind::Xml
        );
    }

    #[test]
    fn test_url_detection() {
        assert!(looks_like_url("http://example.com/doc.pdf"));
        assert!(looks_like_url("https://example.com"));
        assert!(!looks_like_url("ftp://example.com"));
        assert!(!looks_like_url("example.com/doc.pdf"));
        assert!(!looks_like_url("what is http?"));
        assert!(!looks_like_url(""));
    }

    #[test]
    fn test_strip_tags_removes_markup() {
        assert_eq!(strip_tags("<b>Widget</b>"), "Widget");
        assert_eq!(strip_tags("<i>desc</i>"), "desc");
        assert_eq!(strip_tags("plain text"), "plain text");
        assert_eq!(strip_tags("a <tag> between"), "a  between");
    }

    #[test]
    fn test_strip_tags_leaves_unclosed_angle_alone() {
        assert_eq!(strip_tags("price < 10"), "price < 10");
    }

    #[test]
    fn test_strip_tags_is_idempotent() {
        let once = strip_tags("<p>Hello <b>world</b></p>");
        let twice = strip_tags(&once);
        assert_eq!(once, twice);
        assert_eq!(once, "Hello world");
    }

    #[tokio::test]
    async fn test_decode_unknown_errors() {
        let result = decode(DocumentKind::Unknown, b"payload".to_vec()).await;
        assert!(result.is_err());
    }
}
