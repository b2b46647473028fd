//! XML catalog decoding
//!
//! Catalogs are a fixed schema: a `<catalog>` root with `<offer>` entries,
//! each carrying a name, description, and price. Feeds routinely embed
//! escaped HTML inside name and description, so both fields are run through
//! the tag stripper before the offers are joined into one newline-delimited
//! text block.

use super::{strip_tags, DecodeOutcome};
use crate::error::{Error, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Catalog {
    #[serde(rename = "offer", default)]
    offers: Vec<Offer>,
}

#[derive(Debug, Deserialize)]
struct Offer {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    price: String,
}

pub(super) fn decode(payload: &[u8]) -> Result<DecodeOutcome> {
    let text = std::str::from_utf8(payload)
        .map_err(|e| Error::document_parse("XML", e.to_string()))?;
    let catalog: Catalog =
        quick_xml::de::from_str(text).map_err(|e| Error::document_parse("XML", e.to_string()))?;

    // Zero offers yield an empty block that still flows to embedding.
    let lines: Vec<String> = catalog
        .offers
        .iter()
        .map(|offer| {
            format!(
                "{}: {} (price: {})",
                strip_tags(&offer.name).trim(),
                strip_tags(&offer.description).trim(),
                offer.price.trim()
            )
        })
        .collect();

    Ok(DecodeOutcome::Text(lines.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_offer_with_markup() {
        let xml = br#"<catalog>
            <offer>
                <name>&lt;b&gt;Widget&lt;/b&gt;</name>
                <description>&lt;i&gt;desc&lt;/i&gt;</description>
                <price>10</price>
            </offer>
        </catalog>"#;

        let outcome = decode(xml).unwrap();
        let DecodeOutcome::Text(text) = outcome else {
            panic!("expected text outcome");
        };
        assert!(text.contains("Widget"));
        assert!(text.contains("desc"));
        assert!(text.contains("10"));
        assert!(!text.contains('<'));
        assert!(!text.contains('>'));
    }

    #[test]
    fn test_multiple_offers_newline_delimited() {
        let xml = br#"<catalog>
            <offer><name>First</name><description>one</description><price>1</price></offer>
            <offer><name>Second</name><description>two</description><price>2</price></offer>
        </catalog>"#;

        let DecodeOutcome::Text(text) = decode(xml).unwrap() else {
            panic!("expected text outcome");
        };
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("First"));
        assert!(lines[1].contains("Second"));
    }

    #[test]
    fn test_empty_catalog_yields_empty_text() {
        let outcome = decode(b"<catalog></catalog>").unwrap();
        assert_eq!(outcome, DecodeOutcome::Text(String::new()));
    }

    #[test]
    fn test_malformed_xml() {
        assert!(decode(b"<catalog><offer>").is_err());
        assert!(decode(b"not xml at all").is_err());
    }
}
