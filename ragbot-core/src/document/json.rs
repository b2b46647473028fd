//! JSON document decoding
//!
//! The payload must be a JSON object carrying a string-valued `text` field.
//! An object without one is reported as "no text to vectorize" and nothing
//! is indexed.

use super::DecodeOutcome;
use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;

pub(super) fn decode(payload: &[u8]) -> Result<DecodeOutcome> {
    let map: HashMap<String, Value> = serde_json::from_slice(payload)
        .map_err(|e| Error::document_parse("JSON", e.to_string()))?;

    match map.get("text").and_then(Value::as_str) {
        Some(text) => Ok(DecodeOutcome::Text(text.to_string())),
        None => Ok(DecodeOutcome::NoText),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field_passthrough() {
        let outcome = decode(br#"{"text": "hello world", "source": "notes"}"#).unwrap();
        assert_eq!(outcome, DecodeOutcome::Text("hello world".to_string()));
    }

    #[test]
    fn test_missing_text_field() {
        let outcome = decode(br#"{"title": "no body here"}"#).unwrap();
        assert_eq!(outcome, DecodeOutcome::NoText);
    }

    #[test]
    fn test_non_string_text_field() {
        let outcome = decode(br#"{"text": 42}"#).unwrap();
        assert_eq!(outcome, DecodeOutcome::NoText);
    }

    #[test]
    fn test_malformed_payload() {
        assert!(decode(b"{not json").is_err());
    }

    #[test]
    fn test_non_object_payload() {
        assert!(decode(b"[1, 2, 3]").is_err());
    }
}
