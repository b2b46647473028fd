//! PDF text extraction
//!
//! Extraction runs on the blocking pool; pdf-extract walks the whole
//! document in memory.

use super::DecodeOutcome;
use crate::error::{Error, Result};

pub(super) async fn decode(payload: Vec<u8>) -> Result<DecodeOutcome> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&payload))
        .await
        .map_err(|e| Error::Internal(format!("PDF extraction task failed: {}", e)))?
        .map_err(|e| Error::document_parse("PDF", e.to_string()))?;

    Ok(DecodeOutcome::Text(text))
}
