//! Prompt composition for answer generation
//!
//! Retrieved matches are serialized into context sections and concatenated
//! behind the user's question. Context is capped at a fixed byte budget;
//! when the budget is hit, remaining matches are dropped and a truncation
//! notice is appended.

use crate::retrieval::SearchMatch;

/// Fixed system instruction sent with every completion request
pub const ANSWER_SYSTEM_PROMPT: &str = "You are a retrieval assistant. Answer the user's question using only the \
     provided context sections. If the context does not contain the answer, \
     say so plainly.";

/// Byte budget for the serialized context block
pub const PROMPT_CONTEXT_BUDGET: usize = 16 * 1024;

const TRUNCATION_NOTICE: &str = "[context truncated]";

/// Build the user-side prompt from the query and the retrieved matches
pub fn compose_prompt(query: &str, matches: &[SearchMatch]) -> String {
    let mut context = String::new();

    for m in matches {
        let section = render_section(m);
        if context.len() + section.len() > PROMPT_CONTEXT_BUDGET {
            context.push_str(TRUNCATION_NOTICE);
            context.push('\n');
            break;
        }
        context.push_str(&section);
    }

    format!("Question: {}\n\nContext:\n{}", query, context)
}

fn render_section(m: &SearchMatch) -> String {
    let mut section = format!("--- match {} (score {:.4}) ---\n", m.id, m.score);

    // Sort keys so sections serialize deterministically
    let mut keys: Vec<&String> = m.metadata.keys().collect();
    keys.sort();
    for key in keys {
        let value = &m.metadata[key];
        match value.as_str() {
            Some(s) => section.push_str(&format!("{}: {}\n", key, s)),
            None => section.push_str(&format!("{}: {}\n", key, value)),
        }
    }
    section.push('\n');
    section
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn match_with_text(id: &str, text: &str) -> SearchMatch {
        let mut metadata = HashMap::new();
        metadata.insert(
            "text".to_string(),
            serde_json::Value::String(text.to_string()),
        );
        metadata.insert(
            "source".to_string(),
            serde_json::Value::String("notes.json".to_string()),
        );
        SearchMatch {
            id: id.to_string(),
            score: 0.9,
            values: vec![0.1, 0.2],
            metadata,
        }
    }

    #[test]
    fn test_prompt_contains_query_and_metadata() {
        let matches = vec![match_with_text("doc-1", "Paris is the capital of France")];
        let prompt = compose_prompt("What is the capital of France?", &matches);

        assert!(prompt.contains("What is the capital of France?"));
        assert!(prompt.contains("doc-1"));
        assert!(prompt.contains("Paris is the capital of France"));
        assert!(prompt.contains("source: notes.json"));
        assert!(!prompt.contains(TRUNCATION_NOTICE));
    }

    #[test]
    fn test_empty_matches_yield_empty_context() {
        let prompt = compose_prompt("anything", &[]);
        assert!(prompt.ends_with("Context:\n"));
    }

    #[test]
    fn test_context_budget_appends_notice() {
        let big = "x".repeat(PROMPT_CONTEXT_BUDGET);
        let matches = vec![
            match_with_text("doc-1", &big),
            match_with_text("doc-2", "small"),
        ];
        let prompt = compose_prompt("q", &matches);

        assert!(prompt.contains(TRUNCATION_NOTICE));
        assert!(!prompt.contains("doc-2"));
    }

    #[test]
    fn test_sections_are_deterministic() {
        let matches = vec![match_with_text("doc-1", "alpha")];
        let a = compose_prompt("q", &matches);
        let b = compose_prompt("q", &matches);
        assert_eq!(a, b);
    }
}
