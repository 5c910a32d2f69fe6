//! # Parsing
//!
//! Turns a raw model reply into an ordered list of action records. The model
//! is asked for a fenced JSON array of actions but is not contractually
//! guaranteed to produce one, so anything that does not parse degrades into a
//! single conversation record over the full reply. This function never fails
//! and never returns an empty list.

use crate::domain::types::ActionRecord;

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Parse one model reply into action records, in document order.
pub fn parse_actions(response: &str) -> Vec<ActionRecord> {
    let Some(payload) = extract_json_block(response) else {
        // No fenced array: plain conversational reply.
        tracing::debug!("No action array in model reply, treating as conversation");
        return vec![ActionRecord::conversation(response.trim())];
    };

    match serde_json::from_str::<Vec<serde_json::Value>>(payload) {
        Ok(records) if !records.is_empty() => {
            records.into_iter().map(ActionRecord::new).collect()
        }
        Ok(_) => {
            tracing::warn!("Model reply contained an empty action array");
            vec![ActionRecord::conversation(response.trim())]
        }
        Err(e) => {
            // Fenced but broken JSON: fall back over the *whole* reply, not
            // the broken fragment.
            tracing::warn!("Failed to parse fenced action block: {}", e);
            vec![ActionRecord::conversation(response.trim())]
        }
    }
}

/// Substring extraction, not a grammar: find the opening fence, the first `[`
/// at or after it, and cut at the next closing fence. A closing fence inside a
/// JSON string value therefore truncates the payload early; parsing then fails
/// and the conversation fallback takes over.
fn extract_json_block(response: &str) -> Option<&str> {
    let marker = response.find(FENCE_OPEN)?;
    let after = &response[marker + FENCE_OPEN.len()..];
    let open = after.find('[')?;
    let body = &after[open..];
    let close = body.find(FENCE_CLOSE)?;
    Some(&body[..close])
}
