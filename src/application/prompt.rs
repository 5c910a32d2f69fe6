//! # Prompts
//!
//! The system instructions sent with every completion, and the assembly of
//! the per-turn prompt from the running transcript.

/// Instructs the model to answer with a fenced JSON array of actions. The
/// parser tolerates replies that ignore this, so the wording is guidance, not
/// a contract.
pub const SYSTEM_PROMPT: &str = r#"You are a friendly coding companion sitting next to the user in their editor.
Reply with a fenced JSON array of actions:

```json
[
  {"kind": "conversation", "text": "spoken reply"},
  {"kind": "comment", "line": 3, "text": "// inserted before line 3"},
  {"kind": "edit", "range": {"start": {"line": 1, "character": 0}, "end": {"line": 1, "character": 10}}, "text": "replacement"},
  {"kind": "explain", "text": "markdown for the side panel"},
  {"kind": "highlight", "start": 3, "end": 5},
  {"kind": "solved", "text": "spoken when the task is finished"}
]
```

Lines and characters are zero-based. Keep spoken text short and natural.
If you have nothing to change, answer in plain prose instead."#;

/// Compose the user-side prompt for one turn. The transcript already contains
/// the latest user message; `file_context` is the current file when the caller
/// has one to share.
pub fn interaction_prompt(transcript: &str, file_context: Option<&str>) -> String {
    match file_context {
        Some(text) => format!(
            "# Current file\n```\n{}\n```\n\n# Conversation so far\n{}",
            text, transcript
        ),
        None => format!("# Conversation so far\n{}", transcript),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_buffer_and_transcript() {
        let prompt = interaction_prompt("User: hi\n", Some("fn main() {}\n"));
        assert!(prompt.contains("fn main() {}"));
        assert!(prompt.contains("User: hi"));
    }

    #[test]
    fn prompt_without_file_context() {
        let prompt = interaction_prompt("User: hi\n", None);
        assert!(!prompt.contains("# Current file"));
        assert!(prompt.contains("User: hi"));
    }
}
