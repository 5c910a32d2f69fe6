//! # Domain Types
//!
//! The action vocabulary the companion extracts from model replies, plus the
//! raw-record carrier that defers schema validation to the handler predicates.

use serde::{Deserialize, Serialize};

/// A zero-based line/character address inside the editing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditPosition {
    pub line: u32,
    pub character: u32,
}

/// A span between two positions. `end` must be reachable from `start`;
/// the surface enforces that, not the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRange {
    pub start: EditPosition,
    pub end: EditPosition,
}

impl EditRange {
    pub fn new(start_line: u32, start_character: u32, end_line: u32, end_character: u32) -> Self {
        Self {
            start: EditPosition {
                line: start_line,
                character: start_character,
            },
            end: EditPosition {
                line: end_line,
                character: end_character,
            },
        }
    }
}

/// One instruction the companion can carry out, discriminated by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Action {
    /// Spoken/displayed to the user, no editor mutation.
    Conversation { text: String },
    /// Insert `text` as a new line before `line`.
    Comment { line: u32, text: String },
    /// Replace `range` with `text`.
    Edit { range: EditRange, text: String },
    /// Markdown for the side panel; first call replaces, later calls append.
    Explain { text: String },
    /// Select and reveal `start..=end`; `end` defaults to `start`.
    Highlight {
        start: u32,
        #[serde(default)]
        end: Option<u32>,
    },
    /// Spoken to the user; fires the optional completion callback.
    Solved { text: String },
}

/// One record lifted out of a model reply.
///
/// The parser returns these verbatim, without schema validation: a record may
/// carry an unknown `kind`, or a known `kind` with missing fields. Each
/// handler's predicate decides structurally whether it can claim the record.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRecord(serde_json::Value);

impl ActionRecord {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// The universal fallback record: plain conversation text.
    pub fn conversation(text: impl Into<String>) -> Self {
        Self(serde_json::json!({
            "kind": "conversation",
            "text": text.into(),
        }))
    }

    /// The discriminant tag, if the record has one.
    pub fn kind(&self) -> Option<&str> {
        self.0.get("kind").and_then(|k| k.as_str())
    }

    /// Attempt to narrow the record into a well-typed [`Action`]. Fails for
    /// unknown tags and for known tags with missing or wrong-typed fields,
    /// which is exactly the structural test the handler predicates need.
    pub fn decode(&self) -> Option<Action> {
        serde_json::from_value(self.0.clone()).ok()
    }

    pub fn raw(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for ActionRecord {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}
