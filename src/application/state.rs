//! # Session State
//!
//! Conversation transcript and the in-flight guard for one companion session.
//! Held behind a mutex by the session and passed in explicitly, so tests can
//! build a fresh state per case without cross-test leakage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Companion,
}

impl Speaker {
    fn label(&self) -> &'static str {
        match self {
            Speaker::User => "User",
            Speaker::Companion => "Companion",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct SessionState {
    pub transcript: Vec<TranscriptEntry>,
    /// One interaction at a time: one microphone, one editor focus.
    pub busy: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: &str) {
        self.push(Speaker::User, text);
    }

    pub fn push_companion(&mut self, text: &str) {
        self.push(Speaker::Companion, text);
    }

    fn push(&mut self, speaker: Speaker, text: &str) {
        self.transcript.push(TranscriptEntry {
            speaker,
            text: text.to_string(),
            timestamp: Utc::now(),
        });
    }

    /// Render the transcript for inclusion in a model prompt.
    pub fn transcript_prompt(&self) -> String {
        let mut out = String::new();
        for entry in &self.transcript {
            out.push_str(entry.speaker.label());
            out.push_str(": ");
            out.push_str(&entry.text);
            out.push('\n');
        }
        out
    }
}
