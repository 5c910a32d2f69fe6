//! # Console Sinks
//!
//! Stdout implementations of the voice and explain-panel interfaces. They
//! stand in for the synthesized voice and the side panel, which live in the
//! host editor and are collaborators outside this crate.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::traits::{ExplainSink, VoiceSink};

/// Prints spoken lines to stdout. With `muted`, replies are only logged.
pub struct ConsoleVoice {
    muted: bool,
}

impl ConsoleVoice {
    pub fn new(muted: bool) -> Self {
        Self { muted }
    }
}

#[async_trait]
impl VoiceSink for ConsoleVoice {
    async fn say(&self, text: &str) -> Result<()> {
        if self.muted {
            tracing::info!("(muted) {}", text);
        } else {
            println!("🔊 {}", text);
        }
        Ok(())
    }
}

/// Prints panel content to stdout, with a header when the panel is replaced.
pub struct ConsolePanel;

#[async_trait]
impl ExplainSink for ConsolePanel {
    async fn show(&self, markdown: &str, replace: bool) -> Result<()> {
        if replace {
            println!("── explanation ──────────────────────");
        }
        println!("{}", markdown);
        Ok(())
    }
}
