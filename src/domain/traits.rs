//! # Domain Traits
//!
//! Abstract interfaces for the external collaborators (editor, voice, panel,
//! model) and for action handlers. Allows for pluggable implementations in the
//! Infrastructure layer and plain mocks in tests.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::types::{ActionRecord, EditRange};

/// The editing surface an effect mutates. Implementations are expected to
/// fail loudly on invalid addressing (line past end, inverted range) rather
/// than silently clamp.
#[async_trait]
pub trait EditSurface: Send {
    /// Insert `text` at the start of `line`, pushing that line down.
    async fn insert_line(&mut self, line: u32, text: &str) -> Result<()>;

    /// Replace the span covered by `range` with `text`.
    async fn replace_range(&mut self, range: &EditRange, text: &str) -> Result<()>;

    /// Select the line span and scroll it into view.
    async fn select_lines(&mut self, start: u32, end: u32) -> Result<()>;
}

/// Abstract interface for the synthesized voice (or any text channel standing
/// in for it).
#[async_trait]
pub trait VoiceSink: Send + Sync {
    async fn say(&self, text: &str) -> Result<()>;
}

/// Abstract interface for the explanation side panel.
#[async_trait]
pub trait ExplainSink: Send + Sync {
    /// Render `markdown`; when `replace` is true, clear previous content first.
    async fn show(&self, markdown: &str, replace: bool) -> Result<()>;
}

/// Abstract interface for the hosted language model.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Generate a completion for `user` under the `system` instructions.
    async fn completion(&self, system: &str, user: &str) -> Result<String>;
}

/// A predicate/effect pair responsible for one action variant.
///
/// `accepts` is a structural test: the discriminant tag *and* the presence and
/// type of every field the effect requires. A record with a valid tag but a
/// missing field must be rejected here, never crash inside `apply`.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    /// Can this handler claim the record?
    fn accepts(&self, record: &ActionRecord) -> bool;

    /// Apply the action against the editing surface.
    async fn apply(&self, record: &ActionRecord, surface: &mut dyn EditSurface) -> Result<()>;

    /// Name used in dispatch diagnostics.
    fn name(&self) -> &'static str;
}
