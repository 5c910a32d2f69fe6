//! # Action Handlers
//!
//! One predicate/effect pair per action variant. Every predicate decodes the
//! raw record into the typed [`Action`](crate::domain::types::Action) and
//! checks the variant, so a record with the right tag but missing fields is
//! rejected structurally instead of crashing inside the effect.

mod comment;
mod conversation;
mod edit;
mod explain;
mod highlight;
mod solved;

pub use comment::CommentHandler;
pub use conversation::ConversationHandler;
pub use edit::EditHandler;
pub use explain::ExplainHandler;
pub use highlight::HighlightHandler;
pub use solved::{SolvedCallback, SolvedHandler};

use std::sync::Arc;

use crate::application::dispatch::HandlerRegistry;
use crate::domain::traits::{ExplainSink, VoiceSink};

/// Build a registry covering every built-in action variant.
///
/// Embedders that want to override a variant should build their own registry
/// and register the more specific handler before the built-in one; registration
/// order is the tie-break at dispatch time.
pub fn default_registry(
    voice: Arc<dyn VoiceSink>,
    panel: Arc<dyn ExplainSink>,
    on_solved: Option<SolvedCallback>,
) -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.register(Box::new(ConversationHandler::new(voice.clone())));
    registry.register(Box::new(CommentHandler));
    registry.register(Box::new(EditHandler));
    registry.register(Box::new(ExplainHandler::new(panel)));
    registry.register(Box::new(HighlightHandler));
    registry.register(Box::new(SolvedHandler::new(voice, on_solved)));
    registry
}
