//! # Sidekick
//!
//! Core of a voice-interactive coding companion: parse a model reply into a
//! sequence of typed editor actions and dispatch each one, in order, to the
//! first handler that claims it. The editor itself, audio, and the hosted
//! model sit behind traits so embedders (and tests) can supply their own.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::dispatch::{DispatchReport, HandlerRegistry};
pub use application::handlers::default_registry;
pub use application::parsing::parse_actions;
pub use application::session::{CompanionSession, InteractionOutcome};
pub use application::state::SessionState;
pub use domain::config::AppConfig;
pub use domain::traits::{ActionHandler, EditSurface, ExplainSink, ModelProvider, VoiceSink};
pub use domain::types::{Action, ActionRecord, EditPosition, EditRange};
