//! # Companion Session
//!
//! The orchestration layer: guard against overlapping interactions, call the
//! model, parse its reply into actions, and dispatch them against the editing
//! surface. Errors from the model or from an effect abort the rest of the
//! interaction and surface as a single user-visible message; whatever applied
//! before the failure stays applied.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Mutex;

use crate::application::dispatch::{DispatchReport, HandlerRegistry};
use crate::application::parsing::parse_actions;
use crate::application::prompt;
use crate::application::state::SessionState;
use crate::domain::traits::{EditSurface, ModelProvider, VoiceSink};

/// How one end-to-end interaction ended.
#[derive(Debug, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// The reply was parsed and dispatched.
    Applied(DispatchReport),
    /// Another interaction was already in flight; this one was refused.
    Busy,
    /// Model call or an effect failed; one error message was surfaced.
    Failed(String),
}

pub struct CompanionSession {
    model: Arc<dyn ModelProvider>,
    registry: HandlerRegistry,
    voice: Arc<dyn VoiceSink>,
    state: Arc<Mutex<SessionState>>,
    /// Current file contents to include in prompts, when the embedder has one.
    file_context: Option<String>,
}

impl CompanionSession {
    pub fn new(
        model: Arc<dyn ModelProvider>,
        registry: HandlerRegistry,
        voice: Arc<dyn VoiceSink>,
        state: Arc<Mutex<SessionState>>,
    ) -> Self {
        Self {
            model,
            registry,
            voice,
            state,
            file_context: None,
        }
    }

    pub fn with_file_context(mut self, text: impl Into<String>) -> Self {
        self.file_context = Some(text.into());
        self
    }

    /// Run one voice/text interaction end to end.
    pub async fn run_interaction(
        &self,
        user_text: &str,
        surface: &mut dyn EditSurface,
    ) -> InteractionOutcome {
        {
            let mut state = self.state.lock().await;
            if state.busy {
                tracing::warn!("Interaction already in flight, refusing new one");
                return InteractionOutcome::Busy;
            }
            state.busy = true;
            state.push_user(user_text);
        }

        let outcome = match self.interact(surface).await {
            Ok(report) => {
                tracing::info!(
                    "Interaction done: {} applied, {} skipped",
                    report.applied,
                    report.skipped
                );
                InteractionOutcome::Applied(report)
            }
            Err(e) => {
                tracing::error!("Interaction failed: {:#}", e);
                let _ = self
                    .voice
                    .say("Sorry, something went wrong with that one.")
                    .await;
                InteractionOutcome::Failed(format!("{:#}", e))
            }
        };

        self.state.lock().await.busy = false;
        outcome
    }

    async fn interact(&self, surface: &mut dyn EditSurface) -> Result<DispatchReport> {
        let user_prompt = {
            let state = self.state.lock().await;
            prompt::interaction_prompt(&state.transcript_prompt(), self.file_context.as_deref())
        };

        let reply = self
            .model
            .completion(prompt::SYSTEM_PROMPT, &user_prompt)
            .await
            .context("model completion failed")?;
        self.state.lock().await.push_companion(&reply);

        let actions = parse_actions(&reply);
        tracing::info!("Parsed {} action(s) from model reply", actions.len());
        self.registry.dispatch_all(&actions, surface).await
    }
}
