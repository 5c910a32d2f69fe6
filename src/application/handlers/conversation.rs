//! Conversation: free text spoken to the user, no editor mutation.

use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::domain::traits::{ActionHandler, EditSurface, VoiceSink};
use crate::domain::types::{Action, ActionRecord};

pub struct ConversationHandler {
    voice: Arc<dyn VoiceSink>,
}

impl ConversationHandler {
    pub fn new(voice: Arc<dyn VoiceSink>) -> Self {
        Self { voice }
    }
}

#[async_trait]
impl ActionHandler for ConversationHandler {
    fn accepts(&self, record: &ActionRecord) -> bool {
        matches!(record.decode(), Some(Action::Conversation { .. }))
    }

    async fn apply(&self, record: &ActionRecord, _surface: &mut dyn EditSurface) -> Result<()> {
        let Some(Action::Conversation { text }) = record.decode() else {
            bail!("record no longer decodes as a conversation action");
        };
        self.voice.say(&text).await
    }

    fn name(&self) -> &'static str {
        "conversation"
    }
}
