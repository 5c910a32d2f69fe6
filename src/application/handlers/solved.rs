//! Solved: spoken wrap-up, plus an optional completion callback for the
//! embedder (the overlay celebrates, timers reset, and so on).

use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::domain::traits::{ActionHandler, EditSurface, VoiceSink};
use crate::domain::types::{Action, ActionRecord};

pub type SolvedCallback = Box<dyn Fn() + Send + Sync>;

pub struct SolvedHandler {
    voice: Arc<dyn VoiceSink>,
    on_solved: Option<SolvedCallback>,
}

impl SolvedHandler {
    pub fn new(voice: Arc<dyn VoiceSink>, on_solved: Option<SolvedCallback>) -> Self {
        Self { voice, on_solved }
    }
}

#[async_trait]
impl ActionHandler for SolvedHandler {
    fn accepts(&self, record: &ActionRecord) -> bool {
        matches!(record.decode(), Some(Action::Solved { .. }))
    }

    async fn apply(&self, record: &ActionRecord, _surface: &mut dyn EditSurface) -> Result<()> {
        let Some(Action::Solved { text }) = record.decode() else {
            bail!("record no longer decodes as a solved action");
        };
        self.voice.say(&text).await?;
        if let Some(callback) = &self.on_solved {
            callback();
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "solved"
    }
}
