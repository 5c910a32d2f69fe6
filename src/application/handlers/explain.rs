//! Explain: markdown for the side panel. The first explanation of a session
//! replaces the panel content, every later one appends.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::domain::traits::{ActionHandler, EditSurface, ExplainSink};
use crate::domain::types::{Action, ActionRecord};

pub struct ExplainHandler {
    panel: Arc<dyn ExplainSink>,
    /// True only before the first explanation; the one piece of mutable state
    /// scoped to a handler instance rather than to the registry.
    fresh: AtomicBool,
}

impl ExplainHandler {
    pub fn new(panel: Arc<dyn ExplainSink>) -> Self {
        Self {
            panel,
            fresh: AtomicBool::new(true),
        }
    }
}

#[async_trait]
impl ActionHandler for ExplainHandler {
    fn accepts(&self, record: &ActionRecord) -> bool {
        matches!(record.decode(), Some(Action::Explain { .. }))
    }

    async fn apply(&self, record: &ActionRecord, _surface: &mut dyn EditSurface) -> Result<()> {
        let Some(Action::Explain { text }) = record.decode() else {
            bail!("record no longer decodes as an explain action");
        };
        let replace = self.fresh.swap(false, Ordering::SeqCst);
        self.panel.show(&text, replace).await
    }

    fn name(&self) -> &'static str {
        "explain"
    }
}
