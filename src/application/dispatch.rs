//! # Dispatch
//!
//! An ordered registry of action handlers and the loop that routes each parsed
//! record to the first handler that claims it. Actions are applied strictly
//! sequentially; effects mutate shared editor state, so concurrent application
//! would race.

use anyhow::{Context, Result};

use crate::domain::traits::{ActionHandler, EditSurface};
use crate::domain::types::ActionRecord;

/// What a dispatch pass did with its batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Actions a handler claimed and applied.
    pub applied: usize,
    /// Actions no handler claimed (unknown tag or malformed record).
    pub skipped: usize,
}

/// Explicitly constructed, explicitly passed registry: build a fresh one per
/// session (or per test) instead of sharing a process-wide singleton.
///
/// Registration order is the tie-break: when two predicates would both accept
/// a record, the earlier registration wins. An embedder can therefore override
/// a default handler by registering a more specific one before it.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn ActionHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler. No dedup by variant; first match wins at dispatch.
    pub fn register(&mut self, handler: Box<dyn ActionHandler>) {
        self.handlers.push(handler);
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Apply `actions` to `surface`, in order, awaiting each effect before the
    /// next action.
    ///
    /// An unclaimed action is logged and skipped; it never aborts the batch.
    /// A failing effect *does* abort the batch: the error propagates to the
    /// caller and the remaining actions are not attempted. Whatever already
    /// applied stays applied.
    pub async fn dispatch_all(
        &self,
        actions: &[ActionRecord],
        surface: &mut dyn EditSurface,
    ) -> Result<DispatchReport> {
        let mut report = DispatchReport::default();

        for record in actions {
            let Some(handler) = self.handlers.iter().find(|h| h.accepts(record)) else {
                tracing::warn!(
                    "No handler claimed action kind '{}', skipping",
                    record.kind().unwrap_or("<untagged>")
                );
                report.skipped += 1;
                continue;
            };

            tracing::debug!("Applying '{}' action", handler.name());
            handler
                .apply(record, surface)
                .await
                .with_context(|| format!("'{}' action failed", handler.name()))?;
            report.applied += 1;
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::EditRange;
    use anyhow::bail;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Surface that records every call it receives, in order.
    struct RecordingSurface {
        calls: Vec<String>,
    }

    impl RecordingSurface {
        fn new() -> Self {
            Self { calls: Vec::new() }
        }
    }

    #[async_trait]
    impl EditSurface for RecordingSurface {
        async fn insert_line(&mut self, line: u32, text: &str) -> Result<()> {
            self.calls.push(format!("insert:{}:{}", line, text));
            Ok(())
        }

        async fn replace_range(&mut self, range: &EditRange, text: &str) -> Result<()> {
            self.calls.push(format!(
                "replace:{}:{}-{}:{}:{}",
                range.start.line, range.start.character, range.end.line, range.end.character, text
            ));
            Ok(())
        }

        async fn select_lines(&mut self, start: u32, end: u32) -> Result<()> {
            self.calls.push(format!("select:{}-{}", start, end));
            Ok(())
        }
    }

    /// Claims every record carrying its tag; marks the surface when applied.
    struct TagProbe {
        tag: &'static str,
        label: &'static str,
        hits: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ActionHandler for TagProbe {
        fn accepts(&self, record: &ActionRecord) -> bool {
            record.kind() == Some(self.tag)
        }

        async fn apply(&self, _record: &ActionRecord, surface: &mut dyn EditSurface) -> Result<()> {
            self.hits.fetch_add(1, Ordering::SeqCst);
            surface.insert_line(0, self.label).await
        }

        fn name(&self) -> &'static str {
            self.label
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl ActionHandler for FailingHandler {
        fn accepts(&self, record: &ActionRecord) -> bool {
            record.kind() == Some("boom")
        }

        async fn apply(&self, _: &ActionRecord, _: &mut dyn EditSurface) -> Result<()> {
            bail!("surface rejected the mutation")
        }

        fn name(&self) -> &'static str {
            "boom"
        }
    }

    fn probe(tag: &'static str, label: &'static str) -> (Box<TagProbe>, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        (
            Box::new(TagProbe {
                tag,
                label,
                hits: hits.clone(),
            }),
            hits,
        )
    }

    #[tokio::test]
    async fn actions_apply_in_input_order() {
        let mut registry = HandlerRegistry::new();
        let (a, _) = probe("alpha", "a");
        let (b, _) = probe("beta", "b");
        let (c, _) = probe("gamma", "c");
        registry.register(a);
        registry.register(b);
        registry.register(c);

        let actions = vec![
            ActionRecord::new(json!({"kind": "gamma"})),
            ActionRecord::new(json!({"kind": "alpha"})),
            ActionRecord::new(json!({"kind": "beta"})),
        ];
        let mut surface = RecordingSurface::new();
        let report = registry.dispatch_all(&actions, &mut surface).await.unwrap();

        assert_eq!(report, DispatchReport { applied: 3, skipped: 0 });
        assert_eq!(surface.calls, vec!["insert:0:c", "insert:0:a", "insert:0:b"]);
    }

    #[tokio::test]
    async fn first_registered_handler_wins() {
        let mut registry = HandlerRegistry::new();
        let (first, first_hits) = probe("alpha", "first");
        let (second, second_hits) = probe("alpha", "second");
        registry.register(first);
        registry.register(second);

        let actions = vec![ActionRecord::new(json!({"kind": "alpha"}))];
        let mut surface = RecordingSurface::new();
        registry.dispatch_all(&actions, &mut surface).await.unwrap();

        assert_eq!(first_hits.load(Ordering::SeqCst), 1);
        assert_eq!(second_hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_tag_is_skipped_not_fatal() {
        let mut registry = HandlerRegistry::new();
        let (known, hits) = probe("alpha", "known");
        registry.register(known);

        let actions = vec![
            ActionRecord::new(json!({"kind": "teleport", "to": "mars"})),
            ActionRecord::new(json!({"kind": "alpha"})),
        ];
        let mut surface = RecordingSurface::new();
        let report = registry.dispatch_all(&actions, &mut surface).await.unwrap();

        assert_eq!(report, DispatchReport { applied: 1, skipped: 1 });
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn effect_failure_aborts_the_rest_of_the_batch() {
        let mut registry = HandlerRegistry::new();
        let (later, later_hits) = probe("alpha", "later");
        registry.register(Box::new(FailingHandler));
        registry.register(later);

        let actions = vec![
            ActionRecord::new(json!({"kind": "boom"})),
            ActionRecord::new(json!({"kind": "alpha"})),
        ];
        let mut surface = RecordingSurface::new();
        let err = registry
            .dispatch_all(&actions, &mut surface)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("'boom' action failed"));
        assert_eq!(later_hits.load(Ordering::SeqCst), 0);
        assert!(surface.calls.is_empty());
    }

    #[tokio::test]
    async fn empty_registry_skips_everything() {
        let registry = HandlerRegistry::new();
        let actions = vec![ActionRecord::conversation("hi")];
        let mut surface = RecordingSurface::new();
        let report = registry.dispatch_all(&actions, &mut surface).await.unwrap();
        assert_eq!(report, DispatchReport { applied: 0, skipped: 1 });
    }
}
