//! Top-level view model: keeps one context's lists in sync with the store.
//!
//! The authoritative set is a map keyed by id. The pending and completed
//! lists handed out to renderers are immutable snapshots rebuilt after
//! every applied change, so a holder of an old snapshot never sees it
//! mutate underneath.

use super::intent::ItemIntent;
use super::store::TodoStore;
use crate::broadcast::{BroadcastChannel, EventListener};
use crate::errors::{AppError, AppResult};
use crate::models::{ChangeEvent, ChangeKind, ListOptions, TodoRecord, sort_items};
use crate::ui::messages::warning;
use std::collections::HashMap;
use std::sync::Arc;

/// What `TodoView::apply` did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The event names a record this view does not hold.
    Ignored,
    /// Older than the cached copy of the record; discarded.
    Stale,
}

/// Result of draining the subscription once.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub applied: Vec<ChangeEvent>,
    pub ignored: usize,
    pub stale: usize,
    pub rejected: usize,
}

pub struct TodoView {
    channel: BroadcastChannel,
    listener: Option<EventListener>,
    records: HashMap<String, TodoRecord>,
    pending: Arc<[TodoRecord]>,
    completed: Arc<[TodoRecord]>,
    active: Option<String>,
}

impl TodoView {
    pub fn new(channel: BroadcastChannel) -> Self {
        Self {
            channel,
            listener: None,
            records: HashMap::new(),
            pending: Arc::from(Vec::new()),
            completed: Arc::from(Vec::new()),
            active: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.listener.is_some()
    }

    /// Subscribe, then load both partitions.
    ///
    /// Subscribing first means nothing committed during the load is lost;
    /// anything delivered twice is absorbed by `apply`. Calling this again
    /// is a no-op.
    pub fn initialize(&mut self, store: &TodoStore) -> AppResult<()> {
        if self.listener.is_some() {
            return Ok(());
        }

        let listener = self.channel.listen()?;

        let mut records = HashMap::new();
        for item in store
            .list(ListOptions::pending())?
            .into_iter()
            .chain(store.list(ListOptions::completed())?)
        {
            records.insert(item.id.clone(), item);
        }

        self.records = records;
        self.listener = Some(listener);
        self.rebuild();
        Ok(())
    }

    pub fn pending(&self) -> Arc<[TodoRecord]> {
        Arc::clone(&self.pending)
    }

    pub fn completed(&self) -> Arc<[TodoRecord]> {
        Arc::clone(&self.completed)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, id: &str) -> Option<&TodoRecord> {
        self.records.get(id)
    }

    /// Make `id` the item shown in the detail pane. An unknown id clears
    /// the selection.
    pub fn select(&mut self, id: &str) -> Option<&TodoRecord> {
        self.active = self.records.contains_key(id).then(|| id.to_string());
        self.active_item()
    }

    pub fn active_item(&self) -> Option<&TodoRecord> {
        self.active.as_deref().and_then(|id| self.records.get(id))
    }

    /// Turn a leaf-view intent into the matching store call.
    pub fn handle_intent(&self, store: &TodoStore, intent: ItemIntent) -> AppResult<TodoRecord> {
        match intent {
            ItemIntent::SetDone { id, value: true } => store.mark_complete(&id),
            ItemIntent::SetDone { id, value: false } => store.mark_incomplete(&id),
        }
    }

    /// Apply every event queued on the subscription.
    ///
    /// Messages that cannot be decoded (unknown type, bad payload) are
    /// logged and skipped.
    pub fn sync(&mut self) -> SyncReport {
        let mut report = SyncReport::default();

        let Some(listener) = &self.listener else {
            return report;
        };

        for received in listener.drain() {
            match received {
                Ok(event) => match self.apply(event.clone()) {
                    ApplyOutcome::Applied => report.applied.push(event),
                    ApplyOutcome::Ignored => report.ignored += 1,
                    ApplyOutcome::Stale => report.stale += 1,
                },
                Err(e @ AppError::UnknownEventType(_)) => {
                    warning(format!("Unknown store event: {}", e));
                    report.rejected += 1;
                }
                Err(e) => {
                    warning(format!("Dropped store event: {}", e));
                    report.rejected += 1;
                }
            }
        }

        report
    }

    /// Fold one change event into the view.
    pub fn apply(&mut self, event: ChangeEvent) -> ApplyOutcome {
        let kind = event.kind();

        if kind == ChangeKind::Delete {
            return self.apply_delete(event.id());
        }

        let Some(item) = event.into_item() else {
            return ApplyOutcome::Ignored;
        };

        if let Some(cached) = self.records.get(&item.id)
            && cached.updated > item.updated
        {
            return ApplyOutcome::Stale;
        }

        if kind == ChangeKind::Create {
            self.active = Some(item.id.clone());
        } else if !self.records.contains_key(&item.id) {
            // update / complete / incomplete only touch records we hold
            return ApplyOutcome::Ignored;
        }

        self.records.insert(item.id.clone(), item);

        self.rebuild();
        ApplyOutcome::Applied
    }

    fn apply_delete(&mut self, id: &str) -> ApplyOutcome {
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }

        if self.records.remove(id).is_none() {
            return ApplyOutcome::Ignored;
        }

        self.rebuild();
        ApplyOutcome::Applied
    }

    fn rebuild(&mut self) {
        let (mut done, mut open): (Vec<TodoRecord>, Vec<TodoRecord>) = self
            .records
            .values()
            .cloned()
            .partition(|item| item.completed);

        open.sort_by(sort_items);
        done.sort_by(sort_items);

        self.pending = Arc::from(open);
        self.completed = Arc::from(done);
    }
}
