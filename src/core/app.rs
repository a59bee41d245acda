use super::intent::ItemIntent;
use super::store::TodoStore;
use super::view::{SyncReport, TodoView};
use crate::broadcast::{BroadcastChannel, MessageBus};
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::{TodoDraft, TodoRecord};
use std::sync::Arc;

/// One running context: a store and the top-level view listening to it.
///
/// Several contexts sharing a database file and a bus behave like several
/// open windows of the application.
pub struct TodoApp {
    pub store: TodoStore,
    pub view: TodoView,
}

impl TodoApp {
    /// Build a context over `pool` and initialize its view.
    pub fn open(pool: DbPool, bus: Arc<dyn MessageBus>, channel: &str) -> AppResult<Self> {
        let store = TodoStore::new(pool, BroadcastChannel::new(Arc::clone(&bus), channel));
        let mut view = TodoView::new(BroadcastChannel::new(bus, channel));
        view.initialize(&store)?;
        Ok(Self { store, view })
    }

    pub fn from_config(cfg: &Config, bus: Arc<dyn MessageBus>) -> AppResult<Self> {
        Self::open(DbPool::new(cfg.database_path()), bus, &cfg.channel)
    }

    /// Pull pending broadcast events into the view.
    pub fn sync(&mut self) -> SyncReport {
        self.view.sync()
    }

    /// The "add" button: a new, empty, pending item.
    pub fn add_empty_item(&mut self) -> AppResult<TodoRecord> {
        let item = self.store.add(TodoDraft::new("").with_completed(0))?;
        self.sync();
        Ok(item)
    }

    pub fn dispatch(&mut self, intent: ItemIntent) -> AppResult<TodoRecord> {
        let item = self.view.handle_intent(&self.store, intent)?;
        self.sync();
        Ok(item)
    }
}
