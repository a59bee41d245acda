use super::intent::ItemIntent;
use super::store::TodoStore;
use crate::errors::{AppError, AppResult};
use crate::models::TodoRecord;

/// Edit buffer behind the detail pane.
///
/// Holds the record being edited plus the uncommitted field values.
#[derive(Debug, Clone, Default)]
pub struct DetailEditor {
    item: Option<TodoRecord>,
    pub title: String,
    pub description: String,
    pub done: bool,
}

impl DetailEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_item(item: &TodoRecord) -> Self {
        let mut editor = Self::new();
        editor.sync_from(Some(item));
        editor
    }

    pub fn item(&self) -> Option<&TodoRecord> {
        self.item.as_ref()
    }

    /// Load field values from `item`, or clear everything for `None`.
    pub fn sync_from(&mut self, item: Option<&TodoRecord>) {
        match item {
            Some(item) => {
                self.title = item.title.clone();
                self.description = item.description.clone().unwrap_or_default();
                self.done = item.completed;
                self.item = Some(item.clone());
            }
            None => self.reset(),
        }
    }

    pub fn reset(&mut self) {
        self.item = None;
        self.title.clear();
        self.description.clear();
        self.done = false;
    }

    /// Write title and description back through the store.
    ///
    /// Returns `Ok(None)` when nothing is loaded. An empty title is
    /// rejected before the store is reached; an empty description is
    /// stored as absent.
    pub fn commit(&self, store: &TodoStore) -> AppResult<Option<TodoRecord>> {
        let Some(item) = &self.item else {
            return Ok(None);
        };

        if self.title.trim().is_empty() {
            return Err(AppError::Validation("Title is required.".into()));
        }

        let mut copy = item.clone();
        copy.title = self.title.clone();
        copy.description = if self.description.is_empty() {
            None
        } else {
            Some(self.description.clone())
        };

        store.update(copy).map(Some)
    }

    /// Delete the loaded record. Returns whether anything was loaded.
    pub fn delete(&self, store: &TodoStore) -> AppResult<bool> {
        match &self.item {
            Some(item) => {
                store.delete(&item.id)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The "mark as done" checkbox changed.
    pub fn toggle_done(&mut self, value: bool) -> Option<ItemIntent> {
        let item = self.item.as_ref()?;
        self.done = value;
        Some(ItemIntent::set_done(item.id.clone(), value))
    }
}
