//! The persistence store: sole owner of the durable record set.
//!
//! Every mutation commits to SQLite first and then posts exactly one
//! [`ChangeEvent`] on the broadcast channel. The two steps are not atomic
//! as a pair; a failed post after a successful commit is returned to the
//! caller and nothing is retried.

use crate::broadcast::BroadcastChannel;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_item, get_item, insert_item, load_all_items, load_items_by_completed, put_item,
};
use crate::errors::{AppError, AppResult};
use crate::models::{ChangeEvent, ListOptions, TodoDraft, TodoRecord};
use crate::utils::time::now_millis;
use uuid::Uuid;

pub struct TodoStore {
    pool: DbPool,
    channel: BroadcastChannel,
}

impl TodoStore {
    pub fn new(pool: DbPool, channel: BroadcastChannel) -> Self {
        Self { pool, channel }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn channel(&self) -> &BroadcastChannel {
        &self.channel
    }

    /// Records in one partition, unordered. Pending by default.
    pub fn list(&self, opts: ListOptions) -> AppResult<Vec<TodoRecord>> {
        self.pool
            .with_conn(|conn| Ok(load_items_by_completed(conn, opts.completed)?))
    }

    /// Both partitions, oldest first.
    pub fn list_all(&self) -> AppResult<Vec<TodoRecord>> {
        self.pool.with_conn(|conn| Ok(load_all_items(conn)?))
    }

    pub fn get(&self, id: &str) -> AppResult<Option<TodoRecord>> {
        self.pool.with_conn(|conn| Ok(get_item(conn, id)?))
    }

    /// Create a record from `draft`. The store assigns the id and both
    /// timestamps; an invalid `completed` flag falls back to pending.
    pub fn add(&self, draft: TodoDraft) -> AppResult<TodoRecord> {
        let item = draft.into_record(Uuid::new_v4().to_string(), now_millis());

        self.pool.with_conn(|conn| Ok(insert_item(conn, &item)?))?;

        self.channel.post_event(&ChangeEvent::created(item.clone()))?;
        Ok(item)
    }

    /// Overwrite the full record (last write wins) and stamp `updated`.
    ///
    /// No revision check is made. Title validation is the caller's job.
    /// `created` and `updated` on the incoming copy are ignored when the
    /// record is already stored: `created` keeps its stored value and
    /// `updated` becomes now, never earlier than the stored one.
    pub fn update(&self, item: TodoRecord) -> AppResult<TodoRecord> {
        let saved = self.pool.with_conn(|conn| {
            let tx = conn.transaction()?;

            let now = now_millis();
            let mut cp = item;
            match get_item(&tx, &cp.id)? {
                Some(stored) => {
                    cp.created = stored.created;
                    cp.updated = now.max(stored.updated);
                }
                None => cp.updated = now,
            }
            put_item(&tx, &cp)?;

            tx.commit()?;
            Ok(cp)
        })?;

        self.channel.post_event(&ChangeEvent::updated(saved.clone()))?;
        Ok(saved)
    }

    pub fn mark_complete(&self, id: &str) -> AppResult<TodoRecord> {
        self.update_complete(id, true)
    }

    pub fn mark_incomplete(&self, id: &str) -> AppResult<TodoRecord> {
        self.update_complete(id, false)
    }

    fn update_complete(&self, id: &str, completed: bool) -> AppResult<TodoRecord> {
        let saved = self.pool.with_conn(|conn| {
            let tx = conn.transaction()?;

            let mut item = get_item(&tx, id)?.ok_or_else(|| AppError::NotFound(id.to_string()))?;
            item.completed = completed;
            item.updated = now_millis().max(item.updated);
            put_item(&tx, &item)?;

            tx.commit()?;
            Ok(item)
        })?;

        self.channel.post_event(&ChangeEvent::completion(saved.clone()))?;
        Ok(saved)
    }

    /// Permanently remove the record. Deleting an unknown id is not an
    /// error and still notifies listeners.
    pub fn delete(&self, id: &str) -> AppResult<()> {
        self.pool.with_conn(|conn| Ok(delete_item(conn, id)?))?;

        self.channel.post_event(&ChangeEvent::deleted(id))?;
        Ok(())
    }
}
