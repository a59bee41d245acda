use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single to-do item as persisted in the `items` table and carried by
/// change events.
///
/// `completed` is a real boolean in memory. Every external boundary
/// (SQLite column, broadcast payload, JSON export) encodes it as `0|1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRecord {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created: i64,
    pub updated: i64,
    #[serde(with = "completed_flag")]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete_by: Option<i64>,
}

impl TodoRecord {
    /// Flag value as stored in the `completed` column and index.
    pub fn completed_flag(&self) -> i64 {
        completed_flag::encode(self.completed)
    }
}

/// Input of `TodoStore::add`. Id and timestamps are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Raw flag. Only `1` means done; anything else is pending.
    #[serde(default)]
    pub completed: Option<i64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub complete_by: Option<i64>,
}

impl TodoDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_completed(mut self, flag: i64) -> Self {
        self.completed = Some(flag);
        self
    }

    /// Turn the draft into a record with the given identity and timestamp.
    pub fn into_record(self, id: String, now: i64) -> TodoRecord {
        TodoRecord {
            id,
            title: self.title,
            description: self.description,
            created: now,
            updated: now,
            completed: completed_flag::decode(self.completed.unwrap_or(0)),
            color: self.color,
            complete_by: self.complete_by,
        }
    }
}

/// Filter for `TodoStore::list`. The default lists pending items only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub completed: bool,
}

impl ListOptions {
    pub fn pending() -> Self {
        Self { completed: false }
    }

    pub fn completed() -> Self {
        Self { completed: true }
    }
}

/// Sort order used by every rendered list: oldest first.
pub fn sort_items(a: &TodoRecord, b: &TodoRecord) -> Ordering {
    a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id))
}

/// `completed` <-> `0|1` encoding shared by serde and the SQL layer.
pub mod completed_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub const PENDING: i64 = 0;
    pub const DONE: i64 = 1;

    pub fn encode(completed: bool) -> i64 {
        if completed { DONE } else { PENDING }
    }

    pub fn decode(flag: i64) -> bool {
        flag == DONE
    }

    pub fn serialize<S: Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(encode(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(decode(i64::deserialize(d)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, created: i64) -> TodoRecord {
        TodoDraft::new("t").into_record(id.to_string(), created)
    }

    #[test]
    fn invalid_flag_defaults_to_pending() {
        let r = TodoDraft::new("x").with_completed(7).into_record("a".into(), 1);
        assert!(!r.completed);
        let r = TodoDraft::new("x").with_completed(1).into_record("a".into(), 1);
        assert!(r.completed);
    }

    #[test]
    fn wire_format_uses_integer_flag_and_omits_absent_fields() {
        let r = record("abc", 10);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["completed"], 0);
        assert!(json.get("description").is_none());
        assert!(json.get("completeBy").is_none());
    }

    #[test]
    fn sorts_by_creation_time() {
        let mut items = vec![record("b", 30), record("a", 10), record("c", 20)];
        items.sort_by(sort_items);
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "c", "b"]);
    }
}
