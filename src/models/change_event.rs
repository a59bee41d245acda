use super::todo::TodoRecord;
use crate::errors::{AppError, AppResult};
use serde::de::Error as _;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Create,
    Update,
    Delete,
    Complete,
    Incomplete,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Create => "create",
            ChangeKind::Update => "update",
            ChangeKind::Delete => "delete",
            ChangeKind::Complete => "complete",
            ChangeKind::Incomplete => "incomplete",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "create" => Some(ChangeKind::Create),
            "update" => Some(ChangeKind::Update),
            "delete" => Some(ChangeKind::Delete),
            "complete" => Some(ChangeKind::Complete),
            "incomplete" => Some(ChangeKind::Incomplete),
            _ => None,
        }
    }
}

/// Notification published after every successful mutation.
///
/// `item` is a full snapshot of the record after the mutation and is
/// present for every kind except `delete`. Fields are private so that
/// invariant only has to be upheld by the constructors below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    #[serde(rename = "type")]
    kind: ChangeKind,
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    item: Option<TodoRecord>,
}

impl ChangeEvent {
    pub fn created(item: TodoRecord) -> Self {
        Self::with_item(ChangeKind::Create, item)
    }

    pub fn updated(item: TodoRecord) -> Self {
        Self::with_item(ChangeKind::Update, item)
    }

    /// `complete` or `incomplete`, depending on the record's flag.
    pub fn completion(item: TodoRecord) -> Self {
        let kind = if item.completed {
            ChangeKind::Complete
        } else {
            ChangeKind::Incomplete
        };
        Self::with_item(kind, item)
    }

    pub fn deleted(id: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Delete,
            id: id.into(),
            item: None,
        }
    }

    fn with_item(kind: ChangeKind, item: TodoRecord) -> Self {
        Self {
            kind,
            id: item.id.clone(),
            item: Some(item),
        }
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn item(&self) -> Option<&TodoRecord> {
        self.item.as_ref()
    }

    pub fn into_item(self) -> Option<TodoRecord> {
        self.item
    }

    pub fn to_message(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a broadcast message.
    ///
    /// A `type` outside the known set is `UnknownEventType`; anything else
    /// that does not match the event shape is `Payload`.
    pub fn from_message(raw: &str) -> AppResult<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;

        let kind_str = value
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| AppError::UnknownEventType(format!("<missing> in {value}")))?;

        if ChangeKind::from_wire(kind_str).is_none() {
            return Err(AppError::UnknownEventType(kind_str.to_string()));
        }

        let event: ChangeEvent = serde_json::from_value(value)?;

        let problem = match (event.kind, &event.item) {
            (ChangeKind::Delete, Some(_)) => Some("delete event must not carry an item".to_string()),
            (ChangeKind::Delete, None) => None,
            (kind, None) => Some(format!("{} event without item", kind.as_str())),
            (_, Some(item)) if item.id != event.id => Some(format!(
                "event id {} does not match item id {}",
                event.id, item.id
            )),
            _ => None,
        };

        match problem {
            Some(msg) => Err(serde_json::Error::custom(msg).into()),
            None => Ok(event),
        }
    }
}
