// src/export/model.rs

use crate::models::TodoRecord;
use crate::utils::time::format_millis;
use serde::Serialize;

/// Flat export row. Timestamps are kept raw and also rendered in local
/// time for spreadsheets.
#[derive(Serialize, Clone, Debug)]
pub struct TodoExport {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: i64,
    pub created: i64,
    pub updated: i64,
    pub created_at: String,
    pub updated_at: String,
    pub color: Option<String>,
    pub complete_by: Option<i64>,
}

impl TodoExport {
    pub fn from_record(item: &TodoRecord, date_format: &str) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            completed: item.completed_flag(),
            created: item.created,
            updated: item.updated,
            created_at: format_millis(item.created, date_format),
            updated_at: format_millis(item.updated, date_format),
            color: item.color.clone(),
            complete_by: item.complete_by,
        }
    }
}
