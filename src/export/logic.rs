// src/export/logic.rs

use crate::core::store::TodoStore;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::TodoExport;
use crate::models::{ListOptions, TodoRecord, sort_items};
use crate::ui::messages::warning;
use std::path::Path;

/// Which partition(s) to export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportScope {
    Pending,
    Completed,
    All,
}

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export records to `file` (absolute path). Returns how many rows
    /// were written.
    pub fn export(
        store: &TodoStore,
        format: ExportFormat,
        file: &str,
        scope: ExportScope,
        date_format: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        let items = load_scope(store, scope)?;

        if items.is_empty() {
            warning("No items found for the selected scope.");
            return Ok(0);
        }

        let rows: Vec<TodoExport> = items
            .iter()
            .map(|item| TodoExport::from_record(item, date_format))
            .collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(rows.len())
    }
}

fn load_scope(store: &TodoStore, scope: ExportScope) -> AppResult<Vec<TodoRecord>> {
    let mut items = match scope {
        ExportScope::Pending => store.list(ListOptions::pending())?,
        ExportScope::Completed => store.list(ListOptions::completed())?,
        ExportScope::All => store.list_all()?,
    };
    items.sort_by(sort_items);
    Ok(items)
}
