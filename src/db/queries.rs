use crate::models::todo::{TodoRecord, completed_flag};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const ITEM_COLUMNS: &str = "id, title, description, created, updated, completed, color, complete_by";

pub fn map_row(row: &Row) -> Result<TodoRecord> {
    Ok(TodoRecord {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        created: row.get("created")?,
        updated: row.get("updated")?,
        completed: completed_flag::decode(row.get("completed")?),
        color: row.get("color")?,
        complete_by: row.get("complete_by")?,
    })
}

/// Insert a brand-new record. Fails on a duplicate id.
pub fn insert_item(conn: &Connection, item: &TodoRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO items (id, title, description, created, updated, completed, color, complete_by)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            item.id,
            item.title,
            item.description,
            item.created,
            item.updated,
            item.completed_flag(),
            item.color,
            item.complete_by,
        ],
    )?;
    Ok(())
}

/// Write the full record, replacing whatever is stored under its id.
pub fn put_item(conn: &Connection, item: &TodoRecord) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO items (id, title, description, created, updated, completed, color, complete_by)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            item.id,
            item.title,
            item.description,
            item.created,
            item.updated,
            item.completed_flag(),
            item.color,
            item.complete_by,
        ],
    )?;
    Ok(())
}

pub fn get_item(conn: &Connection, id: &str) -> Result<Option<TodoRecord>> {
    let mut stmt = conn.prepare_cached(&format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"))?;
    stmt.query_row([id], map_row).optional()
}

/// All records with the given flag, served by `idx_items_completed`.
pub fn load_items_by_completed(conn: &Connection, completed: bool) -> Result<Vec<TodoRecord>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {ITEM_COLUMNS} FROM items INDEXED BY idx_items_completed WHERE completed = ?1"
    ))?;

    let rows = stmt.query_map([completed_flag::encode(completed)], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_all_items(conn: &Connection) -> Result<Vec<TodoRecord>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {ITEM_COLUMNS} FROM items ORDER BY created ASC, id ASC"
    ))?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Returns the number of removed rows (0 when the id was unknown).
pub fn delete_item(conn: &Connection, id: &str) -> Result<usize> {
    conn.execute("DELETE FROM items WHERE id = ?1", [id])
}

pub fn count_items(conn: &Connection, completed: bool) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM items WHERE completed = ?1",
        [completed_flag::encode(completed)],
        |row| row.get(0),
    )
}
