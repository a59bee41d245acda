use crate::db::migrate::schema_version;
use crate::db::pool::DbPool;
use crate::db::queries::count_items;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub struct DbStats {
    pub schema_version: i64,
    pub pending: i64,
    pub completed: i64,
    pub oldest_created: Option<i64>,
    pub newest_updated: Option<i64>,
}

pub fn collect(pool: &DbPool) -> AppResult<DbStats> {
    pool.with_conn(|conn| {
        let oldest_created: Option<i64> = conn
            .query_row("SELECT MIN(created) FROM items", [], |row| row.get::<_, Option<i64>>(0))
            .optional()?
            .flatten();
        let newest_updated: Option<i64> = conn
            .query_row("SELECT MAX(updated) FROM items", [], |row| row.get::<_, Option<i64>>(0))
            .optional()?
            .flatten();

        Ok(DbStats {
            schema_version: schema_version(conn)?,
            pending: count_items(conn, false)?,
            completed: count_items(conn, true)?,
            oldest_created,
            newest_updated,
        })
    })
}

pub fn print_db_info(pool: &DbPool, date_format: &str) -> AppResult<()> {
    let stats = collect(pool)?;

    println!();

    //
    // 1) FILE
    //
    match pool.path() {
        Some(path) => {
            let file_size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            let file_kb = (file_size as f64) / 1024.0;
            println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, path.display(), RESET);
            println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);
        }
        None => println!("{}• File:{} {}(in memory){}", CYAN, RESET, GREY, RESET),
    }
    println!("{}• Schema:{} v{}", CYAN, RESET, stats.schema_version);

    //
    // 2) PARTITIONS
    //
    println!(
        "{}• Pending items:{} {}{}{}",
        CYAN, RESET, GREEN, stats.pending, RESET
    );
    println!(
        "{}• Completed items:{} {}{}{}",
        CYAN, RESET, GREEN, stats.completed, RESET
    );

    //
    // 3) TIME RANGE
    //
    let fmt = |ts: Option<i64>| {
        ts.map(|t| crate::utils::time::format_millis(t, date_format))
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    };
    println!("{}• Activity:{}", CYAN, RESET);
    println!("    first created: {}", fmt(stats.oldest_created));
    println!("    last updated:  {}", fmt(stats.newest_updated));

    println!();
    Ok(())
}
