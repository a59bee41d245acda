//! Database snapshots for `rtodo backup`.
//!
//! The snapshot is taken through the store's own connection with
//! `VACUUM INTO`, so it is consistent even while other contexts write to
//! the same file.

use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ensure_writable;
use crate::ui::messages::{success, warning};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Write a snapshot of the items and log tables to `dest_file`.
    ///
    /// With `compress` the snapshot is replaced by `<dest>.zip`. Returns
    /// the path of the file that was kept.
    pub fn backup(pool: &DbPool, dest_file: &str, compress: bool, force: bool) -> AppResult<PathBuf> {
        let dest = Path::new(dest_file);

        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        ensure_writable(dest, force)?;
        if dest.exists() {
            fs::remove_file(dest)?;
        }

        snapshot(pool, dest)?;
        success(format!("Backup created: {}", dest.display()));

        let kept = if compress { zip_snapshot(dest)? } else { dest.to_path_buf() };

        ttlog_quiet(
            pool,
            "backup",
            &kept.to_string_lossy(),
            if compress {
                "Snapshot written and zipped"
            } else {
                "Snapshot written"
            },
        );

        Ok(kept)
    }
}

fn snapshot(pool: &DbPool, dest: &Path) -> AppResult<()> {
    let target = dest.to_string_lossy().to_string();
    pool.with_conn(|conn| {
        conn.execute("VACUUM INTO ?1", [target])?;
        Ok(())
    })
}

/// Pack `snapshot` into a sibling `.zip` and drop the raw copy.
fn zip_snapshot(snapshot: &Path) -> AppResult<PathBuf> {
    let zip_path = snapshot.with_extension("zip");
    let entry = snapshot
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "rtodo.sqlite".to_string());

    let mut archive = ZipWriter::new(File::create(&zip_path)?);
    archive
        .start_file(
            entry,
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
        )
        .map_err(io::Error::other)?;
    io::copy(&mut File::open(snapshot)?, &mut archive)?;
    archive.finish().map_err(io::Error::other)?;

    if let Err(e) = fs::remove_file(snapshot) {
        warning(format!("Snapshot kept uncompressed at {}: {}", snapshot.display(), e));
    }
    success(format!("Compressed: {}", zip_path.display()));

    Ok(zip_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::{count_items, insert_item};
    use crate::models::TodoDraft;
    use rusqlite::Connection;

    #[test]
    fn in_memory_store_can_be_snapshotted() {
        let pool = DbPool::in_memory();
        pool.with_conn(|conn| {
            insert_item(conn, &TodoDraft::new("kept").into_record("k1".into(), 1))?;
            Ok(())
        })
        .unwrap();

        let dest = std::env::temp_dir().join("rtodo_backup_unit.sqlite");
        fs::remove_file(&dest).ok();

        let kept = BackupLogic::backup(&pool, &dest.to_string_lossy(), false, true).unwrap();

        let copy = Connection::open(&kept).unwrap();
        assert_eq!(count_items(&copy, false).unwrap(), 1);
    }
}
