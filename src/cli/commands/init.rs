use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::migrate::SCHEMA_VERSION;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (skipped in test mode)
///  - the SQLite database and its schema
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db_path = cfg.database_path();

    info("Initializing rTodo…");
    info(format!("Database: {}", db_path.display()));

    let pool = DbPool::new(&db_path);
    if init_db(&pool)? {
        success(format!("Created items table (schema v{SCHEMA_VERSION})."));
    } else {
        info(format!("Schema already at v{SCHEMA_VERSION}."));
    }

    success(format!("Database initialized at {}", db_path.display()));

    ttlog_quiet(
        &pool,
        "init",
        "",
        &format!("Database initialized at {}", db_path.display()),
    );

    Ok(())
}
