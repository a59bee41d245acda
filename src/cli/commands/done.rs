use crate::cli::commands::open_app;
use crate::config::Config;
use crate::core::ItemIntent;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Handle `done` (value = true) and `undo` (value = false).
pub fn handle(id: &str, value: bool, cfg: &Config) -> AppResult<()> {
    let mut app = open_app(cfg)?;

    let item = app.dispatch(ItemIntent::set_done(id, value))?;

    let (op, msg) = if value {
        ("done", "Marked as completed")
    } else {
        ("undo", "Marked as pending")
    };

    success(format!("{}: {}", msg, item.title));
    ttlog_quiet(app.store.pool(), op, &item.id, msg);

    Ok(())
}
