use crate::cli::commands::open_app;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id } = cmd {
        let mut app = open_app(cfg)?;

        let known = app.view.get(id).is_some();
        app.store.delete(id)?;
        app.sync();

        if known {
            success(format!("Item {} has been deleted.", id));
            ttlog_quiet(app.store.pool(), "del", id, "Item deleted");
        } else {
            info(format!("No item with id {}; nothing to delete.", id));
        }
    }

    Ok(())
}
