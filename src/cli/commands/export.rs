use crate::cli::commands::open_app;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportScope};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        completed,
        all,
        force,
    } = cmd
    {
        let scope = if *all {
            ExportScope::All
        } else if *completed {
            ExportScope::Completed
        } else {
            ExportScope::Pending
        };

        let app = open_app(cfg)?;
        ExportLogic::export(&app.store, *format, file, scope, &cfg.date_format, *force)?;
    }
    Ok(())
}
