use crate::cli::commands::open_app;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::DetailEditor;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        title,
        description,
        clear_desc,
    } = cmd
    {
        let mut app = open_app(cfg)?;

        let item = app
            .view
            .select(id)
            .ok_or_else(|| AppError::NotFound(id.clone()))?;
        let mut editor = DetailEditor::for_item(item);

        if title.is_none() && description.is_none() && !*clear_desc {
            info("Nothing to change.");
            return Ok(());
        }

        if let Some(t) = title {
            editor.title = t.clone();
        }
        if let Some(d) = description {
            editor.description = d.clone();
        }
        if *clear_desc {
            editor.description.clear();
        }

        let saved = editor.commit(&app.store)?;
        app.sync();

        if let Some(item) = saved {
            success(format!("Updated item {}", item.id));
            ttlog_quiet(
                app.store.pool(),
                "edit",
                &item.id,
                &format!("Title \"{}\"", item.title),
            );
        }
    }
    Ok(())
}
