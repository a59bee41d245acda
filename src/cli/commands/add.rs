use crate::cli::commands::open_app;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::models::TodoDraft;
use crate::models::todo::completed_flag;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        title,
        description,
        done,
    } = cmd
    {
        let mut app = open_app(cfg)?;

        let mut draft = TodoDraft::new(title.clone()).with_completed(if *done {
            completed_flag::DONE
        } else {
            completed_flag::PENDING
        });
        if let Some(d) = description.as_ref().filter(|d| !d.is_empty()) {
            draft = draft.with_description(d.clone());
        }

        let item = app.store.add(draft)?;
        app.sync();

        success(format!("Added item {}", item.id));
        println!("{}", item.id);

        ttlog_quiet(
            app.store.pool(),
            "add",
            &item.id,
            &format!("Added \"{}\"", item.title),
        );
    }

    Ok(())
}
