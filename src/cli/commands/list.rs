use crate::cli::commands::open_app;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::TodoRecord;
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, color_for_completed};
use crate::utils::table::{Column, Table};
use crate::utils::time::format_millis;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { completed, all } = cmd {
        let app = open_app(cfg)?;

        if *all || !*completed {
            header("To-do items");
            print_items(&app.view.pending(), cfg);
        }

        if *all || *completed {
            header("Completed items");
            print_items(&app.view.completed(), cfg);
        }
    }
    Ok(())
}

pub(crate) fn print_items(items: &[TodoRecord], cfg: &Config) {
    if items.is_empty() {
        info("No items to show.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("ID", 36),
        Column::new("Title", 32),
        Column::new("Updated", 16),
        Column::new("Done", 4),
    ]);

    for item in items {
        table.add_row(vec![
            item.id.clone(),
            item.title.clone(),
            format_millis(item.updated, &cfg.date_format),
            if item.completed { "yes" } else { "no" }.to_string(),
        ]);
    }

    let rendered = table.render();
    let mut lines = rendered.lines();
    if let Some(head) = lines.next() {
        println!("{}", head);
    }
    for (line, item) in lines.zip(items) {
        println!("{}{}{}", color_for_completed(item.completed), line, RESET);
    }
    println!();
}
