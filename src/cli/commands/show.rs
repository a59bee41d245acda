use crate::cli::commands::open_app;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::TodoRecord;
use crate::utils::colors::{CYAN, GREY, RESET, color_for_optional_field};
use crate::utils::time::format_millis;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { id } = cmd {
        let mut app = open_app(cfg)?;

        let item = app
            .view
            .select(id)
            .ok_or_else(|| AppError::NotFound(id.clone()))?;

        print_detail(item, cfg);
    }
    Ok(())
}

fn print_detail(item: &TodoRecord, cfg: &Config) {
    let desc = item.description.as_deref();
    let desc_color = color_for_optional_field(desc);

    println!("{}• Id:{} {}", CYAN, RESET, item.id);
    println!("{}• Title:{} {}", CYAN, RESET, item.title);
    println!(
        "{}• Description:{} {}{}{}",
        CYAN,
        RESET,
        desc_color,
        desc.unwrap_or("--"),
        RESET
    );
    println!(
        "{}• Done:{} {}",
        CYAN,
        RESET,
        if item.completed { "yes" } else { "no" }
    );
    println!(
        "{}• Created:{} {}",
        CYAN,
        RESET,
        format_millis(item.created, &cfg.date_format)
    );
    println!(
        "{}• Updated:{} {}",
        CYAN,
        RESET,
        format_millis(item.updated, &cfg.date_format)
    );
    if let Some(by) = item.complete_by {
        println!(
            "{}• Complete by:{} {}",
            CYAN,
            RESET,
            format_millis(by, &cfg.date_format)
        );
    }
    if let Some(color) = &item.color {
        println!("{}• Color:{} {}{}{}", CYAN, RESET, GREY, color, RESET);
    }
}
