use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rTodo
/// A local to-do list kept in SQLite
#[derive(Parser)]
#[command(
    name = "rtodo",
    version = env!("CARGO_PKG_VERSION"),
    about = "A local to-do list: add, edit, complete and delete tasks stored in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Manage the database (integrity checks, info, vacuum)
    Db {
        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Add a new item
    Add {
        /// Title of the item
        title: String,

        #[arg(long = "desc", help = "Optional description")]
        description: Option<String>,

        #[arg(long = "done", help = "Create the item already completed")]
        done: bool,
    },

    /// List items (pending by default)
    List {
        #[arg(long = "completed", conflicts_with = "all", help = "List completed items")]
        completed: bool,

        #[arg(long = "all", help = "List pending and completed items")]
        all: bool,
    },

    /// Show one item in detail
    Show { id: String },

    /// Edit title and/or description of an item
    Edit {
        id: String,

        #[arg(long = "title", help = "New title (must not be empty)")]
        title: Option<String>,

        #[arg(long = "desc", conflicts_with = "clear_desc", help = "New description")]
        description: Option<String>,

        #[arg(long = "clear-desc", help = "Remove the description")]
        clear_desc: bool,
    },

    /// Mark an item as completed
    Done { id: String },

    /// Mark an item as pending again
    Undo { id: String },

    /// Delete an item (no error if it does not exist)
    Del { id: String },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export items
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "completed", conflicts_with = "all")]
        completed: bool,

        #[arg(long = "all")]
        all: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
