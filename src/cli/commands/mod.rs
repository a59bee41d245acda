pub mod add;
pub mod backup;
pub mod config;
pub mod db;
pub mod del;
pub mod done;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod show;

use crate::broadcast::{BroadcastHub, MessageBus};
use crate::config::Config;
use crate::core::TodoApp;
use crate::errors::AppResult;
use std::sync::Arc;

/// Open a single-context app over the configured database.
pub(crate) fn open_app(cfg: &Config) -> AppResult<TodoApp> {
    let bus: Arc<dyn MessageBus> = Arc::new(BroadcastHub::new());
    TodoApp::from_config(cfg, bus)
}
