pub mod app;
pub mod backup;
pub mod detail;
pub mod intent;
pub mod log;
pub mod store;
pub mod view;

pub use app::TodoApp;
pub use detail::DetailEditor;
pub use intent::ItemIntent;
pub use store::TodoStore;
pub use view::{ApplyOutcome, SyncReport, TodoView};
