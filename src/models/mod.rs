pub mod change_event;
pub mod todo;

pub use change_event::{ChangeEvent, ChangeKind};
pub use todo::{ListOptions, TodoDraft, TodoRecord, sort_items};
