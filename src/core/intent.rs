/// User intents raised by leaf views (item rows, detail pane).
///
/// Leaf views never call the store; they hand an intent up to the
/// top-level [`TodoView`](super::view::TodoView), which translates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemIntent {
    /// The "done" checkbox of item `id` was set to `value`.
    SetDone { id: String, value: bool },
}

impl ItemIntent {
    pub fn set_done(id: impl Into<String>, value: bool) -> Self {
        ItemIntent::SetDone {
            id: id.into(),
            value,
        }
    }
}
