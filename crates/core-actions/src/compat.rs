//! Flat call surface for hosts that need plain ids and string errors.
//!
//! Every call routes through `dispatch`; fallible file calls return the error
//! message, or an empty string on success.

use core_model::TabRegistry;
use core_state::DocumentId;

use crate::{Action, DispatchResult, dispatch};

#[derive(Debug, Default)]
pub struct EditorFacade {
    registry: TabRegistry,
}

impl EditorFacade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: TabRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TabRegistry {
        &mut self.registry
    }

    fn apply(&mut self, action: Action) -> DispatchResult {
        dispatch(action, &mut self.registry)
    }

    fn apply_for_message(&mut self, action: Action) -> String {
        self.apply(action)
            .error
            .map(|e| e.to_string())
            .unwrap_or_default()
    }

    pub fn new_tab(&mut self) -> u64 {
        self.apply(Action::NewTab);
        self.registry.active_id().as_u64()
    }

    pub fn close_tab(&mut self, id: u64) -> bool {
        self.apply(Action::CloseTab(DocumentId::from_u64(id))).is_ok()
    }

    pub fn switch_tab(&mut self, id: u64) -> bool {
        self.apply(Action::SwitchTab(DocumentId::from_u64(id))).is_ok()
    }

    pub fn next_tab(&mut self) {
        self.apply(Action::NextTab);
    }

    pub fn prev_tab(&mut self) {
        self.apply(Action::PrevTab);
    }

    pub fn insert_text(&mut self, text: &str) {
        self.apply(Action::InsertText(text.to_string()));
    }

    pub fn delete_backward(&mut self) {
        self.apply(Action::DeleteBackward);
    }

    pub fn delete_forward(&mut self) {
        self.apply(Action::DeleteForward);
    }

    pub fn set_cursor(&mut self, offset: usize) {
        self.apply(Action::SetCursor(offset));
    }

    pub fn add_cursor(&mut self, offset: usize) {
        self.apply(Action::AddCursor(offset));
    }

    pub fn move_cursors(&mut self, delta: i64, extend: bool) {
        let delta = isize::try_from(delta).unwrap_or(if delta < 0 { isize::MIN } else { isize::MAX });
        self.apply(Action::MoveCursors { delta, extend });
    }

    pub fn select_all(&mut self) {
        self.apply(Action::SelectAll);
    }

    pub fn open_file(&mut self, path: &str) -> String {
        self.apply_for_message(Action::OpenFile(path.into()))
    }

    pub fn save_file(&mut self) -> String {
        self.apply_for_message(Action::SaveFile)
    }

    pub fn save_file_as(&mut self, path: &str) -> String {
        self.apply_for_message(Action::SaveFileAs(path.into()))
    }

    pub fn get_content(&self) -> String {
        self.registry.content()
    }

    pub fn get_content_length(&self) -> usize {
        self.registry.content_length()
    }

    /// Position of the primary cursor: the first one still alive in
    /// insertion order, not the leftmost. After `set_cursor(4)`,
    /// `add_cursor(2)` and a two-character insert this reports 8.
    pub fn get_cursor_position(&self) -> usize {
        self.registry.cursor_position()
    }

    pub fn tab_count(&self) -> usize {
        self.registry.tab_count()
    }

    pub fn is_dirty(&self) -> bool {
        self.registry.is_dirty()
    }

    pub fn get_title(&self) -> String {
        self.registry.title()
    }

    pub fn get_active_tab_id(&self) -> u64 {
        self.registry.active_id().as_u64()
    }
}
