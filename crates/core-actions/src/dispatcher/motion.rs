//! Cursor placement and selection. Never dirties a document.

use core_model::TabRegistry;

use super::DispatchResult;
use crate::Action;

pub(super) fn handle(action: Action, registry: &mut TabRegistry) -> DispatchResult {
    let doc = registry.active_mut();
    let before = doc.cursors().clone();
    match action {
        Action::SetCursor(pos) => doc.set_cursor(pos),
        Action::AddCursor(pos) => {
            doc.add_cursor(pos);
        }
        Action::MoveCursors { delta, extend } => doc.move_cursors(delta, extend),
        Action::SelectAll => doc.select_all(),
        _ => return DispatchResult::unchanged(),
    }
    DispatchResult::from_flag(*doc.cursors() != before)
}
