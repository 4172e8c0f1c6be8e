//! Text mutation at every cursor of the active document.

use core_model::TabRegistry;

use super::DispatchResult;
use crate::Action;

pub(super) fn handle(action: Action, registry: &mut TabRegistry) -> DispatchResult {
    let doc = registry.active_mut();
    let summary = match action {
        Action::InsertText(text) => doc.insert_text(&text),
        Action::DeleteBackward => doc.delete_backward(),
        Action::DeleteForward => doc.delete_forward(),
        _ => return DispatchResult::unchanged(),
    };
    DispatchResult::from_flag(summary.changed())
}
