//! Tab lifecycle and file operations.

use core_model::{EditorError, TabRegistry};

use super::DispatchResult;
use crate::Action;

pub(super) fn handle(action: Action, registry: &mut TabRegistry) -> DispatchResult {
    match action {
        Action::NewTab => {
            registry.new_tab();
            DispatchResult::changed()
        }
        Action::CloseTab(id) => {
            if registry.close_tab(id) {
                DispatchResult::changed()
            } else {
                DispatchResult::failed(EditorError::UnknownTab(id))
            }
        }
        Action::SwitchTab(id) => {
            if registry.switch_tab(id) {
                DispatchResult::changed()
            } else {
                DispatchResult::failed(EditorError::UnknownTab(id))
            }
        }
        Action::NextTab => {
            let before = registry.active_id();
            registry.next_tab();
            DispatchResult::from_flag(registry.active_id() != before)
        }
        Action::PrevTab => {
            let before = registry.active_id();
            registry.prev_tab();
            DispatchResult::from_flag(registry.active_id() != before)
        }
        Action::OpenFile(path) => match registry.open_file(&path) {
            Ok(_) => DispatchResult::changed(),
            Err(e) => DispatchResult::failed(e),
        },
        Action::SaveFile => match registry.save_file() {
            Ok(()) => DispatchResult::changed(),
            Err(e) => DispatchResult::failed(e),
        },
        Action::SaveFileAs(path) => match registry.save_file_as(path) {
            Ok(()) => DispatchResult::changed(),
            Err(e) => DispatchResult::failed(e),
        },
        _ => DispatchResult::unchanged(),
    }
}
