//! Dispatcher applying `Action` to a `TabRegistry`.
//!
//! Split by concern:
//! * `motion`  - cursor placement and selection
//! * `edit`    - text mutation at every cursor
//! * `command` - tab lifecycle and file operations
//!
//! Every action is synchronous and either fully applies or leaves the
//! registry unchanged; failures come back in `DispatchResult::error`.

use core_model::{EditorError, TabRegistry};
use tracing::{trace, warn};

use crate::Action;

mod command;
pub(crate) mod command_parser;
mod edit;
mod motion;

/// Outcome of dispatching a single `Action`.
#[derive(Debug, Default)]
pub struct DispatchResult {
    /// Observable registry state (content, cursors, tabs, dirty flag) may
    /// differ from before the call.
    pub changed: bool,
    pub quit: bool,
    pub error: Option<EditorError>,
}

impl DispatchResult {
    pub fn changed() -> Self {
        Self {
            changed: true,
            ..Self::default()
        }
    }
    pub fn unchanged() -> Self {
        Self::default()
    }
    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Self::default()
        }
    }
    pub fn failed(error: EditorError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }
    fn from_flag(changed: bool) -> Self {
        Self {
            changed,
            ..Self::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Apply `action` to `registry`.
pub fn dispatch(action: Action, registry: &mut TabRegistry) -> DispatchResult {
    trace!(target: "actions", ?action, active = %registry.active_id(), "dispatch");
    let result = match action {
        Action::NewTab
        | Action::CloseTab(_)
        | Action::SwitchTab(_)
        | Action::NextTab
        | Action::PrevTab
        | Action::OpenFile(_)
        | Action::SaveFile
        | Action::SaveFileAs(_) => command::handle(action, registry),
        Action::InsertText(_) | Action::DeleteBackward | Action::DeleteForward => {
            edit::handle(action, registry)
        }
        Action::SetCursor(_)
        | Action::AddCursor(_)
        | Action::MoveCursors { .. }
        | Action::SelectAll => motion::handle(action, registry),
        Action::ListTabs | Action::Show => DispatchResult::unchanged(),
        Action::Quit => DispatchResult::quit(),
    };
    if let Some(err) = &result.error {
        warn!(target: "actions", error = %err, kind = ?err.kind(), "dispatch_failed");
    }
    result
}
