//! Editing actions and the text command surface.
//!
//! `Action` is the one vocabulary every front end speaks: the line-oriented
//! command parser produces it, `dispatch` applies it to a `TabRegistry`, and
//! `compat::EditorFacade` wraps the same path behind flat, string-error calls
//! for hosts that cannot consume structured errors.

use std::path::PathBuf;

use core_state::DocumentId;

pub mod compat;
mod dispatcher;

pub use dispatcher::command_parser::{CommandParser, ParseError};
pub use dispatcher::{DispatchResult, dispatch};

/// One operation against the registry or its active document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    NewTab,
    CloseTab(DocumentId),
    SwitchTab(DocumentId),
    NextTab,
    PrevTab,
    InsertText(String),
    DeleteBackward,
    DeleteForward,
    SetCursor(usize),
    AddCursor(usize),
    MoveCursors { delta: isize, extend: bool },
    SelectAll,
    OpenFile(PathBuf),
    SaveFile,
    SaveFileAs(PathBuf),
    /// Read-only; the host renders the tab strip.
    ListTabs,
    /// Read-only; the host renders the active document.
    Show,
    Quit,
}
