//! Line-oriented command language.
//!
//! One command per line: a verb followed by its arguments. `insert` takes the
//! remainder of the line verbatim (after the single separating space) with
//! `\n`, `\t` and `\\` escapes; unrecognized escapes are kept literally.
//! Parsing is pure; applying the result is `dispatch`'s job.

use std::path::PathBuf;

use core_state::DocumentId;
use thiserror::Error;

use crate::Action;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("`{command}`: invalid argument `{value}`")]
    InvalidArgument { command: &'static str, value: String },
    #[error("`{command}` takes no arguments")]
    UnexpectedArgument { command: &'static str },
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(raw: &str) -> Result<Action, ParseError> {
        let line = raw.trim_end_matches(['\r', '\n']).trim_start();
        if line.trim_end().is_empty() {
            return Err(ParseError::Empty);
        }
        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
        let verb = verb.trim_end();
        let args = rest.trim();
        match verb {
            "new" => no_args("new", args, Action::NewTab),
            "close" => Ok(Action::CloseTab(tab_id("close", args)?)),
            "switch" => Ok(Action::SwitchTab(tab_id("switch", args)?)),
            "next" => no_args("next", args, Action::NextTab),
            "prev" => no_args("prev", args, Action::PrevTab),
            "insert" => {
                if rest.is_empty() {
                    return Err(ParseError::MissingArgument {
                        command: "insert",
                        expected: "text",
                    });
                }
                Ok(Action::InsertText(unescape(rest)))
            }
            "backspace" => no_args("backspace", args, Action::DeleteBackward),
            "delete" => no_args("delete", args, Action::DeleteForward),
            "cursor" => Ok(Action::SetCursor(offset("cursor", args)?)),
            "add-cursor" => Ok(Action::AddCursor(offset("add-cursor", args)?)),
            "move" => parse_move(args),
            "select-all" => no_args("select-all", args, Action::SelectAll),
            "open" => Ok(Action::OpenFile(path("open", args)?)),
            "save" => no_args("save", args, Action::SaveFile),
            "save-as" => Ok(Action::SaveFileAs(path("save-as", args)?)),
            "tabs" => no_args("tabs", args, Action::ListTabs),
            "show" => no_args("show", args, Action::Show),
            "quit" | "exit" => no_args("quit", args, Action::Quit),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

fn no_args(command: &'static str, args: &str, action: Action) -> Result<Action, ParseError> {
    if args.is_empty() {
        Ok(action)
    } else {
        Err(ParseError::UnexpectedArgument { command })
    }
}

fn required<'a>(command: &'static str, args: &'a str, expected: &'static str) -> Result<&'a str, ParseError> {
    if args.is_empty() {
        Err(ParseError::MissingArgument { command, expected })
    } else {
        Ok(args)
    }
}

fn invalid(command: &'static str, value: &str) -> ParseError {
    ParseError::InvalidArgument {
        command,
        value: value.to_string(),
    }
}

fn tab_id(command: &'static str, args: &str) -> Result<DocumentId, ParseError> {
    let raw = required(command, args, "a tab id")?;
    raw.parse::<u64>()
        .map(DocumentId::from_u64)
        .map_err(|_| invalid(command, raw))
}

fn offset(command: &'static str, args: &str) -> Result<usize, ParseError> {
    let raw = required(command, args, "an offset")?;
    raw.parse::<usize>().map_err(|_| invalid(command, raw))
}

fn path(command: &'static str, args: &str) -> Result<PathBuf, ParseError> {
    required(command, args, "a path").map(PathBuf::from)
}

fn parse_move(args: &str) -> Result<Action, ParseError> {
    let raw = required("move", args, "a signed delta")?;
    let mut parts = raw.split_whitespace();
    let delta_raw = parts.next().unwrap_or_default();
    let delta = delta_raw
        .parse::<isize>()
        .map_err(|_| invalid("move", delta_raw))?;
    let extend = match parts.next() {
        None => false,
        Some("extend") => true,
        Some(other) => return Err(invalid("move", other)),
    };
    if let Some(extra) = parts.next() {
        return Err(invalid("move", extra));
    }
    Ok(Action::MoveCursors { delta, extend })
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
