//! Command loop: read lines, dispatch, print the active tab's status.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use core_actions::{Action, CommandParser, ParseError, dispatch};
use core_model::TabRegistry;
use tracing::{debug, info, warn};

/// Counters reported when the loop ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub commands: usize,
    pub failures: usize,
    pub quit: bool,
}

pub struct Session<W: Write> {
    registry: TabRegistry,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(registry: TabRegistry, out: W) -> Self {
        Self { registry, out }
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Open each startup path as a tab. When anything opened, the initial
    /// empty untitled tab is dropped. Returns how many paths failed.
    pub fn open_startup_paths(&mut self, paths: &[PathBuf]) -> Result<usize> {
        let placeholder = self.registry.active_id();
        let mut failed = 0;
        let mut opened = 0;
        for path in paths {
            match self.registry.open_file(path) {
                Ok(id) => {
                    opened += 1;
                    debug!(target: "runtime", %id, file = %path.display(), "startup_open");
                }
                Err(e) => {
                    failed += 1;
                    warn!(target: "runtime", file = %path.display(), error = %e, "startup_open_failed");
                    writeln!(self.out, "error: {e}")?;
                }
            }
        }
        let placeholder_untouched = self
            .registry
            .get(placeholder)
            .is_some_and(|d| d.is_empty() && !d.is_dirty() && d.path().is_none());
        if opened > 0 && placeholder_untouched {
            let active = self.registry.active_id();
            self.registry.close_tab(placeholder);
            self.registry.switch_tab(active);
        }
        Ok(failed)
    }

    /// Process `input` until it ends or a `quit` command arrives. Blank lines
    /// and lines starting with `#` are skipped.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        for line in input.lines() {
            let line = line.context("reading command input")?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            summary.commands += 1;
            let action = match CommandParser::parse(&line) {
                Ok(action) => action,
                Err(ParseError::Empty) => continue,
                Err(e) => {
                    summary.failures += 1;
                    writeln!(self.out, "error: {e}")?;
                    continue;
                }
            };
            let query = action.clone();
            let result = dispatch(action, &mut self.registry);
            if let Some(err) = &result.error {
                summary.failures += 1;
                writeln!(self.out, "error: {err}")?;
            }
            match query {
                Action::ListTabs => self.write_tabs()?,
                Action::Show => self.write_content()?,
                _ => {}
            }
            if result.quit {
                summary.quit = true;
                break;
            }
            self.write_status()?;
        }
        self.out.flush()?;
        info!(
            target: "runtime",
            commands = summary.commands,
            failures = summary.failures,
            quit = summary.quit,
            "session_end"
        );
        Ok(summary)
    }

    /// `[id] title* len=N cursor=P tabs=T`
    pub fn write_status(&mut self) -> Result<()> {
        let doc = self.registry.active();
        writeln!(
            self.out,
            "[{}] {}{} len={} cursor={} tabs={}",
            doc.id(),
            doc.title(),
            if doc.is_dirty() { "*" } else { "" },
            doc.content_length(),
            doc.cursor_position(),
            self.registry.tab_count()
        )?;
        Ok(())
    }

    fn write_tabs(&mut self) -> Result<()> {
        let active = self.registry.active_id();
        for tab in self.registry.tabs() {
            writeln!(
                self.out,
                "{} [{}] {}{}",
                if tab.id == active { ">" } else { " " },
                tab.id,
                tab.title,
                if tab.dirty { "*" } else { "" }
            )?;
        }
        Ok(())
    }

    fn write_content(&mut self) -> Result<()> {
        let content = self.registry.content();
        self.out.write_all(content.as_bytes())?;
        if !content.ends_with('\n') {
            writeln!(self.out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run_script(script: &str) -> (String, SessionSummary) {
        let mut session = Session::new(TabRegistry::new(), Vec::new());
        let summary = session.run(script.as_bytes()).unwrap();
        (String::from_utf8(session.into_output()).unwrap(), summary)
    }

    #[test]
    fn prints_status_after_each_command() {
        let (out, summary) = run_script("insert abc\nmove -1\n# comment\n\nnew\n");
        assert_eq!(
            out,
            "[1] Untitled* len=3 cursor=3 tabs=1\n\
             [1] Untitled* len=3 cursor=2 tabs=1\n\
             [2] Untitled len=0 cursor=0 tabs=2\n"
        );
        assert_eq!(summary.commands, 3);
        assert_eq!(summary.failures, 0);
        assert!(!summary.quit);
    }

    #[test]
    fn reports_errors_and_keeps_going() {
        let (out, summary) = run_script("bogus\nsave\ninsert x\n");
        assert_eq!(
            out,
            "error: unknown command `bogus`\n\
             error: No file path set\n\
             [1] Untitled len=0 cursor=0 tabs=1\n\
             [1] Untitled* len=1 cursor=1 tabs=1\n"
        );
        assert_eq!(summary.failures, 2);
    }

    #[test]
    fn show_and_tabs_render_read_model() {
        let (out, _) = run_script("insert hi\\nthere\nnew\ntabs\nswitch 1\nshow\nquit\ninsert never\n");
        assert_eq!(
            out,
            "[1] Untitled* len=8 cursor=8 tabs=1\n\
             [2] Untitled len=0 cursor=0 tabs=2\n\
             \u{20} [1] Untitled*\n\
             > [2] Untitled\n\
             [2] Untitled len=0 cursor=0 tabs=2\n\
             [1] Untitled* len=8 cursor=8 tabs=2\n\
             hi\nthere\n\
             [1] Untitled* len=8 cursor=8 tabs=2\n"
        );
    }

    #[test]
    fn startup_paths_replace_placeholder_tab() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        std::fs::write(&a, "alpha").unwrap();
        let missing = dir.path().join("missing.txt");

        let mut session = Session::new(TabRegistry::new(), Vec::new());
        let failed = session.open_startup_paths(&[a, missing]).unwrap();
        assert_eq!(failed, 1);
        assert_eq!(session.registry().tab_count(), 1);
        assert_eq!(session.registry().title(), "a.txt");
        let out = String::from_utf8(session.into_output()).unwrap();
        assert!(out.starts_with("error: File not found"));
    }

    #[test]
    fn failed_startup_keeps_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(TabRegistry::new(), Vec::new());
        let failed = session
            .open_startup_paths(&[dir.path().join("nope")])
            .unwrap();
        assert_eq!(failed, 1);
        assert_eq!(session.registry().tab_count(), 1);
        assert_eq!(session.registry().title(), "Untitled");
    }
}
