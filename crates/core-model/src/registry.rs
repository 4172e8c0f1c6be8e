use std::fmt;
use std::path::{Path, PathBuf};

use core_io::{FsPersistence, Persistence};
use core_state::{DEFAULT_UNTITLED_TITLE, Document, DocumentId, TabInfo};
use tracing::{debug, warn};

use crate::EditorError;

/// Knobs the host sets once when building a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Title of documents that have no path yet.
    pub untitled_title: String,
    /// Opening a path that is already open activates that tab instead.
    pub reuse_open_tabs: bool,
    /// Passed to the default filesystem backend. Off by default so documents
    /// hold exactly the bytes on disk.
    pub normalize_line_endings: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            untitled_title: DEFAULT_UNTITLED_TITLE.to_string(),
            reuse_open_tabs: false,
            normalize_line_endings: false,
        }
    }
}

/// Ordered collection of open documents with exactly one active.
pub struct TabRegistry {
    docs: Vec<Document>,
    active: usize,
    next_id: u64,
    options: RegistryOptions,
    persistence: Box<dyn Persistence>,
}

impl fmt::Debug for TabRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabRegistry")
            .field("tabs", &self.ids())
            .field("active", &self.active_id())
            .field("next_id", &self.next_id)
            .field("options", &self.options)
            .finish()
    }
}

impl Default for TabRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TabRegistry {
    /// Registry backed by the filesystem, holding one untitled tab.
    pub fn new() -> Self {
        Self::with_options(RegistryOptions::default())
    }

    pub fn with_options(options: RegistryOptions) -> Self {
        let fs = FsPersistence::new(options.normalize_line_endings);
        Self::with_persistence(options, fs)
    }

    pub fn with_persistence(options: RegistryOptions, persistence: impl Persistence + 'static) -> Self {
        let mut reg = Self {
            docs: Vec::new(),
            active: 0,
            next_id: 1,
            options,
            persistence: Box::new(persistence),
        };
        let doc = reg.untitled();
        reg.docs.push(doc);
        reg
    }

    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    fn alloc_id(&mut self) -> DocumentId {
        let id = DocumentId::from_u64(self.next_id);
        self.next_id += 1;
        id
    }

    fn untitled(&mut self) -> Document {
        let id = self.alloc_id();
        Document::new(id).with_untitled_title(self.options.untitled_title.clone())
    }

    fn index_of(&self, id: DocumentId) -> Option<usize> {
        self.docs.iter().position(|d| d.id() == id)
    }

    fn activate_last(&mut self) -> DocumentId {
        self.active = self.docs.len() - 1;
        self.docs[self.active].id()
    }

    // --- tab lifecycle ---

    /// Open an empty untitled tab and make it active.
    pub fn new_tab(&mut self) -> DocumentId {
        let doc = self.untitled();
        self.docs.push(doc);
        let id = self.activate_last();
        debug!(target: "model.tabs", %id, count = self.docs.len(), "tab_created");
        id
    }

    /// Close `id`. Closing the active tab activates the one that slides into
    /// its slot, or the previous one when it was last. Closing the only tab
    /// replaces it with a fresh untitled tab.
    pub fn close_tab(&mut self, id: DocumentId) -> bool {
        let Some(idx) = self.index_of(id) else {
            debug!(target: "model.tabs", %id, "close_unknown_tab");
            return false;
        };
        let doc = self.docs.remove(idx);
        if doc.is_dirty() {
            warn!(target: "model.tabs", %id, "closed_with_unsaved_changes");
        }
        if self.docs.is_empty() {
            let fresh = self.untitled();
            self.docs.push(fresh);
            self.active = 0;
        } else if idx < self.active || self.active >= self.docs.len() {
            self.active -= 1;
        }
        debug!(
            target: "model.tabs",
            %id,
            active = %self.active_id(),
            count = self.docs.len(),
            "tab_closed"
        );
        true
    }

    pub fn switch_tab(&mut self, id: DocumentId) -> bool {
        match self.index_of(id) {
            Some(idx) => {
                self.active = idx;
                debug!(target: "model.tabs", %id, "tab_switched");
                true
            }
            None => {
                debug!(target: "model.tabs", %id, "switch_unknown_tab");
                false
            }
        }
    }

    pub fn next_tab(&mut self) {
        self.active = (self.active + 1) % self.docs.len();
        debug!(target: "model.tabs", active = %self.active_id(), "tab_next");
    }

    pub fn prev_tab(&mut self) {
        self.active = (self.active + self.docs.len() - 1) % self.docs.len();
        debug!(target: "model.tabs", active = %self.active_id(), "tab_prev");
    }

    // --- file operations ---

    /// Read `path` into a new clean tab and activate it. On failure nothing
    /// changes.
    pub fn open_file(&mut self, path: impl AsRef<Path>) -> Result<DocumentId, EditorError> {
        let path = path.as_ref();
        if self.options.reuse_open_tabs
            && let Some(idx) = self.docs.iter().position(|d| d.path() == Some(path))
        {
            self.active = idx;
            let id = self.docs[idx].id();
            debug!(target: "model.tabs", %id, file = %path.display(), "open_reused_tab");
            return Ok(id);
        }
        let loaded = self.persistence.read(path)?;
        let id = self.alloc_id();
        let doc = Document::from_text(id, &loaded.text)
            .with_path(path)
            .with_line_ending(loaded.line_ending, loaded.mixed_line_endings)
            .with_untitled_title(self.options.untitled_title.clone());
        if doc.has_mixed_line_endings() {
            warn!(target: "model.tabs", %id, file = %path.display(), "mixed_line_endings_kept_raw");
        }
        self.docs.push(doc);
        self.activate_last();
        debug!(
            target: "model.tabs",
            %id,
            file = %path.display(),
            count = self.docs.len(),
            "tab_opened"
        );
        Ok(id)
    }

    /// Write the active document to its own path.
    pub fn save_file(&mut self) -> Result<(), EditorError> {
        self.save_tab(self.active_id())
    }

    /// Write document `id` to its own path.
    pub fn save_tab(&mut self, id: DocumentId) -> Result<(), EditorError> {
        let idx = self.index_of(id).ok_or(EditorError::UnknownTab(id))?;
        let doc = &mut self.docs[idx];
        let path = doc.path().map(Path::to_path_buf).ok_or(EditorError::NoPathSet)?;
        self.persistence.write(&path, &doc.content(), doc.line_ending())?;
        doc.mark_saved(None);
        debug!(target: "model.tabs", %id, file = %path.display(), "tab_saved");
        Ok(())
    }

    /// Write the active document to `path` and rebind it there.
    pub fn save_file_as(&mut self, path: impl Into<PathBuf>) -> Result<(), EditorError> {
        let path = path.into();
        let doc = &mut self.docs[self.active];
        self.persistence.write(&path, &doc.content(), doc.line_ending())?;
        let id = doc.id();
        debug!(target: "model.tabs", %id, file = %path.display(), "tab_saved_as");
        doc.mark_saved(Some(path));
        Ok(())
    }

    // --- queries ---

    pub fn tab_count(&self) -> usize {
        self.docs.len()
    }

    pub fn active_id(&self) -> DocumentId {
        self.docs[self.active].id()
    }

    pub fn active(&self) -> &Document {
        &self.docs[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Document {
        &mut self.docs[self.active]
    }

    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.docs.iter().find(|d| d.id() == id)
    }

    /// Tab strip in display order.
    pub fn tabs(&self) -> Vec<TabInfo> {
        self.docs.iter().map(Document::tab_info).collect()
    }

    pub fn ids(&self) -> Vec<DocumentId> {
        self.docs.iter().map(Document::id).collect()
    }

    pub fn content(&self) -> String {
        self.active().content()
    }

    pub fn content_length(&self) -> usize {
        self.active().content_length()
    }

    pub fn cursor_position(&self) -> usize {
        self.active().cursor_position()
    }

    pub fn is_dirty(&self) -> bool {
        self.active().is_dirty()
    }

    pub fn title(&self) -> String {
        self.active().title()
    }
}
