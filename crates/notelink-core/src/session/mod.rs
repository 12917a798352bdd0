use std::io;
use std::sync::Arc;

use crate::backlinks::find_backlinks;
use crate::config::NotelinkConfig;
use crate::debounce::Debouncer;
use crate::kv::{KvBackend, MemoryBackend};
use crate::model::{BacklinkRef, DocId, DocumentRecord};
use crate::render::{render_preview, MarkdownRenderer};
use crate::resolver::{find_by_filename, normalize_filename};
use crate::store::DocumentStore;


/// Rendering surfaces report link clicks through this seam instead of
/// holding a reference to a concrete session type.
pub trait LinkActivationHandler {
    fn on_activate(&mut self, full_name: &str);
}

/// The Session is the high-level facade over the linked-document core.
///
/// It owns the one piece of mutable editor state — the active document id
/// plus the staged (possibly unsaved) filename and content — and orchestrates
/// every operation the editing surface triggers: open, save, delete, create,
/// link activation, backlink recomputation, and debounced autosave.
///
/// All operations run to completion on their trigger; the session is
/// single-threaded and re-reads the full document snapshot from the store on
/// every invocation rather than maintaining an incremental index.
pub struct Session {
    store: DocumentStore,
    active: Option<DocId>,
    filename: String,
    content: String,
    default_filename: String,
    autosave_enabled: bool,
    autosave: Debouncer,
}

impl Session {
    pub fn new(backend: Arc<dyn KvBackend>, config: &NotelinkConfig) -> Self {
        Self {
            store: DocumentStore::with_namespace(backend, config.store.namespace.clone()),
            active: None,
            filename: config.editor.default_filename.clone(),
            content: String::new(),
            default_filename: config.editor.default_filename.clone(),
            autosave_enabled: config.autosave.enabled,
            autosave: Debouncer::new(config.autosave.debounce_ms),
        }
    }

    /// Convenience constructor over a fresh in-memory backend.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()), &NotelinkConfig::default())
    }

    pub fn active_id(&self) -> Option<&DocId> {
        self.active.as_ref()
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    // ------------------------------------------------------------------------
    // Document lifecycle
    // ------------------------------------------------------------------------

    /// Load a document into the staged state. A missing id is a no-op.
    pub fn open(&mut self, id: &DocId) {
        let Some(record) = self.store.get(id) else {
            return;
        };
        self.active = Some(id.clone());
        self.filename = record.filename;
        self.content = record.content;
    }

    /// Persist the staged state.
    ///
    /// A blank filename saves nothing and returns `Ok(None)`. Otherwise the
    /// filename is normalized, the record written wholesale with
    /// `last_modified = now`, and a fresh id minted when no document is
    /// active yet.
    pub fn save(&mut self, now: u64) -> io::Result<Option<DocId>> {
        if self.filename.trim().is_empty() {
            return Ok(None);
        }

        let id = match &self.active {
            Some(id) => id.clone(),
            None => self.store.fresh_id(),
        };
        let record = DocumentRecord {
            filename: normalize_filename(&self.filename),
            content: self.content.clone(),
            last_modified: now,
        };
        self.store.put(&id, &record)?;

        self.filename = record.filename;
        self.active = Some(id.clone());
        Ok(Some(id))
    }

    /// Delete a document. Immediate and unrecoverable.
    ///
    /// When the active document is deleted, the most-recently-modified
    /// remaining document becomes active; with nothing left, a blank
    /// untitled document is staged.
    pub fn delete(&mut self, id: &DocId) -> io::Result<()> {
        self.store.delete(id)?;

        if self.active.as_ref() == Some(id) {
            let docs = self.store.list_all();
            match docs.into_iter().max_by_key(|(_, record)| record.last_modified) {
                Some((next_id, _)) => self.open(&next_id),
                None => self.create_new(),
            }
        }
        Ok(())
    }

    /// Stage a fresh blank document. Nothing is persisted until saved.
    pub fn create_new(&mut self) {
        self.active = None;
        self.filename = self.default_filename.clone();
        self.content.clear();
    }

    /// Stage foreign text (a loaded file) as a new unsaved document.
    pub fn import(&mut self, filename: &str, content: &str) {
        self.active = None;
        self.filename = filename.to_string();
        self.content = content.to_string();
    }

    /// Follow a rendered link to its target.
    ///
    /// `full_name` is the normalized filename carried by the anchor. When a
    /// document matches (case-insensitively), it is opened; otherwise a blank
    /// document with that filename is staged so the first save creates it.
    pub fn activate_link(&mut self, full_name: &str) {
        let docs = self.store.list_all();
        match find_by_filename(full_name, &docs) {
            Some((id, _)) => {
                let id = id.clone();
                self.open(&id);
            }
            None => {
                self.create_new();
                self.filename = full_name.to_string();
            }
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Documents referencing the active one. Recomputed from the full
    /// snapshot on every call; empty while no document is active.
    pub fn backlinks(&self) -> Vec<BacklinkRef> {
        let Some(id) = &self.active else {
            return Vec::new();
        };
        let Some(record) = self.store.get(id) else {
            return Vec::new();
        };
        find_backlinks(&record.filename, &self.store.list_all())
    }

    /// Link-substituted, rendered markup for the staged content.
    pub fn preview(&self, renderer: &dyn MarkdownRenderer) -> String {
        render_preview(&self.content, &self.store.list_all(), renderer)
    }

    /// Full document listing, most recently modified first.
    pub fn documents(&self) -> Vec<(DocId, DocumentRecord)> {
        let mut docs: Vec<_> = self.store.list_all().into_iter().collect();
        docs.sort_by(|a, b| b.1.last_modified.cmp(&a.1.last_modified));
        docs
    }

    // ------------------------------------------------------------------------
    // Autosave
    // ------------------------------------------------------------------------

    /// Replace the staged content and arm the autosave timer. Each edit
    /// resets the pending deadline rather than queuing another.
    pub fn edit(&mut self, content: &str, now: u64) {
        self.content = content.to_string();
        if self.autosave_enabled {
            self.autosave.signal(now);
        }
    }

    /// Advance the autosave clock, persisting once input has quiesced for
    /// the configured interval. Returns the saved id when a save fired.
    pub fn tick(&mut self, now: u64) -> io::Result<Option<DocId>> {
        if !self.autosave.fire(now) {
            return Ok(None);
        }
        let saved = self.save(now)?;
        if saved.is_some() {
            tracing::debug!(filename = %self.filename, "autosaved document");
        }
        Ok(saved)
    }

    // ------------------------------------------------------------------------
    // Wall-clock conveniences
    // ------------------------------------------------------------------------

    /// [`Session::save`] stamped with the wall clock.
    pub fn save_now(&mut self) -> io::Result<Option<DocId>> {
        self.save(crate::utils::time::now())
    }

    /// [`Session::edit`] against the wall clock.
    pub fn edit_now(&mut self, content: &str) {
        self.edit(content, crate::utils::time::now());
    }

    /// [`Session::tick`] against the wall clock.
    pub fn tick_now(&mut self) -> io::Result<Option<DocId>> {
        self.tick(crate::utils::time::now())
    }
}

impl LinkActivationHandler for Session {
    fn on_activate(&mut self, full_name: &str) {
        self.activate_link(full_name);
    }
}
