//! Notelink Core Library
//!
//! Core logic of a linked-note editor: document store accessor, wiki-link
//! resolver, backlink indexer, and the editor session facade.
//! No UI or network dependencies; storage and rendering sit behind traits.
//!

pub mod backlinks;
pub mod config;
pub mod debounce;
pub mod kv;
pub mod model;
pub mod render;
pub mod resolver;
pub mod session;
pub mod store;
pub mod utils;

pub use backlinks::find_backlinks;
pub use config::NotelinkConfig;
pub use model::{BacklinkRef, DocId, DocumentRecord, LinkState, LinkToken};
pub use render::{render_preview, MarkdownRenderer, PulldownRenderer};
pub use resolver::{normalize_filename, resolve_links, scan_links};
pub use session::{LinkActivationHandler, Session};
pub use store::DocumentStore;
