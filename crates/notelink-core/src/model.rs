use serde::{Deserialize, Serialize};

/// Stable document identifier.
///
/// Assigned at first save, never reused after deletion, never changed for
/// the life of the document. The string doubles as the storage key, so it
/// carries the store's key namespace prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocId(pub String);

/// Persisted per-document record, one JSON blob per id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Display name, canonically `.md`-suffixed.
    pub filename: String,
    /// Raw editable text, may contain `[[name]]` tokens.
    pub content: String,
    /// Epoch milliseconds of the last save. Ordering only, not concurrency
    /// control.
    pub last_modified: u64,
}

/// Whether a wiki-link token points at an existing document.
/// Computed fresh per render, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Resolved,
    Broken,
}

/// A scanned `[[name]]` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkToken {
    /// The text between the brackets, untrimmed; shown as the link label.
    pub label: String,
    /// Normalized target filename the token resolves against.
    pub target: String,
    pub state: LinkState,
}

/// A document that references the one being inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklinkRef {
    pub id: DocId,
    pub filename: String,
}
