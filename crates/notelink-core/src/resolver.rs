use std::collections::HashMap;

use regex::Regex;

use crate::model::{DocId, DocumentRecord, LinkState, LinkToken};

pub const MARKDOWN_EXTENSION: &str = ".md";

/// Lazy match: shortest run up to the next `]]`. Single brackets and
/// unbalanced tokens simply never match and stay literal text.
const TOKEN_PATTERN: &str = r"\[\[(.*?)\]\]";

/// Canonical form of a display name: trimmed, `.md`-suffixed.
///
/// Idempotent — normalizing an already-normalized filename is a no-op.
///
/// ```
/// use notelink_core::normalize_filename;
///
/// assert_eq!(normalize_filename(" notes "), "notes.md");
/// assert_eq!(normalize_filename("notes.md"), "notes.md");
/// ```
pub fn normalize_filename(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.ends_with(MARKDOWN_EXTENSION) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{MARKDOWN_EXTENSION}")
    }
}

fn token_regex() -> Regex {
    Regex::new(TOKEN_PATTERN).unwrap()
}

/// Does any document carry this filename, ignoring case?
///
/// Duplicate filenames are not enforced against, so this answers existence
/// only; whichever duplicate enumerates first wins elsewhere.
pub fn filename_exists(target: &str, docs: &HashMap<DocId, DocumentRecord>) -> bool {
    let target = target.to_lowercase();
    docs.values().any(|d| d.filename.to_lowercase() == target)
}

/// Case-insensitive filename lookup. Picks an arbitrary match when several
/// documents share the name.
pub fn find_by_filename<'a>(
    target: &str,
    docs: &'a HashMap<DocId, DocumentRecord>,
) -> Option<(&'a DocId, &'a DocumentRecord)> {
    let target = target.to_lowercase();
    docs.iter().find(|(_, d)| d.filename.to_lowercase() == target)
}

/// Scan `text` for `[[name]]` tokens and classify each against the document
/// set, without substituting.
pub fn scan_links(text: &str, docs: &HashMap<DocId, DocumentRecord>) -> Vec<LinkToken> {
    token_regex()
        .captures_iter(text)
        .map(|caps| {
            let label = caps[1].to_string();
            let target = normalize_filename(&label);
            let state = if filename_exists(&target, docs) {
                LinkState::Resolved
            } else {
                LinkState::Broken
            };
            LinkToken {
                label,
                target,
                state,
            }
        })
        .collect()
}

/// Replace every `[[name]]` token with an anchor element, classified as
/// `internal-link` (target exists) or `internal-link broken`.
///
/// The anchor carries the normalized target in `data-filename` and keeps the
/// original untrimmed name as its label. Substitution happens before the
/// markdown renderer runs; the anchor is raw inline HTML so the renderer
/// passes it through unmangled.
pub fn resolve_links(text: &str, docs: &HashMap<DocId, DocumentRecord>) -> String {
    token_regex()
        .replace_all(text, |caps: &regex::Captures| {
            let label = &caps[1];
            let target = normalize_filename(label);
            let class = if filename_exists(&target, docs) {
                "internal-link"
            } else {
                "internal-link broken"
            };
            format!(r##"<a href="#" class="{class}" data-filename="{target}">{label}</a>"##)
        })
        .into_owned()
}
