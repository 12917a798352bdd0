use std::collections::HashMap;

use regex::RegexBuilder;

use crate::model::{BacklinkRef, DocId, DocumentRecord};
use crate::resolver::MARKDOWN_EXTENSION;

/// Find every document whose content references `filename` with a
/// `[[bare-name]]` token.
///
/// The pattern is built from the bare name (trailing `.md` stripped), so a
/// link written against the full filename (`[[name.md]]`) is not found —
/// the same bare-name convention `resolve_links` assumes. Matching is
/// case-insensitive on both sides, self-references are not excluded, and
/// results come back in the store's natural enumeration order (unsorted).
pub fn find_backlinks(
    filename: &str,
    docs: &HashMap<DocId, DocumentRecord>,
) -> Vec<BacklinkRef> {
    let bare = filename
        .strip_suffix(MARKDOWN_EXTENSION)
        .unwrap_or(filename);

    // The bare name is literal text; escape it so metacharacters in a
    // filename ("c++.md") match themselves.
    let pattern = RegexBuilder::new(&format!(r"\[\[{}\]\]", regex::escape(bare)))
        .case_insensitive(true)
        .build()
        .expect("escaped literal is a valid pattern");

    docs.iter()
        .filter(|(_, record)| pattern.is_match(&record.content))
        .map(|(id, record)| BacklinkRef {
            id: id.clone(),
            filename: record.filename.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(entries: &[(&str, &str, &str)]) -> HashMap<DocId, DocumentRecord> {
        entries
            .iter()
            .map(|(id, filename, content)| {
                (
                    DocId(id.to_string()),
                    DocumentRecord {
                        filename: filename.to_string(),
                        content: content.to_string(),
                        last_modified: 0,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn finds_referencing_document() {
        let docs = docs(&[("id1", "a.md", "see [[b]]"), ("id2", "b.md", "hello")]);
        let refs = find_backlinks("b.md", &docs);

        assert_eq!(
            refs,
            vec![BacklinkRef {
                id: DocId("id1".to_string()),
                filename: "a.md".to_string(),
            }]
        );
    }

    #[test]
    fn no_referencing_documents_is_empty() {
        let docs = docs(&[("id1", "a.md", "see [[b]]"), ("id2", "b.md", "hello")]);
        assert!(find_backlinks("c.md", &docs).is_empty());
    }

    #[test]
    fn matching_ignores_case_on_both_sides() {
        let docs = docs(&[("id1", "a.md", "about [[Notes]]"), ("id2", "notes.md", "")]);
        assert_eq!(find_backlinks("Notes.md", &docs).len(), 1);
        assert_eq!(find_backlinks("notes.md", &docs).len(), 1);
    }

    #[test]
    fn full_filename_token_is_not_matched() {
        let docs = docs(&[("id1", "a.md", "see [[b.md]]"), ("id2", "b.md", "")]);
        assert!(find_backlinks("b.md", &docs).is_empty());
    }

    #[test]
    fn self_reference_counts() {
        let docs = docs(&[("id1", "a.md", "recursive [[a]]")]);
        let refs = find_backlinks("a.md", &docs);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].id, DocId("id1".to_string()));
    }

    #[test]
    fn metacharacters_in_filename_match_literally() {
        let docs = docs(&[("id1", "a.md", "see [[c++]]"), ("id2", "c++.md", "")]);

        assert_eq!(find_backlinks("c++.md", &docs).len(), 1);
        // "c.." must not match "[[c++]]" via wildcard dots.
        assert!(find_backlinks("c...md", &docs).is_empty());
    }

    #[test]
    fn bare_target_without_extension_is_accepted() {
        let docs = docs(&[("id1", "a.md", "see [[b]]")]);
        assert_eq!(find_backlinks("b", &docs).len(), 1);
    }
}
