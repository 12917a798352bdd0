use std::collections::HashMap;

use pulldown_cmark::{html, Options, Parser};

use crate::model::{DocId, DocumentRecord};
use crate::resolver::resolve_links;

/// Abstract interface for markdown-to-markup rendering.
pub trait MarkdownRenderer {
    fn render(&self, text: &str) -> String;
}

/// Standard implementation of [`MarkdownRenderer`] using pulldown-cmark.
///
/// Raw inline HTML passes through untouched, which is what carries the
/// substituted link anchors across the rendering step.
pub struct PulldownRenderer;

impl MarkdownRenderer for PulldownRenderer {
    fn render(&self, text: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        let parser = Parser::new_ext(text, options);
        let mut output = String::new();
        html::push_html(&mut output, parser);
        output
    }
}

/// The full preview pipeline: substitute link tokens, then render.
pub fn render_preview(
    text: &str,
    docs: &HashMap<DocId, DocumentRecord>,
    renderer: &dyn MarkdownRenderer,
) -> String {
    renderer.render(&resolve_links(text, docs))
}
