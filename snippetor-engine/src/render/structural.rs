//! Structural re-indentation
//!
//! Each call renders one node and returns its own lines; parents concatenate the
//! lines of their children. Rules:
//!
//! - the matched element is always decomposed: opening tag, children one level
//!   deeper, closing tag
//! - a nested element whose serialized form fits on one line is emitted as-is,
//!   without walking into it
//! - text is split into lines, each trimmed; blank lines are dropped
//! - an opening tag ending in `/>` (void elements) gets no closing tag

use super::{PartRenderer, RenderMode, RenderOptions};
use crate::dom::{self, RAW_TEXT_ELEMENTS, VOID_ELEMENTS};
use crate::error::SnippetError;
use crate::snippet::SnippetBody;
use markup5ever_rcdom::{Handle, NodeData};

pub struct StructuralRenderer<'a> {
    options: &'a RenderOptions,
}

impl<'a> StructuralRenderer<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self { options }
    }

    fn render_element(
        &self,
        element: &Handle,
        depth: usize,
        is_root: bool,
    ) -> Result<Vec<String>, SnippetError> {
        if !is_root {
            let html = self.options.unshield(&dom::outer_html(element)?);
            let html = html.trim();
            if !html.contains('\n') {
                return Ok(vec![self.options.line(depth, html)]);
            }
        }

        let tag = dom::tag_name(element).unwrap_or_default();
        let start = start_tag(element, &tag);
        let raw_text = RAW_TEXT_ELEMENTS.contains(&tag.as_str());

        let mut lines = vec![self.options.line(depth, &start)];
        for child in dom::children(element) {
            lines.extend(self.render_child(&child, depth + 1, raw_text)?);
        }
        if !start.ends_with("/>") {
            lines.push(self.options.line(depth, &format!("</{tag}>")));
        }
        Ok(lines)
    }

    fn render_child(
        &self,
        node: &Handle,
        depth: usize,
        raw_text: bool,
    ) -> Result<Vec<String>, SnippetError> {
        match &node.data {
            NodeData::Element { .. } => self.render_element(node, depth, false),
            NodeData::Text { contents } => {
                let contents = contents.borrow();
                let text = if raw_text {
                    contents.to_string()
                } else {
                    escape_text(&contents)
                };
                Ok(self.text_lines(&text, depth))
            }
            NodeData::Comment { .. } => {
                let html = self.options.unshield(&dom::outer_html(node)?);
                Ok(self.text_lines(&html, depth))
            }
            _ => Ok(Vec::new()),
        }
    }

    fn text_lines(&self, text: &str, depth: usize) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| self.options.line(depth, line))
            .collect()
    }
}

impl PartRenderer for StructuralRenderer<'_> {
    fn mode(&self) -> RenderMode {
        RenderMode::Structural
    }

    fn render(&self, element: &Handle) -> Result<SnippetBody, SnippetError> {
        Ok(SnippetBody::Lines(self.render_element(element, 0, true)?))
    }
}

/// Opening tag rebuilt from the element's name and attributes.
fn start_tag(element: &Handle, tag: &str) -> String {
    let mut start = format!("<{tag}");
    for (name, value) in dom::attributes(element) {
        start.push_str(&format!(" {name}=\"{}\"", escape_attribute(&value)));
    }
    if VOID_ELEMENTS.contains(&tag) {
        start.push_str(" />");
    } else {
        start.push('>');
    }
    start
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            c => escaped.push(c),
        }
    }
    escaped
}
