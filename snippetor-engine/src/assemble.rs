//! Snippet Assembler: matches in, [`SnippetTable`] out
//!
//! For every match in document order: render the body, skip it if blank, name it,
//! insert it. The name counters live for exactly one call.

use crate::dom;
use crate::error::SnippetError;
use crate::naming::{NameSynthesizer, NamingOptions};
use crate::render::RenderOptions;
use crate::selector;
use crate::snippet::{Snippet, SnippetTable};
use markup5ever_rcdom::Handle;

/// Everything one extraction run needs besides the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub selector: String,
    pub render: RenderOptions,
    pub naming: NamingOptions,
}

impl ExtractOptions {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            render: RenderOptions::default(),
            naming: NamingOptions::default(),
        }
    }

    pub fn with_render(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    pub fn with_naming(mut self, naming: NamingOptions) -> Self {
        self.naming = naming;
        self
    }
}

/// Build the snippet table for already selected parts.
pub fn assemble(
    matches: &[Handle],
    render: &RenderOptions,
    naming: &NamingOptions,
) -> Result<SnippetTable, SnippetError> {
    let renderer = render.renderer();
    let mut names = NameSynthesizer::new(naming);
    let mut table = SnippetTable::new();

    for (index, element) in matches.iter().enumerate() {
        let body = renderer.render(element)?;
        if body.is_blank() {
            log::debug!(
                "skipping match {index} <{}>: blank body",
                dom::tag_name(element).unwrap_or_default()
            );
            continue;
        }
        let name = names.next_name(element);
        log::debug!("match {index} -> {name}");
        table.insert(Snippet::new(name, body))?;
    }

    Ok(table)
}

/// Parse `source`, select the parts and assemble their snippets.
///
/// Either the whole table is returned or an error; a failed run yields nothing.
pub fn extract_snippets(source: &str, options: &ExtractOptions) -> Result<SnippetTable, SnippetError> {
    let list = selector::SelectorList::parse(&options.selector)?;
    let dom = dom::parse(source);
    let matches = selector::select_with(&dom.document, &list);
    log::debug!(
        "selector '{}' matched {} element(s)",
        options.selector,
        matches.len()
    );
    assemble(&matches, &options.render, &options.naming)
}
