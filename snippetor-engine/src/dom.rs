//! Markup parsing and tree navigation
//!
//! We use the `html5ever` + `markup5ever_rcdom` pair for parsing and serialization:
//! - `html5ever`: browser-grade HTML5 parser, recovers from malformed markup
//! - `markup5ever_rcdom`: reference-counted DOM the rest of the crate walks
//!
//! Everything else in the crate only talks to the tree through the helpers in this
//! module, so the parser stays a black box with a small surface:
//! `parse`, `outer_html`, `inner_html`, `attribute`, `children`, `text_content`.
//!
//! # Comment shielding
//!
//! HTML has no notion of processing instructions. A `<?php ... ?>` block in the
//! source is tokenized as a bogus comment and comes back out of the serializer as
//! `<!--?php ... ?-->`. The renderers undo that (see `render::escape`).

use crate::error::SnippetError;
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use std::rc::Rc;

/// Elements that never have content and are never closed.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text children are emitted without entity escaping.
pub const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

/// Parse a complete markup document.
///
/// Fragments are accepted as well; the parser wraps them in `html`/`body`.
/// The content of every `<template>` is moved under the template element itself.
pub fn parse(source: &str) -> RcDom {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(source);
    adopt_template_contents(&dom.document);
    dom
}

/// html5ever keeps a template's content in a separate fragment that neither
/// `children` nor the serializer visits; reattach it as ordinary children.
fn adopt_template_contents(node: &Handle) {
    if let NodeData::Element {
        template_contents, ..
    } = &node.data
    {
        if let Some(fragment) = template_contents.borrow_mut().take() {
            let adopted = std::mem::take(&mut *fragment.children.borrow_mut());
            for child in &adopted {
                child.parent.set(Some(Rc::downgrade(node)));
            }
            node.children.borrow_mut().extend(adopted);
        }
    }
    for child in node.children.borrow().iter() {
        adopt_template_contents(child);
    }
}

/// Whether the node is an element.
pub fn is_element(node: &Handle) -> bool {
    matches!(node.data, NodeData::Element { .. })
}

/// Local tag name of an element, `None` for every other node kind.
pub fn tag_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

/// Value of the attribute `name` on an element.
pub fn attribute(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| attr.name.prefix.is_none() && &*attr.name.local == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// All attributes of an element as `(qualified name, value)` pairs, in source order.
pub fn attributes(node: &Handle) -> Vec<(String, String)> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .map(|attr| {
                let name = match &attr.name.prefix {
                    Some(prefix) => format!("{}:{}", prefix, attr.name.local),
                    None => attr.name.local.to_string(),
                };
                (name, attr.value.to_string())
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Whitespace-separated tokens of the `class` attribute, order preserved.
pub fn class_tokens(node: &Handle) -> Vec<String> {
    attribute(node, "class")
        .map(|value| value.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Child nodes in document order.
pub fn children(node: &Handle) -> Vec<Handle> {
    node.children.borrow().clone()
}

/// Concatenated text of the node and all its descendants.
pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    collect_text(node, &mut text);
    text
}

fn collect_text(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        _ => {
            for child in node.children.borrow().iter() {
                collect_text(child, out);
            }
        }
    }
}

/// Parent of a node, following the weak back-reference.
///
/// The reference is put back untouched; the tree is never modified.
pub fn parent_of(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take()?;
    let parent = weak.upgrade();
    node.parent.set(Some(weak));
    parent
}

/// Parent of a node if that parent is an element.
pub fn parent_element(node: &Handle) -> Option<Handle> {
    parent_of(node).filter(is_element)
}

/// Element siblings that come before `node`, nearest first.
pub fn preceding_element_siblings(node: &Handle) -> Vec<Handle> {
    let Some(parent) = parent_of(node) else {
        return Vec::new();
    };
    let siblings = parent.children.borrow();
    let position = siblings
        .iter()
        .position(|sibling| Rc::ptr_eq(sibling, node))
        .unwrap_or(0);
    siblings[..position]
        .iter()
        .rev()
        .filter(|sibling| is_element(sibling))
        .cloned()
        .collect()
}

/// Serialize a node including its own tags.
pub fn outer_html(node: &Handle) -> Result<String, SnippetError> {
    serialize_node(node, TraversalScope::IncludeNode)
}

/// Serialize only the children of a node.
pub fn inner_html(node: &Handle) -> Result<String, SnippetError> {
    serialize_node(node, TraversalScope::ChildrenOnly(None))
}

fn serialize_node(node: &Handle, scope: TraversalScope) -> Result<String, SnippetError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: scope,
        ..Default::default()
    };
    let serializable = SerializableHandle::from(node.clone());
    serialize(&mut output, &serializable, opts).map_err(|e| {
        SnippetError::Serialization(format!("HTML serialization failed: {e}"))
    })?;

    String::from_utf8(output)
        .map_err(|e| SnippetError::Serialization(format!("UTF-8 conversion failed: {e}")))
}

/// Pre-order walk over every element below `root`, in document order.
pub fn descendant_elements(root: &Handle) -> Vec<Handle> {
    let mut found = Vec::new();
    collect_elements(root, &mut found);
    found
}

fn collect_elements(node: &Handle, out: &mut Vec<Handle>) {
    for child in node.children.borrow().iter() {
        if is_element(child) {
            out.push(child.clone());
        }
        collect_elements(child, out);
    }
}
