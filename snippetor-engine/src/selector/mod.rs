//! Matcher: selects the parts to extract
//!
//! `select(root, ".card")` returns every element below `root` matching the
//! selector, in document order. Elements are visited once each, so an element
//! matched by two alternatives of a selector list is still returned once, while
//! two distinct elements with identical markup are both returned.
//!
//! An empty result is not an error.

mod matcher;
mod parser;

use crate::dom;
use crate::error::SnippetError;
use markup5ever_rcdom::Handle;

/// A parsed selector list (`a, b, c`).
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList(pub Vec<ComplexSelector>);

/// Compound selectors joined by combinators, written left to right.
///
/// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    pub compounds: Vec<Compound>,
    pub combinators: Vec<Combinator>,
}

/// Conditions that must all hold for a single element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    /// Lowercased tag name, `None` for `*` or no type selector
    pub tag: Option<String>,
    pub simple: Vec<SimpleSelector>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SimpleSelector {
    Class(String),
    Id(String),
    Attribute {
        name: String,
        test: Option<(AttrOperator, String)>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOperator {
    /// `[a=v]`
    Equals,
    /// `[a~=v]`
    Includes,
    /// `[a|=v]`
    DashMatch,
    /// `[a^=v]`
    Prefix,
    /// `[a$=v]`
    Suffix,
    /// `[a*=v]`
    Substring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
    NextSibling,
    SubsequentSibling,
}

impl SelectorList {
    pub fn parse(selector: &str) -> Result<Self, SnippetError> {
        parser::parse_selector_list(selector)
    }

    /// Whether `element` matches any alternative of the list.
    pub fn matches(&self, element: &Handle) -> bool {
        self.0
            .iter()
            .any(|complex| matcher::matches_complex(complex, element))
    }
}

/// Select every element below `root` matching `selector`, in document order.
pub fn select(root: &Handle, selector: &str) -> Result<Vec<Handle>, SnippetError> {
    let list = SelectorList::parse(selector)?;
    Ok(select_with(root, &list))
}

/// Like [`select`], for an already parsed selector.
pub fn select_with(root: &Handle, list: &SelectorList) -> Vec<Handle> {
    dom::descendant_elements(root)
        .into_iter()
        .filter(|element| list.matches(element))
        .collect()
}
