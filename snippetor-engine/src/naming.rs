//! Name Synthesizer: snippet names from BEM-style class names
//!
//! `<div class="card card--featured card--wide">` matched as the first `card` of a
//! run becomes `card-01--featured--wide`. With a prefix `fse` it becomes
//! `fse:card-01--featured--wide`.
//!
//! The counter is keyed by base name and increases by one for every named match
//! with that base name. Different class lists can still spell the same name
//! (`a-01--b` as a base, or `a` with modifier `b-01`); when a name is already
//! taken in the run, the base's counter keeps advancing until the name is free.
//! The outcome depends only on document order, so runs stay deterministic.

use crate::dom;
use markup5ever_rcdom::Handle;
use std::collections::{HashMap, HashSet};

/// Separator between a block and its modifier (`card--featured`).
pub const MODIFIER_SEPARATOR: &str = "--";

/// Base name used when no classed element is found.
pub const DEFAULT_FALLBACK_BASE: &str = "unknown-name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingOptions {
    /// Namespace tag put before the name, separated by `:`. Empty means none.
    pub prefix: Option<String>,
    pub fallback_base: String,
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            prefix: None,
            fallback_base: DEFAULT_FALLBACK_BASE.to_string(),
        }
    }
}

/// Per-run name generator; holds the occurrence counters and the names handed out.
#[derive(Debug)]
pub struct NameSynthesizer<'a> {
    options: &'a NamingOptions,
    counters: HashMap<String, usize>,
    taken: HashSet<String>,
}

impl<'a> NameSynthesizer<'a> {
    pub fn new(options: &'a NamingOptions) -> Self {
        Self {
            options,
            counters: HashMap::new(),
            taken: HashSet::new(),
        }
    }

    /// Name the next snippet for `element`, consuming one counter slot.
    pub fn next_name(&mut self, element: &Handle) -> String {
        let tokens = naming_tokens(element);
        let base = base_name(&tokens).unwrap_or(self.options.fallback_base.as_str());
        let modifiers = modifiers(&tokens, base);

        let prefix = self.options.prefix.as_deref().filter(|p| !p.is_empty());

        let counter = self.counters.entry(base.to_string()).or_insert(0);
        loop {
            *counter += 1;
            let name = format_name(prefix, base, *counter, &modifiers);
            if self.taken.insert(name.clone()) {
                return name;
            }
            log::debug!("name {name} already taken, advancing counter for {base}");
        }
    }
}

fn format_name(prefix: Option<&str>, base: &str, counter: usize, modifiers: &[&str]) -> String {
    let mut name = format!("{base}-{counter:02}");
    for modifier in modifiers {
        name.push_str(MODIFIER_SEPARATOR);
        name.push_str(modifier);
    }

    match prefix {
        Some(prefix) => format!("{prefix}:{name}"),
        None => name,
    }
}

/// Class tokens of the first classed element: the element itself, else its first
/// classed descendant in document order.
pub fn naming_tokens(element: &Handle) -> Vec<String> {
    let own = dom::class_tokens(element);
    if !own.is_empty() {
        return own;
    }
    dom::descendant_elements(element)
        .iter()
        .map(dom::class_tokens)
        .find(|tokens| !tokens.is_empty())
        .unwrap_or_default()
}

/// First token that is not itself a modifier; the first token if all of them are.
pub fn base_name(tokens: &[String]) -> Option<&str> {
    tokens
        .iter()
        .find(|token| !token.contains(MODIFIER_SEPARATOR))
        .or_else(|| tokens.first())
        .map(String::as_str)
}

/// Suffixes of every `base--suffix` token, in order, repeats kept.
pub fn modifiers<'t>(tokens: &'t [String], base: &str) -> Vec<&'t str> {
    let marker = format!("{base}{MODIFIER_SEPARATOR}");
    tokens
        .iter()
        .filter_map(|token| token.strip_prefix(marker.as_str()))
        .filter(|suffix| !suffix.is_empty())
        .collect()
}
