//! Snippet and SnippetTable: the output of one extraction run
//!
//! The table serializes to the object a snippet-aware editor reads:
//!
//! ```json
//! {
//!   "card-01--featured": {
//!     "prefix": "card-01--featured",
//!     "body": ["<div class=\"card card--featured\">", "\tHi", "</div>"]
//!   }
//! }
//! ```
//!
//! Entries keep insertion (match) order.

use crate::error::SnippetError;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::collections::HashSet;

/// Rendered template text of a snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SnippetBody {
    /// One entry per line, indentation embedded (structural rendering)
    Lines(Vec<String>),
    /// A single multi-line string (verbatim rendering)
    Text(String),
}

impl SnippetBody {
    /// True when the body has no visible content.
    pub fn is_blank(&self) -> bool {
        match self {
            SnippetBody::Lines(lines) => lines.iter().all(|line| line.trim().is_empty()),
            SnippetBody::Text(text) => text.trim().is_empty(),
        }
    }

    /// The body as a single newline-joined string.
    pub fn to_text(&self) -> String {
        match self {
            SnippetBody::Lines(lines) => lines.join("\n"),
            SnippetBody::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub name: String,
    /// Trigger text; the name by convention
    pub prefix: String,
    pub body: SnippetBody,
}

impl Snippet {
    pub fn new(name: impl Into<String>, body: SnippetBody) -> Self {
        let name = name.into();
        Self {
            prefix: name.clone(),
            name,
            body,
        }
    }
}

impl Serialize for Snippet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Snippet", 2)?;
        state.serialize_field("prefix", &self.prefix)?;
        state.serialize_field("body", &self.body)?;
        state.end()
    }
}

/// Name → snippet mapping in match order; names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetTable {
    entries: Vec<Snippet>,
    names: HashSet<String>,
}

impl SnippetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snippet, rejecting a name that is already present.
    pub fn insert(&mut self, snippet: Snippet) -> Result<(), SnippetError> {
        if !self.names.insert(snippet.name.clone()) {
            return Err(SnippetError::DuplicateName(snippet.name));
        }
        self.entries.push(snippet);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Snippet> {
        self.entries.iter().find(|snippet| snippet.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snippet names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|snippet| snippet.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snippet> {
        self.entries.iter()
    }

    /// Pretty-printed JSON with 2-space indentation.
    pub fn to_json(&self) -> Result<String, SnippetError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnippetError::Serialization(format!("JSON encoding failed: {e}")))
    }
}

impl Serialize for SnippetTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for snippet in &self.entries {
            map.serialize_entry(&snippet.name, snippet)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a SnippetTable {
    type Item = &'a Snippet;
    type IntoIter = std::slice::Iter<'a, Snippet>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
