//! Markup parts to editor snippets
//!
//!     This crate takes a markup source file (typically a theme or pattern file written with
//!     BEM-like class names: `card`, `card--featured`), selects the component instances
//!     ("parts") with a CSS selector, and turns each one into a named, indented template
//!     ("snippet") an editor can insert.
//!
//!     TLDR:
//!         - `extract_snippets(source, &options)` is the whole engine: parse, select, render, name.
//!         - The result is a [`SnippetTable`]; [`publish`] writes it as the JSON an editor reads.
//!         - This is a pure lib: no printing, no env vars, no process exits. The CLI owns those.
//!
//! Architecture
//!
//!     .
//!     ├── error.rs        # SnippetError
//!     ├── dom.rs          # Parser adapter (html5ever + rcdom) and tree navigation
//!     ├── selector        # Matcher: selector parsing and right-to-left matching
//!     ├── render          # Subtree Serializer: structural and verbatim renderers, escaping
//!     ├── naming.rs       # Name Synthesizer: base name, modifiers, per-run counters
//!     ├── snippet.rs      # Snippet, SnippetBody, SnippetTable
//!     ├── assemble.rs     # Assembler and the extract_snippets entry point
//!     └── publish.rs      # Writing the table to the workspace
//!
//!     Control flow: dom::parse → selector::select → for each match render + name → table.
//!
//! Core Algorithms
//!
//!     Rendering is the hard part. In structural mode every call renders one node into its
//!     own list of lines and the parent concatenates them, so there is no shared buffer and
//!     every subtree can be tested alone. Shielded PHP is restored on whole serialized
//!     chunks, then every emitted line is sigil-escaped exactly once, which is what keeps
//!     `$var` from being escaped twice in deep trees.
//!
//!     Counters are keyed by base name and only advance for parts that actually make it
//!     into the table. Class lists that spell an already handed-out name push the counter
//!     on until the name is free.
//!
//! Runs
//!
//!     Nothing survives a run. Counters, tree and table are created per call and dropped
//!     after; two calls never share state. A run either returns a full table or an error.

pub mod assemble;
pub mod dom;
pub mod error;
pub mod naming;
pub mod publish;
pub mod render;
pub mod selector;
pub mod snippet;

pub use assemble::{assemble, extract_snippets, ExtractOptions};
pub use error::SnippetError;
pub use naming::NamingOptions;
pub use publish::{publish, PublishArtifact, PublishResult, PublishSpec};
pub use render::{RenderMode, RenderOptions, SigilEscape};
pub use snippet::{Snippet, SnippetBody, SnippetTable};
