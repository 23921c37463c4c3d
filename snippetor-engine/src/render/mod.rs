//! Subtree Serializer: turns a matched element into snippet body text
//!
//! Two renderers implement [`PartRenderer`]; one is selected per run by
//! [`RenderOptions::mode`]:
//!
//! - [`StructuralRenderer`] rebuilds the part line by line from the tree, one
//!   indent unit per nesting level. Output is a list of lines.
//! - [`VerbatimRenderer`] keeps the author's own formatting of the part's inner
//!   markup. Output is a single string.
//!
//! Both use the same clean-up (see [`escape`]). Comment unshielding runs on each
//! complete serialized chunk (a comment, a one-line element, the verbatim inner
//! markup) so a shielded block spanning lines is restored as a unit. Sigil
//! escaping then runs exactly once per emitted line, so nesting depth never
//! changes how many escapes a sigil gets.

pub mod escape;
mod structural;
mod verbatim;

pub use structural::StructuralRenderer;
pub use verbatim::VerbatimRenderer;

use crate::error::SnippetError;
use crate::snippet::SnippetBody;
use markup5ever_rcdom::Handle;
use serde::{Deserialize, Serialize};

/// How a matched part is turned back into text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Re-indent from the tree structure
    #[default]
    Structural,
    /// Keep the source formatting of the inner markup
    Verbatim,
}

/// Sigil escaping settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigilEscape {
    pub sigil: char,
    pub escape: char,
}

impl Default for SigilEscape {
    fn default() -> Self {
        Self {
            sigil: '$',
            escape: '\\',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub mode: RenderMode,
    /// Indentation added per nesting level (structural mode)
    pub indent_unit: String,
    /// `None` disables sigil escaping
    pub escape: Option<SigilEscape>,
    pub unshield_comments: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::Structural,
            indent_unit: "\t".to_string(),
            escape: Some(SigilEscape::default()),
            unshield_comments: true,
        }
    }
}

impl RenderOptions {
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// The renderer for the configured mode.
    pub fn renderer(&self) -> Box<dyn PartRenderer + '_> {
        match self.mode {
            RenderMode::Structural => Box::new(StructuralRenderer::new(self)),
            RenderMode::Verbatim => Box::new(VerbatimRenderer::new(self)),
        }
    }

    /// Restore shielded processing instructions in a complete serialized chunk.
    pub fn unshield(&self, text: &str) -> String {
        if self.unshield_comments {
            escape::unshield_comments(text)
        } else {
            text.to_string()
        }
    }

    /// Escape sigils in one emitted line.
    pub fn escape_line(&self, text: &str) -> String {
        match self.escape {
            Some(SigilEscape { sigil, escape }) => escape::escape_sigils(text, sigil, escape),
            None => text.to_string(),
        }
    }

    /// An escaped line indented to `depth`.
    pub fn line(&self, depth: usize, text: &str) -> String {
        format!("{}{}", self.indent_unit.repeat(depth), self.escape_line(text))
    }
}

/// Renders one matched element into a snippet body.
pub trait PartRenderer {
    fn mode(&self) -> RenderMode;

    fn render(&self, element: &Handle) -> Result<SnippetBody, SnippetError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unshield_then_escape() {
        let options = RenderOptions::default();
        let text = options.unshield("<!--?php $x = 1; ?-->");
        assert_eq!(options.escape_line(&text), "<?php \\$x = 1; ?>");
    }

    #[test]
    fn passes_can_be_disabled() {
        let options = RenderOptions {
            escape: None,
            unshield_comments: false,
            ..RenderOptions::default()
        };
        assert_eq!(options.unshield("<!--?php $x ?-->"), "<!--?php $x ?-->");
        assert_eq!(options.escape_line("$x"), "$x");
    }

    #[test]
    fn line_indents_with_the_unit() {
        let options = RenderOptions {
            indent_unit: "  ".to_string(),
            ..RenderOptions::default()
        };
        assert_eq!(options.line(2, "<p>$a</p>"), "    <p>\\$a</p>");
    }

    #[test]
    fn renderer_follows_mode() {
        let options = RenderOptions::default().with_mode(RenderMode::Verbatim);
        assert_eq!(options.renderer().mode(), RenderMode::Verbatim);
        assert_eq!(
            RenderOptions::default().renderer().mode(),
            RenderMode::Structural
        );
    }
}
