//! Verbatim rendering: the part's inner markup with the author's own layout.
//!
//! Surrounding blank lines and the indentation shared by every line are removed so
//! the snippet starts at column zero; everything else is kept as written.

use super::{PartRenderer, RenderMode, RenderOptions};
use crate::dom;
use crate::error::SnippetError;
use crate::snippet::SnippetBody;
use markup5ever_rcdom::Handle;

pub struct VerbatimRenderer<'a> {
    options: &'a RenderOptions,
}

impl<'a> VerbatimRenderer<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self { options }
    }
}

impl PartRenderer for VerbatimRenderer<'_> {
    fn mode(&self) -> RenderMode {
        RenderMode::Verbatim
    }

    fn render(&self, element: &Handle) -> Result<SnippetBody, SnippetError> {
        let inner = self.options.unshield(&dom::inner_html(element)?);
        let text = dedent(&inner)
            .iter()
            .map(|line| self.options.escape_line(line))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(SnippetBody::Text(text))
    }
}

/// Drop leading/trailing blank lines and the common leading whitespace.
fn dedent(text: &str) -> Vec<&str> {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let Some(first) = lines.iter().position(|line| !line.is_empty()) else {
        return Vec::new();
    };
    let last = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .unwrap_or(first);
    let lines = &lines[first..=last];

    let indent = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|&line| match line.get(indent..) {
            Some(rest) => rest,
            None => line.trim_start(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;
    use crate::selector::select;

    fn render_first(source: &str, selector: &str) -> String {
        let options = RenderOptions::default().with_mode(RenderMode::Verbatim);
        let dom = parse(source);
        let matches = select(&dom.document, selector).unwrap();
        VerbatimRenderer::new(&options)
            .render(&matches[0])
            .unwrap()
            .to_text()
    }

    #[test]
    fn keeps_relative_indentation() {
        let source = "<div class=\"card\">\n    <ul>\n      <li>One</li>\n    </ul>\n\n    <p>Two</p>\n  </div>";
        assert_eq!(
            render_first(source, ".card"),
            "<ul>\n  <li>One</li>\n</ul>\n\n<p>Two</p>"
        );
    }

    #[test]
    fn restores_processing_instructions() {
        let source = "<div class=\"card\">\n  <?php $x = 1; ?>\n  <p>Hi</p>\n</div>";
        assert_eq!(render_first(source, ".card"), "<?php \\$x = 1; ?>\n<p>Hi</p>");
    }

    #[test]
    fn multi_line_php_block_keeps_its_layout() {
        let source = "<div class=\"card\">\n  <?php\n    $x = 1;\n  ?>\n  <!--done?-->\n</div>";
        assert_eq!(
            render_first(source, ".card"),
            "<?php\n  \\$x = 1;\n?>\n<!--done?-->"
        );
    }

    #[test]
    fn template_content_is_kept() {
        let source = "<div class=\"card\">\n  <template>\n    <p>Inside</p>\n  </template>\n</div>";
        assert_eq!(
            render_first(source, ".card"),
            "<template>\n  <p>Inside</p>\n</template>"
        );
    }

    #[test]
    fn empty_element_renders_blank() {
        assert_eq!(render_first("<div class=\"card\">   </div>", ".card"), "");
    }

    #[test]
    fn dedent_ignores_blank_lines_when_measuring() {
        assert_eq!(dedent("\n    a\n\n      b\n   \n"), vec!["a", "", "  b"]);
    }
}
