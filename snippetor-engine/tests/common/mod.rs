//! Shared helpers for the integration tests.

use snippetor::{extract_snippets, ExtractOptions, RenderMode, RenderOptions, SnippetTable};
use std::fs;
use std::path::PathBuf;

/// Load a file from `tests/fixtures`.
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("fixture {}: {e}", path.display()))
}

pub fn extract(source: &str, selector: &str) -> SnippetTable {
    extract_snippets(source, &ExtractOptions::new(selector)).unwrap()
}

pub fn extract_verbatim(source: &str, selector: &str) -> SnippetTable {
    let options = ExtractOptions::new(selector)
        .with_render(RenderOptions::default().with_mode(RenderMode::Verbatim));
    extract_snippets(source, &options).unwrap()
}
