//! End-to-end extraction behaviour, one scenario per test.

use crate::common::{extract, extract_verbatim};
use snippetor::{
    extract_snippets, ExtractOptions, NamingOptions, RenderOptions, SnippetBody, SnippetError,
};

fn lines(body: &SnippetBody) -> Vec<String> {
    match body {
        SnippetBody::Lines(lines) => lines.clone(),
        SnippetBody::Text(_) => panic!("expected a line body"),
    }
}

#[test]
fn single_card_with_modifier() {
    let table = extract("<div class=\"card card--featured\">Hi</div>", ".card");

    let names: Vec<_> = table.names().collect();
    assert_eq!(names, vec!["card-01--featured"]);

    let snippet = table.get("card-01--featured").unwrap();
    assert_eq!(snippet.prefix, "card-01--featured");
    assert_eq!(
        lines(&snippet.body),
        vec!["<div class=\"card card--featured\">", "\tHi", "</div>"]
    );
}

#[test]
fn sibling_cards_share_a_counter() {
    let table = extract(
        "<div class=\"card card--featured\">A</div>\n<div class=\"card\">B</div>",
        ".card",
    );
    let names: Vec<_> = table.names().collect();
    assert_eq!(names, vec!["card-01--featured", "card-02"]);
}

#[test]
fn colliding_class_patterns_get_distinct_names() {
    let table = extract("<p class=\"a-01--b\">x</p><p class=\"a a--b-01\">y</p>", "p");
    let names: Vec<_> = table.names().collect();
    assert_eq!(names, vec!["a-01--b-01", "a-02--b-01"]);
    assert_eq!(
        lines(&table.get("a-02--b-01").unwrap().body),
        vec!["<p class=\"a a--b-01\">", "\ty", "</p>"]
    );
}

#[test]
fn verbatim_mode_restores_php_and_escapes_variables() {
    let table = extract_verbatim(
        "<div class=\"card\">\n  <?php $x = 1; ?>\n</div>",
        ".card",
    );
    let body = table.get("card-01").unwrap().body.to_text();
    assert!(body.contains("<?php \\$x = 1; ?>"), "body was {body:?}");
    assert!(!body.contains("<!--"));
}

#[test]
fn nonexistent_selector_yields_an_empty_table() {
    let table = extract("<div class=\"card\">Hi</div>", ".nonexistent");
    assert!(table.is_empty());
    assert_eq!(table.to_json().unwrap(), "{}");
}

#[test]
fn surrounding_whitespace_of_text_is_trimmed() {
    let table = extract("<div class=\"card\">  hello  </div>", ".card");
    let body = lines(&table.get("card-01").unwrap().body);
    assert_eq!(body[1], "\thello");
}

#[test]
fn prefix_namespaces_every_name() {
    let options = ExtractOptions::new(".card").with_naming(NamingOptions {
        prefix: Some("fse".to_string()),
        ..NamingOptions::default()
    });
    let table = extract_snippets("<p class=\"card\">a</p><p class=\"card\">b</p>", &options)
        .unwrap();
    let names: Vec<_> = table.names().collect();
    assert_eq!(names, vec!["fse:card-01", "fse:card-02"]);
}

#[test]
fn custom_indent_unit() {
    let options = ExtractOptions::new(".list").with_render(RenderOptions {
        indent_unit: "  ".to_string(),
        ..RenderOptions::default()
    });
    let table = extract_snippets(
        "<ul class=\"list\">\n  <li>\n    one\n  </li>\n</ul>",
        &options,
    )
    .unwrap();
    assert_eq!(
        lines(&table.get("list-01").unwrap().body),
        vec!["<ul class=\"list\">", "  <li>", "    one", "  </li>", "</ul>"]
    );
}

#[test]
fn malformed_markup_is_recovered_not_rejected() {
    let table = extract("<div class=\"card\"><p>open paragraph<span>x</div>", ".card");
    assert_eq!(table.len(), 1);
    let body = lines(&table.get("card-01").unwrap().body);
    assert_eq!(body.first().map(String::as_str), Some("<div class=\"card\">"));
    assert_eq!(body.last().map(String::as_str), Some("</div>"));
}

#[test]
fn invalid_selector_is_reported() {
    let err = extract_snippets("<div></div>", &ExtractOptions::new("div >")).unwrap_err();
    assert!(matches!(err, SnippetError::InvalidSelector { .. }));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let source = crate::common::fixture("patterns.html");
    let first = extract(&source, ".c-card, .c-button").to_json().unwrap();
    let second = extract(&source, ".c-card, .c-button").to_json().unwrap();
    assert_eq!(first, second);
}
