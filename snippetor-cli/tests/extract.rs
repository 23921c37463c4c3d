use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const PAGE: &str = r#"<main>
  <div class="card card--featured">
    <h3><?php echo $title; ?></h3>
  </div>
  <div class="card">Plain</div>
</main>
"#;

fn read_snippets(path: &Path) -> Value {
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn writes_the_default_snippet_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("index.html"), PAGE).unwrap();

    let mut cmd = cargo_bin_cmd!("snippetor");
    cmd.arg("--workspace")
        .arg(dir.path().as_os_str())
        .arg("--class")
        .arg("card");

    cmd.assert().success().stdout(predicate::str::contains(
        "Registered 2 snippets to .vscode/html.code-snippets",
    ));

    let snippets = read_snippets(&dir.path().join(".vscode/html.code-snippets"));
    let table = snippets.as_object().unwrap();
    let names: Vec<_> = table.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["card-01--featured", "card-02"]);
    assert_eq!(snippets["card-02"]["prefix"], "card-02");

    let body = snippets["card-01--featured"]["body"].as_array().unwrap();
    assert_eq!(body.first().unwrap(), "<div class=\"card card--featured\">");
    assert!(body
        .iter()
        .any(|line| line.as_str().unwrap().contains("<?php echo \\$title; ?>")));
}

#[test]
fn stdout_flag_prints_json_and_writes_nothing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("index.html"), PAGE).unwrap();

    let mut cmd = cargo_bin_cmd!("snippetor");
    cmd.arg("extract")
        .arg("--workspace")
        .arg(dir.path().as_os_str())
        .arg("--selector")
        .arg(".card--featured")
        .arg("--stdout");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: Value = serde_json::from_slice(&output).unwrap();
    assert!(json.get("card-01--featured").is_some());
    assert!(!dir.path().join(".vscode").exists());
}

#[test]
fn config_file_supplies_target_and_prefix() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("parts.html"), PAGE).unwrap();
    fs::write(
        dir.path().join("snippetor.toml"),
        r#"[target]
classes = ["card"]
file = "parts.html"

[snippets]
prefix = "site"
output = "snippets/parts.json"
"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("snippetor");
    cmd.arg("--workspace").arg(dir.path().as_os_str());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Registered 2 snippets to snippets/parts.json"));

    let snippets = read_snippets(&dir.path().join("snippets/parts.json"));
    assert!(snippets.get("site:card-01--featured").is_some());
    assert!(snippets.get("site:card-02").is_some());
}

#[test]
fn explicit_config_path_is_layered_last() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("index.html"), PAGE).unwrap();
    let config_path = dir.path().join("custom.toml");
    fs::write(
        &config_path,
        "[target]\nselector = \".card\"\n[render]\nmode = \"verbatim\"\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("snippetor");
    cmd.arg("extract")
        .arg("--workspace")
        .arg(dir.path().as_os_str())
        .arg("--config")
        .arg(config_path.as_os_str())
        .arg("--stdout");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["card-02"]["body"], "Plain");
}

#[test]
fn no_escape_leaves_variables_alone() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("index.html"), PAGE).unwrap();

    let mut cmd = cargo_bin_cmd!("snippetor");
    cmd.arg("extract")
        .arg("--workspace")
        .arg(dir.path().as_os_str())
        .arg("--class")
        .arg("card--featured")
        .arg("--no-escape")
        .arg("--stdout");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("<?php echo $title; ?>"));
}

#[test]
fn missing_selector_is_an_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("index.html"), PAGE).unwrap();

    let mut cmd = cargo_bin_cmd!("snippetor");
    cmd.arg("--workspace").arg(dir.path().as_os_str());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No target selector configured"));
    assert!(!dir.path().join(".vscode").exists());
}

#[test]
fn unreadable_target_file_is_reported() {
    let dir = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("snippetor");
    cmd.arg("--workspace")
        .arg(dir.path().as_os_str())
        .arg("--class")
        .arg("card")
        .arg("--file")
        .arg("missing.html");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error reading file"))
        .stderr(predicate::str::contains("missing.html"));
    assert!(!dir.path().join(".vscode").exists());
}

#[test]
fn invalid_selector_is_reported() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("index.html"), PAGE).unwrap();

    let mut cmd = cargo_bin_cmd!("snippetor");
    cmd.arg("--workspace")
        .arg(dir.path().as_os_str())
        .arg("--selector")
        .arg("div >");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid selector"));
}

#[test]
fn workspace_must_be_a_directory() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("index.html");
    fs::write(&file, PAGE).unwrap();

    let mut cmd = cargo_bin_cmd!("snippetor");
    cmd.arg("--workspace")
        .arg(file.as_os_str())
        .arg("--class")
        .arg("card");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn no_matches_writes_an_empty_table() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("index.html"), PAGE).unwrap();

    let mut cmd = cargo_bin_cmd!("snippetor");
    cmd.arg("--workspace")
        .arg(dir.path().as_os_str())
        .arg("--selector")
        .arg(".nonexistent");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Registered 0 snippets"));
    let text = fs::read_to_string(dir.path().join(".vscode/html.code-snippets")).unwrap();
    assert_eq!(text.trim(), "{}");
}
