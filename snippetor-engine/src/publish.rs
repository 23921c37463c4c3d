//! Snippet file publishing.
//!
//! Bridges a finished [`SnippetTable`] and the file an editor reads. The table is
//! encoded completely before anything touches the disk, then written through a
//! temporary file in the target directory and moved into place, so a failed run
//! never leaves a truncated snippet file behind.
//!
//! An empty table is written like any other: it clears snippets from an earlier
//! run that no longer match.

use crate::error::SnippetError;
use crate::snippet::SnippetTable;
use pathdiff::diff_paths;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where editors look for workspace snippets, relative to the workspace root.
pub const DEFAULT_SNIPPET_FILE: &str = ".vscode/html.code-snippets";

/// Specifies where a table goes.
///
/// ```ignore
/// let spec = PublishSpec::new("/path/to/site").with_output_path(".vscode/parts.code-snippets");
/// ```
///
/// Without an output path the JSON is returned in memory.
#[derive(Debug, Clone)]
pub struct PublishSpec {
    pub workspace_root: PathBuf,
    /// Relative paths resolve against the workspace root.
    pub output: Option<PathBuf>,
}

impl PublishSpec {
    pub fn new(workspace_root: impl AsRef<Path>) -> Self {
        Self {
            workspace_root: workspace_root.as_ref().to_path_buf(),
            output: None,
        }
    }

    /// Target the default snippet file of the workspace.
    pub fn to_default_file(self) -> Self {
        self.with_output_path(DEFAULT_SNIPPET_FILE)
    }

    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Absolute location of the output file, if any.
    pub fn resolved_output(&self) -> Option<PathBuf> {
        self.output.as_ref().map(|path| {
            if path.is_absolute() {
                path.clone()
            } else {
                self.workspace_root.join(path)
            }
        })
    }
}

/// The output from a successful publish operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishArtifact {
    /// JSON held in memory (no output path given).
    InMemory(String),
    /// The written file.
    File {
        path: PathBuf,
        /// Path relative to the workspace root, for status messages
        display_path: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    pub artifact: PublishArtifact,
    pub snippet_count: usize,
}

/// Encode the table and write or return it according to `spec`.
pub fn publish(table: &SnippetTable, spec: &PublishSpec) -> Result<PublishResult, SnippetError> {
    let json = table.to_json()?;
    let artifact = match spec.resolved_output() {
        None => PublishArtifact::InMemory(json),
        Some(path) => {
            write_atomically(&path, json.as_bytes())?;
            let display_path = display_relative(&path, &spec.workspace_root);
            log::info!("wrote {} snippet(s) to {display_path}", table.len());
            PublishArtifact::File { path, display_path }
        }
    };
    Ok(PublishResult {
        artifact,
        snippet_count: table.len(),
    })
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), SnippetError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|err| SnippetError::io(&dir, err))?;

    let mut staged = tempfile::NamedTempFile::new_in(&dir).map_err(|err| SnippetError::io(&dir, err))?;
    staged
        .write_all(bytes)
        .map_err(|err| SnippetError::io(path, err))?;
    staged
        .persist(path)
        .map_err(|err| SnippetError::io(path, err.error))?;
    Ok(())
}

fn display_relative(path: &Path, root: &Path) -> String {
    diff_paths(path, root)
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .replace('\\', "/")
}
