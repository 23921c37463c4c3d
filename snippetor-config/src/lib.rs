//! Shared configuration loader for snippetor.
//!
//! `defaults/snippetor.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer the workspace's
//! `snippetor.toml`, an explicit file, and flag overrides on top via [`Loader`] before
//! deserializing into [`SnippetorConfig`].
//!
//! The two ways of naming the target parts (`target.selector` and `target.classes`)
//! are resolved here into the single selector string the engine works with.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use snippetor::{ExtractOptions, NamingOptions, RenderMode, RenderOptions, SigilEscape};
use std::fmt;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/snippetor.default.toml");

/// File name looked up in the workspace root.
pub const WORKSPACE_CONFIG_FILE: &str = "snippetor.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SnippetorConfig {
    pub target: TargetConfig,
    pub snippets: SnippetsConfig,
    pub render: RenderConfig,
}

/// Which file to read and which parts to take from it.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    pub selector: String,
    #[serde(default)]
    pub classes: Vec<String>,
    pub match_all_classes: bool,
    pub file: String,
}

impl TargetConfig {
    /// The selector the engine runs, or `None` when neither front-end is set.
    ///
    /// A non-blank `selector` wins. Otherwise `classes` are folded into `.a.b`
    /// (`match_all_classes`) or `.a, .b`.
    pub fn resolve_selector(&self) -> Option<String> {
        let selector = self.selector.trim();
        if !selector.is_empty() {
            return Some(selector.to_string());
        }

        let classes: Vec<String> = self
            .classes
            .iter()
            .map(|class| class.trim().trim_start_matches('.'))
            .filter(|class| !class.is_empty())
            .map(|class| format!(".{class}"))
            .collect();
        if classes.is_empty() {
            return None;
        }
        let separator = if self.match_all_classes { "" } else { ", " };
        Some(classes.join(separator))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnippetsConfig {
    pub prefix: String,
    pub output: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub mode: RenderMode,
    pub indent: String,
    pub escape_sigils: bool,
    pub sigil: char,
    pub escape: char,
    pub unshield_comments: bool,
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        RenderOptions {
            mode: config.mode,
            indent_unit: config.indent.clone(),
            escape: config.escape_sigils.then_some(SigilEscape {
                sigil: config.sigil,
                escape: config.escape,
            }),
            unshield_comments: config.unshield_comments,
        }
    }
}

impl From<&SnippetsConfig> for NamingOptions {
    fn from(config: &SnippetsConfig) -> Self {
        let prefix = config.prefix.trim();
        NamingOptions {
            prefix: (!prefix.is_empty()).then(|| prefix.to_string()),
            ..NamingOptions::default()
        }
    }
}

/// Preconditions that stop a run before the engine starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    /// Neither `target.selector` nor `target.classes` is set
    MissingSelector,
    /// `target.file` is empty
    MissingTargetFile,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::MissingSelector => {
                write!(f, "No target selector configured (set target.selector or target.classes)")
            }
            ConfigIssue::MissingTargetFile => {
                write!(f, "No target file configured (set target.file)")
            }
        }
    }
}

impl std::error::Error for ConfigIssue {}

impl SnippetorConfig {
    /// Engine options for this configuration.
    pub fn extract_options(&self) -> Result<ExtractOptions, ConfigIssue> {
        let selector = self
            .target
            .resolve_selector()
            .ok_or(ConfigIssue::MissingSelector)?;
        Ok(ExtractOptions::new(selector)
            .with_render(RenderOptions::from(&self.render))
            .with_naming(NamingOptions::from(&self.snippets)))
    }

    /// The markup file to read, relative to the workspace root.
    pub fn target_file(&self) -> Result<&str, ConfigIssue> {
        match self.target.file.trim() {
            "" => Err(ConfigIssue::MissingTargetFile),
            file => Ok(file),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `snippetor.toml` from the workspace root if it exists.
    pub fn with_workspace(self, root: impl AsRef<Path>) -> Self {
        self.with_optional_file(root.as_ref().join(WORKSPACE_CONFIG_FILE))
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<SnippetorConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded default configuration, as TOML text.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SnippetorConfig, ConfigError> {
    Loader::new().build()
}
