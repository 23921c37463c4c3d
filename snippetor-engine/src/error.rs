//! Error types for extraction runs

use std::fmt;

/// Errors that can occur while extracting or publishing snippets
#[derive(Debug, Clone, PartialEq)]
pub enum SnippetError {
    /// The selector was empty or only whitespace
    EmptySelector,
    /// The selector could not be parsed or uses an unsupported construct
    InvalidSelector { selector: String, reason: String },
    /// A matched part could not be rendered back to text
    Serialization(String),
    /// Two snippets resolved to the same name
    DuplicateName(String),
    /// Reading or writing a file failed
    Io { path: String, message: String },
}

impl SnippetError {
    pub(crate) fn invalid_selector(selector: &str, reason: impl Into<String>) -> Self {
        SnippetError::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl AsRef<std::path::Path>, err: impl fmt::Display) -> Self {
        SnippetError::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for SnippetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnippetError::EmptySelector => write!(f, "Selector is empty"),
            SnippetError::InvalidSelector { selector, reason } => {
                write!(f, "Invalid selector '{selector}': {reason}")
            }
            SnippetError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            SnippetError::DuplicateName(name) => write!(f, "Duplicate snippet name '{name}'"),
            SnippetError::Io { path, message } => write!(f, "I/O error on '{path}': {message}"),
        }
    }
}

impl std::error::Error for SnippetError {}
