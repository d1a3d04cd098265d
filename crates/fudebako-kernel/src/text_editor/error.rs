//! Error types for the text editor.
//!
//! Messages are written for the model on the other end of the tool call:
//! each one says what went wrong and, where there is one, what to do next.

use std::io;

use thiserror::Error;

/// Errors returned by [`EditEngine`](super::EditEngine) handlers.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The path does not exist.
    #[error("The path '{0}' does not exist. Use the `write` command to create a new file.")]
    NotFound(String),

    /// The path is a directory, not a regular file.
    #[error("The path '{0}' is a directory, not a file.")]
    IsDirectory(String),

    /// The path exists but is a FIFO, socket, or device.
    #[error("The path '{0}' is not a regular file.")]
    NotRegularFile(String),

    /// `str_replace` needs text, and the file does not decode as UTF-8.
    #[error("The file '{0}' is not valid UTF-8 text. Use the `write` command to replace it whole.")]
    NotUtf8(String),

    /// File exceeds the byte limit.
    #[error(
        "File '{path}' is too large ({:.2}KB). Maximum size is {}KB to prevent memory issues.",
        kib(.bytes),
        .limit / 1024
    )]
    TooLarge {
        path: String,
        bytes: u64,
        limit: u64,
    },

    /// File exceeds the character limit.
    #[error("File '{path}' has too many characters ({chars}). Maximum character count is {limit}.")]
    TooManyCharacters {
        path: String,
        chars: usize,
        limit: usize,
    },

    /// `old_str` does not occur in the file.
    #[error(
        "'old_str' must appear exactly once in '{path}', but it does not appear at all. \
         Make sure the string exactly matches existing file content, including whitespace!\n\
         old_str:\n{old_str}"
    )]
    NoMatch { path: String, old_str: String },

    /// `old_str` occurs more than once in the file.
    #[error(
        "'old_str' must appear exactly once in '{path}', but it appears {count} times. \
         Include enough surrounding context to make the match unique."
    )]
    AmbiguousMatch { path: String, count: usize },

    /// Undo requested with nothing to undo.
    #[error("No edit history found for file '{0}'")]
    NoHistory(String),

    /// Unrecognized command name.
    #[error("invalid command: {0}. Allowed options are: view, write, str_replace, undo_edit")]
    InvalidCommand(String),

    /// A field the command needs was absent (or empty where that is meaningless).
    #[error("the `{command}` command requires a non-empty `{param}` parameter")]
    MissingParameter {
        command: &'static str,
        param: &'static str,
    },

    /// Underlying filesystem failure.
    #[error("Failed to {op} '{path}': {source}")]
    Io {
        op: &'static str,
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Fieldless view of [`EditorError`] for callers that branch on category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    IsDirectory,
    NotRegularFile,
    NotUtf8,
    TooLarge,
    TooManyCharacters,
    NoMatch,
    AmbiguousMatch,
    NoHistory,
    InvalidCommand,
    MissingParameter,
    Io,
}

impl EditorError {
    /// Create an Io error for a failed `op` ("read", "write", ...) on `path`.
    pub fn io(op: &'static str, path: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Create a MissingParameter error.
    pub fn missing(command: &'static str, param: &'static str) -> Self {
        Self::MissingParameter { command, param }
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::IsDirectory(_) => ErrorKind::IsDirectory,
            Self::NotRegularFile(_) => ErrorKind::NotRegularFile,
            Self::NotUtf8(_) => ErrorKind::NotUtf8,
            Self::TooLarge { .. } => ErrorKind::TooLarge,
            Self::TooManyCharacters { .. } => ErrorKind::TooManyCharacters,
            Self::NoMatch { .. } => ErrorKind::NoMatch,
            Self::AmbiguousMatch { .. } => ErrorKind::AmbiguousMatch,
            Self::NoHistory(_) => ErrorKind::NoHistory,
            Self::InvalidCommand(_) => ErrorKind::InvalidCommand,
            Self::MissingParameter { .. } => ErrorKind::MissingParameter,
            Self::Io { .. } => ErrorKind::Io,
        }
    }
}

fn kib(bytes: &u64) -> f64 {
    *bytes as f64 / 1024.0
}

/// Result type for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;
