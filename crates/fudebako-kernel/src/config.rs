//! Editor configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file
//! at all) gives the stock limits:
//!
//! ```toml
//! max_file_bytes = 409600       # 400 KiB
//! max_file_chars = 400000
//! snippet_context_lines = 4
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default byte limit for files loaded by `view`.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 400 * 1024;

/// Default character limit for files loaded by `view`.
pub const DEFAULT_MAX_FILE_CHARS: usize = 400_000;

/// Default number of context lines shown around a replacement.
pub const DEFAULT_SNIPPET_CONTEXT_LINES: usize = 4;

/// Limits and presentation settings for the text editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Files larger than this many bytes are refused by `view`.
    pub max_file_bytes: u64,

    /// Files with more characters than this are refused by `view`.
    pub max_file_chars: usize,

    /// Lines of context above and below a `str_replace` edit.
    pub snippet_context_lines: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_file_chars: DEFAULT_MAX_FILE_CHARS,
            snippet_context_lines: DEFAULT_SNIPPET_CONTEXT_LINES,
        }
    }
}

/// Errors loading an [`EditorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl EditorConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Override the byte limit.
    pub fn with_max_file_bytes(mut self, bytes: u64) -> Self {
        self.max_file_bytes = bytes;
        self
    }

    /// Override the character limit.
    pub fn with_max_file_chars(mut self, chars: usize) -> Self {
        self.max_file_chars = chars;
        self
    }

    /// Override the snippet context size.
    pub fn with_snippet_context_lines(mut self, lines: usize) -> Self {
        self.snippet_context_lines = lines;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EditorConfig::from_toml_str("").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.max_file_bytes, 409_600);
        assert_eq!(config.max_file_chars, 400_000);
        assert_eq!(config.snippet_context_lines, 4);
    }

    #[test]
    fn test_partial_config() {
        let config = EditorConfig::from_toml_str("snippet_context_lines = 2\n").unwrap();
        assert_eq!(config.snippet_context_lines, 2);
        assert_eq!(config.max_file_bytes, DEFAULT_MAX_FILE_BYTES);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = EditorConfig::from_toml_str("max_bytes = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fudebako.toml");
        std::fs::write(&path, "max_file_chars = 10\n").unwrap();

        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.max_file_chars, 10);

        let missing = EditorConfig::load(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }
}
