//! SizeGuard — refuse files too big to load into a tool response.

use std::fs::Metadata;
use std::path::Path;

use super::error::{EditorError, Result};
use crate::config::EditorConfig;

/// Byte and character limits applied before a file is handed to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeGuard {
    max_bytes: u64,
    max_chars: usize,
}

impl SizeGuard {
    pub fn new(max_bytes: u64, max_chars: usize) -> Self {
        Self {
            max_bytes,
            max_chars,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.max_file_bytes, config.max_file_chars)
    }

    /// Check the on-disk size. Runs before the file is read.
    pub fn check_bytes(&self, path: &Path, meta: &Metadata) -> Result<()> {
        let bytes = meta.len();
        if bytes > self.max_bytes {
            return Err(EditorError::TooLarge {
                path: path.display().to_string(),
                bytes,
                limit: self.max_bytes,
            });
        }
        Ok(())
    }

    /// Check the decoded character count (Unicode scalar values).
    pub fn check_chars(&self, path: &Path, content: &str) -> Result<()> {
        // Each char is at least one byte, so short content can skip the count.
        if content.len() <= self.max_chars {
            return Ok(());
        }
        let chars = content.chars().count();
        if chars > self.max_chars {
            return Err(EditorError::TooManyCharacters {
                path: path.display().to_string(),
                chars,
                limit: self.max_chars,
            });
        }
        Ok(())
    }

    /// Stat, check, read, check. Returns the file content.
    ///
    /// Bytes that are not UTF-8 are shown as U+FFFD; the file itself is
    /// never modified here.
    pub fn load(&self, path: &Path) -> Result<String> {
        let meta = stat_regular(path)?;
        self.check_bytes(path, &meta)?;

        let bytes = std::fs::read(path)
            .map_err(|e| EditorError::io("read", path.display().to_string(), e))?;
        let content = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        self.check_chars(path, &content)?;
        Ok(content)
    }
}

/// Stat `path` and insist on a regular file.
///
/// FIFOs and devices are refused before anything opens them, since a read
/// could block indefinitely.
pub fn stat_regular(path: &Path) -> Result<Metadata> {
    let display = path.display().to_string();
    let meta = match std::fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(EditorError::NotFound(display));
        }
        Err(e) => return Err(EditorError::io("stat", display, e)),
    };
    if meta.is_dir() {
        return Err(EditorError::IsDirectory(display));
    }
    if !meta.is_file() {
        return Err(EditorError::NotRegularFile(display));
    }
    Ok(meta)
}

impl Default for SizeGuard {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}
