//! ReplaceEngine — exact, single-occurrence string replacement.

use std::path::Path;

use super::error::{EditorError, Result};

/// The outcome of a successful unique replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Full content after the replacement.
    pub content: String,
    /// 0-based line on which the match started in the original content.
    pub start_line: usize,
    /// Newlines introduced by the replacement text.
    pub added_lines: usize,
}

/// Literal substring replacement that insists on exactly one match.
///
/// No pattern syntax: `old` is matched byte-for-byte, case- and
/// whitespace-sensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplaceEngine;

impl ReplaceEngine {
    /// Count non-overlapping occurrences of `needle` in `content`.
    pub fn count(content: &str, needle: &str) -> usize {
        content.match_indices(needle).count()
    }

    /// Replace the sole occurrence of `old` in `content` with `new`.
    ///
    /// Fails with `NoMatch` when `old` is absent and `AmbiguousMatch` when it
    /// occurs more than once. `path` is only used for error messages.
    pub fn replace_unique(path: &Path, content: &str, old: &str, new: &str) -> Result<Replacement> {
        let mut matches = content.match_indices(old).map(|(idx, _)| idx);
        let Some(offset) = matches.next() else {
            return Err(EditorError::NoMatch {
                path: path.display().to_string(),
                old_str: old.to_string(),
            });
        };
        let extra = matches.count();
        if extra > 0 {
            return Err(EditorError::AmbiguousMatch {
                path: path.display().to_string(),
                count: extra + 1,
            });
        }

        let mut replaced = String::with_capacity(content.len() - old.len() + new.len());
        replaced.push_str(&content[..offset]);
        replaced.push_str(new);
        replaced.push_str(&content[offset + old.len()..]);

        Ok(Replacement {
            content: replaced,
            start_line: line_of(content, offset),
            added_lines: new.matches('\n').count(),
        })
    }
}

/// 0-based line number containing byte `offset`.
fn line_of(content: &str, offset: usize) -> usize {
    content.as_bytes()[..offset].iter().filter(|&&b| b == b'\n').count()
}
