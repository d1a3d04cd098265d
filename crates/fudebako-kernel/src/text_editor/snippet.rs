//! SnippetBuilder — fenced, language-tagged views of file content.

use std::path::Path;

/// Renders whole files and bounded line windows as markdown code fences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnippetBuilder {
    context_lines: usize,
}

impl SnippetBuilder {
    pub fn new(context_lines: usize) -> Self {
        Self { context_lines }
    }

    /// Inclusive 0-based line range shown after an edit.
    ///
    /// Starts `context_lines` above `start_line` and ends `context_lines`
    /// below it plus `added_lines`, clamped to `line_count`.
    pub fn window(&self, start_line: usize, added_lines: usize, line_count: usize) -> (usize, usize) {
        let first = start_line.saturating_sub(self.context_lines);
        let last = (start_line + self.context_lines + added_lines).min(line_count.saturating_sub(1));
        (first, last)
    }

    /// Render the window around an edit that begins on `start_line`.
    pub fn render(&self, content: &str, start_line: usize, added_lines: usize, language: &str) -> String {
        let lines: Vec<&str> = content.split('\n').collect();
        let (first, last) = self.window(start_line, added_lines, lines.len());
        let body = if first <= last {
            lines[first..=last].join("\n")
        } else {
            String::new()
        };
        fence(language, &body)
    }
}

impl Default for SnippetBuilder {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SNIPPET_CONTEXT_LINES)
    }
}

/// Wrap `body` in a code fence labeled `language`.
pub fn fence(language: &str, body: &str) -> String {
    format!("```{language}\n{body}\n```")
}

/// Language tag for a path: the text after the last `.` of the file name,
/// lower-cased. Empty when there is no dot.
pub fn language_tag(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> String {
        (0..n).map(|i| format!("line{i}")).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn test_language_tag() {
        assert_eq!(language_tag(Path::new("/src/main.rs")), "rs");
        assert_eq!(language_tag(Path::new("README.MD")), "md");
        assert_eq!(language_tag(Path::new("archive.tar.gz")), "gz");
        assert_eq!(language_tag(Path::new("Makefile")), "");
        assert_eq!(language_tag(Path::new("dir.d/noext")), "");
    }

    #[test]
    fn test_fence() {
        assert_eq!(fence("py", "x = 1"), "```py\nx = 1\n```");
        assert_eq!(fence("", ""), "```\n\n```");
    }

    #[test]
    fn test_window_clamps_at_top() {
        let builder = SnippetBuilder::default();
        assert_eq!(builder.window(2, 0, 20), (0, 6));
    }

    #[test]
    fn test_window_clamps_at_bottom() {
        let builder = SnippetBuilder::default();
        assert_eq!(builder.window(18, 0, 20), (14, 19));
    }

    #[test]
    fn test_window_extends_by_added_lines() {
        let builder = SnippetBuilder::default();
        assert_eq!(builder.window(10, 3, 40), (6, 17));
    }

    #[test]
    fn test_render_middle_of_file() {
        let content = numbered(20);
        let out = SnippetBuilder::default().render(&content, 10, 0, "txt");
        let expected = (6..=14).map(|i| format!("line{i}")).collect::<Vec<_>>().join("\n");
        assert_eq!(out, fence("txt", &expected));
    }

    #[test]
    fn test_render_single_line_file() {
        let out = SnippetBuilder::default().render("only", 0, 0, "");
        assert_eq!(out, "```\nonly\n```");
    }
}
