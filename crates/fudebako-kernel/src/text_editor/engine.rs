//! EditEngine — dispatch for the `text_editor` tool.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::EditorConfig;
use crate::tools::{ExecResult, ExecutionEngine};

use super::error::{EditorError, Result};
use super::guard::{SizeGuard, stat_regular};
use super::history::HistoryStore;
use super::replace::ReplaceEngine;
use super::snippet::{SnippetBuilder, fence, language_tag};
use super::types::{Command, EditRequest, EditResponse};

/// Capability description surfaced to the model.
pub const TOOL_DESCRIPTION: &str = "\
Perform text editing operations on files.

The `command` parameter specifies the operation to perform. Allowed options are:
    - `view`: View the content of a file.
    - `write`: Create or overwrite a file with the given content.
    - `str_replace`: Replace a string in a file with a new string.
    - `undo_edit`: Undo the last edit made to a file.

To use the write command, you must specify `file_text` which will become the new content of the file. Be careful with
existing files! This is a full overwrite, not a patch, so you must include everything - not just the sections you are modifying.

To use the str_replace command, you must specify both `old_str` and `new_str` - the `old_str` needs to exactly match one
unique section of the original file, including any whitespace. Make sure to include enough context that the match is not
ambiguous. The entire original string will be replaced with `new_str`.

undo_edit reverts the most recent write or str_replace on a path, one step per call.";

/// File editor with per-path undo history.
///
/// Cheap to clone; clones share one history.
#[derive(Debug, Clone)]
pub struct EditEngine {
    history: Arc<HistoryStore>,
    guard: SizeGuard,
    snippets: SnippetBuilder,
}

impl EditEngine {
    pub fn new(config: &EditorConfig) -> Self {
        Self::with_history(config, Arc::new(HistoryStore::new()))
    }

    /// Build an engine over an existing history store.
    pub fn with_history(config: &EditorConfig, history: Arc<HistoryStore>) -> Self {
        Self {
            history,
            guard: SizeGuard::from_config(config),
            snippets: SnippetBuilder::new(config.snippet_context_lines),
        }
    }

    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    /// Run one request. Blocks on filesystem I/O.
    pub fn edit(&self, request: &EditRequest) -> Result<EditResponse> {
        let command = Command::from_str(&request.command)
            .ok_or_else(|| EditorError::InvalidCommand(request.command.clone()))?;
        let path = Path::new(&request.path);

        match command {
            Command::View => self.view(path),
            Command::Write => {
                let text = request
                    .file_text
                    .as_deref()
                    .ok_or_else(|| EditorError::missing("write", "file_text"))?;
                self.write(path, text)
            }
            Command::StrReplace => {
                let old = request
                    .old_str
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| EditorError::missing("str_replace", "old_str"))?;
                let new = request
                    .new_str
                    .as_deref()
                    .ok_or_else(|| EditorError::missing("str_replace", "new_str"))?;
                self.str_replace(path, old, new)
            }
            Command::UndoEdit => self.undo_edit(path),
        }
    }

    #[tracing::instrument(skip(self), name = "text_editor.view")]
    fn view(&self, path: &Path) -> Result<EditResponse> {
        // A tracked path may have a mutation in flight; read under its lock so
        // the write is never seen half-done. Untracked paths get no slot.
        let content = match self.history.with_existing(path, |_| self.guard.load(path)) {
            Some(loaded) => loaded?,
            None => self.guard.load(path)?,
        };
        Ok(EditResponse {
            file_text: Some(fence(&language_tag(path), &content)),
            message: None,
        })
    }

    #[tracing::instrument(skip(self, text), fields(bytes = text.len()), name = "text_editor.write")]
    fn write(&self, path: &Path, text: &str) -> Result<EditResponse> {
        let shown = path.display().to_string();

        self.history.with_stack(path, |stack| -> Result<()> {
            let prior = match std::fs::metadata(path) {
                Ok(meta) if meta.is_file() => Some(
                    std::fs::read(path)
                        .map_err(|e| EditorError::io("read existing file", &shown, e))?,
                ),
                Ok(meta) if meta.is_dir() => return Err(EditorError::IsDirectory(shown.clone())),
                Ok(_) => return Err(EditorError::NotRegularFile(shown.clone())),
                Err(_) => None,
            };

            let pushed = prior.is_some();
            if let Some(prior) = prior {
                stack.push(prior);
            }

            if let Err(e) = std::fs::write(path, text) {
                if pushed {
                    stack.pop();
                    tracing::warn!(path = %shown, error = %e, "write failed, history entry rolled back");
                }
                return Err(EditorError::io("write", &shown, e));
            }

            if pushed {
                tracing::debug!(path = %shown, depth = stack.len(), "recorded prior content");
            }
            Ok(())
        })?;

        Ok(EditResponse {
            file_text: Some(text.to_string()),
            message: Some(format!("File '{shown}' has been written successfully.")),
        })
    }

    #[tracing::instrument(skip(self, old, new), name = "text_editor.str_replace")]
    fn str_replace(&self, path: &Path, old: &str, new: &str) -> Result<EditResponse> {
        let shown = path.display().to_string();

        let replacement = self.history.with_stack(path, |stack| -> Result<_> {
            stat_regular(path)?;
            let bytes =
                std::fs::read(path).map_err(|e| EditorError::io("read", &shown, e))?;
            let content =
                String::from_utf8(bytes).map_err(|_| EditorError::NotUtf8(shown.clone()))?;

            let replacement = ReplaceEngine::replace_unique(path, &content, old, new)?;

            stack.push(content.into_bytes());
            if let Err(e) = std::fs::write(path, &replacement.content) {
                stack.pop();
                tracing::warn!(path = %shown, error = %e, "write failed, history entry rolled back");
                return Err(EditorError::io("write", &shown, e));
            }
            tracing::debug!(path = %shown, depth = stack.len(), line = replacement.start_line, "replaced");
            Ok(replacement)
        })?;

        let snippet = self.snippets.render(
            &replacement.content,
            replacement.start_line,
            replacement.added_lines,
            &language_tag(path),
        );

        Ok(EditResponse {
            file_text: None,
            message: Some(format!(
                "The file {shown} has been edited, and the section now reads:\n{snippet}\n\
                 Review the changes above for errors. Undo and edit the file again if necessary!"
            )),
        })
    }

    #[tracing::instrument(skip(self), name = "text_editor.undo_edit")]
    fn undo_edit(&self, path: &Path) -> Result<EditResponse> {
        let shown = path.display().to_string();

        self.history
            .with_existing(path, |stack| -> Result<()> {
                let Some(prior) = stack.last() else {
                    return Err(EditorError::NoHistory(shown.clone()));
                };
                std::fs::write(path, prior).map_err(|e| EditorError::io("write", &shown, e))?;
                stack.pop();
                tracing::debug!(path = %shown, depth = stack.len(), "undid edit");
                Ok(())
            })
            .unwrap_or_else(|| Err(EditorError::NoHistory(shown.clone())))?;

        Ok(EditResponse {
            file_text: None,
            message: Some(format!("The last edit to file '{shown}' has been undone.")),
        })
    }
}

impl Default for EditEngine {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

#[async_trait]
impl ExecutionEngine for EditEngine {
    fn name(&self) -> &str {
        "text_editor"
    }

    fn description(&self) -> &str {
        TOOL_DESCRIPTION
    }

    fn schema(&self) -> Option<serde_json::Value> {
        serde_json::to_value(schemars::schema_for!(EditRequest)).ok()
    }

    #[tracing::instrument(skip(self, params), name = "engine.text_editor")]
    async fn execute(&self, params: &str) -> anyhow::Result<ExecResult> {
        let request: EditRequest = match serde_json::from_str(params) {
            Ok(v) => v,
            Err(e) => return Ok(ExecResult::failure(1, format!("Invalid params: {}", e))),
        };

        let engine = self.clone();
        let outcome = tokio::task::spawn_blocking(move || engine.edit(&request)).await?;

        match outcome {
            Ok(response) => Ok(ExecResult::success(serde_json::to_string(&response)?)),
            Err(e) => Ok(ExecResult::failure(1, e.to_string())),
        }
    }

    async fn is_available(&self) -> bool {
        true
    }
}
