//! MCP server exposing the fudebako text editor.
//!
//! Registers a single tool, `text_editor`, backed by one shared
//! [`EditEngine`]. Undo history lives as long as the server process.

use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use fudebako_kernel::{EditEngine, EditRequest, EditorConfig};

/// MCP server wrapping an [`EditEngine`].
#[derive(Clone)]
pub struct FudebakoMcp {
    engine: EditEngine,
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for FudebakoMcp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FudebakoMcp")
            .field("engine", &self.engine)
            .field("tool_router", &self.tool_router)
            .finish()
    }
}

impl FudebakoMcp {
    /// Create a server with a fresh history.
    pub fn new(config: &EditorConfig) -> Self {
        Self::with_engine(EditEngine::new(config))
    }

    /// Create a server around an existing engine (shares its history).
    pub fn with_engine(engine: EditEngine) -> Self {
        Self {
            engine,
            tool_router: Self::tool_router(),
        }
    }

    pub fn engine(&self) -> &EditEngine {
        &self.engine
    }
}

/// Render an error the way every tool result reports failure.
fn error_json(message: impl std::fmt::Display) -> String {
    serde_json::json!({ "error": message.to_string() }).to_string()
}

#[tool_router]
impl FudebakoMcp {
    // rmcp's `#[tool]` only accepts a string literal here; this must stay
    // identical to `fudebako_kernel::TOOL_DESCRIPTION` (checked by a test).
    #[tool(description = "\
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

undo_edit reverts the most recent write or str_replace on a path, one step per call.")]
    async fn text_editor(&self, Parameters(req): Parameters<EditRequest>) -> String {
        let engine = self.engine.clone();
        let command = req.command.clone();
        let path = req.path.clone();

        match tokio::task::spawn_blocking(move || engine.edit(&req)).await {
            Ok(Ok(response)) => match serde_json::to_string(&response) {
                Ok(json) => json,
                Err(e) => error_json(e),
            },
            Ok(Err(e)) => {
                tracing::info!(%command, %path, error = %e, "text_editor call refused");
                error_json(e)
            }
            Err(e) => {
                tracing::error!(%command, %path, "text_editor task failed: {e}");
                error_json(format!("editor task failed: {e}"))
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for FudebakoMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build()).with_instructions(
            "fudebako text editor. Use the text_editor tool to view, write, str_replace, and undo_edit files. Every write and str_replace can be undone one step at a time.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mcp() -> FudebakoMcp {
        FudebakoMcp::new(&EditorConfig::default())
    }

    fn path_str(p: &std::path::Path) -> String {
        p.to_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_write_and_view() {
        let dir = tempfile::tempdir().unwrap();
        let path = path_str(&dir.path().join("hello.py"));
        let mcp = mcp();

        let result = mcp
            .text_editor(Parameters(EditRequest::write(&path, "print('hi')")))
            .await;
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["file_text"], "print('hi')");
        assert!(parsed["message"].as_str().unwrap().contains("written successfully"));

        let result = mcp.text_editor(Parameters(EditRequest::view(&path))).await;
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["file_text"], "```py\nprint('hi')\n```");
        assert!(parsed.get("message").is_none());
    }

    #[tokio::test]
    async fn test_replace_then_undo() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("lib.rs");
        std::fs::write(&file, "pub fn answer() -> u32 { 41 }\n").unwrap();
        let path = path_str(&file);
        let mcp = mcp();

        let result = mcp
            .text_editor(Parameters(EditRequest::str_replace(&path, "41", "42")))
            .await;
        assert!(result.contains("has been edited"), "{result}");
        assert_eq!(
            std::fs::read_to_string(&file).unwrap(),
            "pub fn answer() -> u32 { 42 }\n"
        );

        let result = mcp.text_editor(Parameters(EditRequest::undo_edit(&path))).await;
        assert!(result.contains("undone"), "{result}");
        assert_eq!(
            std::fs::read_to_string(&file).unwrap(),
            "pub fn answer() -> u32 { 41 }\n"
        );
    }

    #[tokio::test]
    async fn test_errors_are_reported_as_json() {
        let mcp = mcp();

        let result = mcp
            .text_editor(Parameters(EditRequest {
                command: "delete".into(),
                path: "/tmp/x".into(),
                ..Default::default()
            }))
            .await;
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert!(parsed["error"].as_str().unwrap().contains("invalid command: delete"));

        let result = mcp
            .text_editor(Parameters(EditRequest::undo_edit("/no/such/file")))
            .await;
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert!(parsed["error"].as_str().unwrap().contains("No edit history"));
    }

    #[tokio::test]
    async fn test_shared_engine_history() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        let path = path_str(&file);
        let engine = EditEngine::default();
        let mcp = FudebakoMcp::with_engine(engine.clone());

        mcp.text_editor(Parameters(EditRequest::write(&path, "one"))).await;
        mcp.text_editor(Parameters(EditRequest::write(&path, "two"))).await;
        assert_eq!(engine.history().depth(&file), 1);
    }

    #[test]
    fn test_tool_uses_kernel_description() {
        let tools = mcp().tool_router.list_all();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "text_editor");
        assert_eq!(
            tools[0].description.as_deref(),
            Some(fudebako_kernel::TOOL_DESCRIPTION)
        );
    }

    #[test]
    fn test_server_info() {
        let info = mcp().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("text_editor"));
    }
}
