//! Request and response types for the `text_editor` tool.

use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

/// The four editor commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    View,
    Write,
    StrReplace,
    UndoEdit,
}

impl Command {
    /// Parse a command name. Exact, case-sensitive match.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::View => "view",
            Command::Write => "write",
            Command::StrReplace => "str_replace",
            Command::UndoEdit => "undo_edit",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single editor invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EditRequest {
    /// The operation to perform. Allowed options are: 'view', 'write', 'str_replace', 'undo_edit'.
    pub command: String,

    /// Absolute path to the file, e.g. '/repo/src/main.rs'.
    pub path: String,

    /// The exact text to replace (str_replace). Must occur exactly once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_str: Option<String>,

    /// The text to put in place of old_str (str_replace).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_str: Option<String>,

    /// The complete new content of the file (write).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_text: Option<String>,
}

impl EditRequest {
    pub fn view(path: impl Into<String>) -> Self {
        Self {
            command: Command::View.to_string(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn write(path: impl Into<String>, file_text: impl Into<String>) -> Self {
        Self {
            command: Command::Write.to_string(),
            path: path.into(),
            file_text: Some(file_text.into()),
            ..Default::default()
        }
    }

    pub fn str_replace(
        path: impl Into<String>,
        old_str: impl Into<String>,
        new_str: impl Into<String>,
    ) -> Self {
        Self {
            command: Command::StrReplace.to_string(),
            path: path.into(),
            old_str: Some(old_str.into()),
            new_str: Some(new_str.into()),
            ..Default::default()
        }
    }

    pub fn undo_edit(path: impl Into<String>) -> Self {
        Self {
            command: Command::UndoEdit.to_string(),
            path: path.into(),
            ..Default::default()
        }
    }
}

/// A successful editor result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EditResponse {
    /// File content: fenced for view, verbatim for write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_text: Option<String>,

    /// Success message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names() {
        for cmd in [Command::View, Command::Write, Command::StrReplace, Command::UndoEdit] {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
            assert_eq!(cmd.as_ref(), cmd.as_str());
        }
        assert_eq!(Command::from_str("insert"), None);
        assert_eq!(Command::from_str("View"), None);
    }

    #[test]
    fn test_request_json_shape() {
        let req: EditRequest = serde_json::from_str(
            r#"{"command":"str_replace","path":"/a.rs","old_str":"x","new_str":"y"}"#,
        )
        .unwrap();
        assert_eq!(req, EditRequest::str_replace("/a.rs", "x", "y"));

        let json = serde_json::to_value(EditRequest::view("/a.rs")).unwrap();
        assert_eq!(json, serde_json::json!({"command": "view", "path": "/a.rs"}));
    }

    #[test]
    fn test_response_skips_absent_fields() {
        let resp = EditResponse {
            file_text: None,
            message: Some("done".into()),
        };
        assert_eq!(serde_json::to_string(&resp).unwrap(), r#"{"message":"done"}"#);
    }
}
