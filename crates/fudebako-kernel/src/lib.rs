//! # fudebako-kernel
//!
//! File editing engine for agent tool calls.
//!
//! The kernel exposes a single tool, `text_editor`, which lets a model view,
//! overwrite, patch, and undo edits to text files. Undo history is kept per
//! path for the life of the process; nothing is persisted.

pub mod config;
pub mod text_editor;
pub mod tools;

pub use config::{ConfigError, EditorConfig};
pub use text_editor::{
    Command, EditEngine, EditRequest, EditResponse, EditorError, ErrorKind, HistoryStore,
    TOOL_DESCRIPTION,
};
pub use tools::{ExecResult, ExecutionEngine};
