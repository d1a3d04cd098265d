//! The `text_editor` tool: view, overwrite, patch, and undo edits to files.
//!
//! Every destructive command records the file's prior content so it can be
//! undone exactly once.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      Model / MCP host / orchestrator    │
//! └────────────────────┬────────────────────┘
//!                      │ EditRequest (JSON params)
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │               EditEngine                │
//! │ (view, write, str_replace, undo_edit)   │
//! └──┬──────────┬──────────────┬─────────┬──┘
//!    ▼          ▼              ▼         ▼
//! SizeGuard  HistoryStore  ReplaceEngine  SnippetBuilder
//!            (per-path
//!             mutex)
//! ```

pub mod engine;
pub mod error;
pub mod guard;
pub mod history;
pub mod replace;
pub mod snippet;
pub mod types;

pub use engine::{EditEngine, TOOL_DESCRIPTION};
pub use error::{EditorError, ErrorKind};
pub use guard::SizeGuard;
pub use history::HistoryStore;
pub use replace::{ReplaceEngine, Replacement};
pub use snippet::SnippetBuilder;
pub use types::{Command, EditRequest, EditResponse};
