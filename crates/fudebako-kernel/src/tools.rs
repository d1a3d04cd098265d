//! Tool execution seam.
//!
//! An orchestrator hands an engine its raw JSON parameters and gets back an
//! [`ExecResult`]. Engine-level failures (bad params, a refused edit) are
//! reported inside the result; `Err` is reserved for infrastructure faults.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of executing a tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecResult {
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
    /// Exit code (0 = success).
    pub exit_code: i32,
    /// Whether execution succeeded.
    pub success: bool,
}

impl ExecResult {
    /// Create a successful result.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: 0,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code,
            success: false,
        }
    }
}

/// Trait for tool engines driven by JSON parameters.
#[async_trait]
pub trait ExecutionEngine: Send + Sync {
    /// Get the engine name.
    fn name(&self) -> &str;

    /// Get the engine description.
    fn description(&self) -> &str;

    /// Execute a call with JSON-encoded parameters.
    async fn execute(&self, params: &str) -> anyhow::Result<ExecResult>;

    /// Check if this engine is available/ready.
    async fn is_available(&self) -> bool;

    /// Get the JSON Schema for tool input parameters.
    fn schema(&self) -> Option<serde_json::Value> {
        None
    }
}
