//! fudebako MCP server binary.
//!
//! Exposes the `text_editor` tool to MCP clients over stdio.
//!
//! Usage:
//!   cargo run -p fudebako-mcp
//!   cargo run -p fudebako-mcp -- --config fudebako.toml
//!   cargo run -p fudebako-mcp -- --max-file-bytes 1048576
//!
//! Test with MCP inspector:
//!   npx @modelcontextprotocol/inspector cargo run -p fudebako-mcp

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::{EnvFilter, fmt};

use fudebako_kernel::EditorConfig;
use fudebako_mcp::FudebakoMcp;

/// MCP server for the fudebako text editor.
#[derive(Parser, Debug)]
#[command(name = "fudebako-mcp")]
#[command(about = "MCP server exposing a file editor with undo history")]
struct Args {
    /// TOML config file with editor limits
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Refuse to view files larger than this many bytes
    #[arg(long)]
    max_file_bytes: Option<u64>,

    /// Refuse to view files with more characters than this
    #[arg(long)]
    max_file_chars: Option<usize>,

    /// Context lines shown around a str_replace edit
    #[arg(long)]
    snippet_lines: Option<usize>,
}

impl Args {
    fn editor_config(&self) -> Result<EditorConfig> {
        let mut config = match &self.config {
            Some(path) => EditorConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => EditorConfig::default(),
        };
        if let Some(bytes) = self.max_file_bytes {
            config = config.with_max_file_bytes(bytes);
        }
        if let Some(chars) = self.max_file_chars {
            config = config.with_max_file_chars(chars);
        }
        if let Some(lines) = self.snippet_lines {
            config = config.with_snippet_context_lines(lines);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing to stderr (MCP uses stdio for protocol)
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let args = Args::parse();
    let config = args.editor_config()?;
    tracing::info!(
        max_file_bytes = config.max_file_bytes,
        max_file_chars = config.max_file_chars,
        snippet_context_lines = config.snippet_context_lines,
        "Starting text editor"
    );

    let service = FudebakoMcp::new(&config)
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("MCP server error: {:?}", e);
        })?;

    tracing::info!("fudebako-mcp server ready");

    service.waiting().await?;

    tracing::info!("fudebako-mcp server shutting down");
    Ok(())
}
