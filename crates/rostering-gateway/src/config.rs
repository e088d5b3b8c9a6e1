//! Gateway configuration.

use std::path::PathBuf;

use clap::Parser;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server bind address.
    pub bind_addr: String,

    /// Base URL of the completion provider (without `/chat/completions`).
    pub api_base: String,

    /// Environment variable holding the provider API key.
    pub api_key_env: String,

    /// Model identifier sent with every completion request.
    pub model: String,

    /// Sampling temperature sent with every completion request.
    pub temperature: f32,

    /// Roster workbook (JSON) embedded into the system prompt.
    pub roster_path: PathBuf,

    /// Rows per sheet included in the prompt preview.
    pub preview_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            roster_path: PathBuf::from("data/sample-roster.json"),
            preview_rows: 5,
        }
    }
}

/// Rostering copilot chat gateway.
#[derive(Parser, Debug)]
#[command(name = "rostering-gateway", about = "Rostering copilot chat gateway")]
pub struct Args {
    /// HTTP server address
    #[arg(long, default_value = "127.0.0.1:3000")]
    pub http_addr: String,

    /// Completion provider base URL
    #[arg(long, default_value = "https://api.openai.com/v1")]
    pub api_base: String,

    /// Environment variable holding the provider API key
    #[arg(long, default_value = "OPENAI_API_KEY")]
    pub api_key_env: String,

    /// Model identifier
    #[arg(long, default_value = "gpt-4o-mini")]
    pub model: String,

    /// Sampling temperature
    #[arg(long, default_value = "0.7")]
    pub temperature: f32,

    /// Path to the roster workbook (JSON)
    #[arg(long, default_value = "data/sample-roster.json")]
    pub roster: PathBuf,

    /// Roster rows per sheet included in the system prompt
    #[arg(long, default_value = "5")]
    pub preview_rows: usize,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            bind_addr: args.http_addr,
            api_base: args.api_base,
            api_key_env: args.api_key_env,
            model: args.model,
            temperature: args.temperature,
            roster_path: args.roster,
            preview_rows: args.preview_rows,
        }
    }
}
