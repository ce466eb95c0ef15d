// src/config.rs
use crate::constants::DEFAULT_BIND_ADDRESS;
use crate::error::AppError;
use crate::types::{ApiKey, GenerationApiKey, NotionId};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Address to listen on
    #[arg(short, long, default_value = DEFAULT_BIND_ADDRESS)]
    pub bind: SocketAddr,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Log file path (defaults to notion2post.log in the temp dir)
    #[arg(long)]
    pub log_file: Option<String>,
}

/// Resolved service configuration: CLI flags plus credentials from the environment.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind: SocketAddr,
    pub notion_api_key: ApiKey,
    pub anthropic_api_key: GenerationApiKey,
    pub database_id: Option<NotionId>,
    pub verbose: bool,
}

impl ServiceConfig {
    /// Resolves configuration from CLI input and the process environment.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, AppError> {
        Self::from_lookup(cli, |name| std::env::var(name).ok())
    }

    /// Resolves configuration using `lookup` for environment values.
    pub fn from_lookup<F>(cli: &CommandLineInput, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let notion_api_key = lookup("NOTION_API_KEY").ok_or_else(|| {
            AppError::MissingConfiguration(
                "NOTION_API_KEY environment variable not set".to_string(),
            )
        })?;
        let anthropic_api_key = lookup("ANTHROPIC_API_KEY").ok_or_else(|| {
            AppError::MissingConfiguration(
                "ANTHROPIC_API_KEY environment variable not set".to_string(),
            )
        })?;
        let database_id = lookup("NOTION_DATABASE_ID")
            .filter(|value| !value.trim().is_empty())
            .map(|value| NotionId::parse(&value))
            .transpose()?;

        Ok(ServiceConfig {
            bind: cli.bind,
            notion_api_key: ApiKey::new(notion_api_key)?,
            anthropic_api_key: GenerationApiKey::new(anthropic_api_key)?,
            database_id,
            verbose: cli.verbose,
        })
    }
}

/// Where the log file goes when `--log-file` is not given.
pub fn log_file_path(cli: &CommandLineInput) -> PathBuf {
    cli.log_file
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("notion2post.log"))
}
