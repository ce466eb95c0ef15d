// src/main.rs
use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2post::config::{log_file_path, CommandLineInput, ServiceConfig};
use notion2post::{create_router, AnthropicClient, AppState, NotionHttpClient};
use std::path::Path;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool, log_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}"
    } else {
        "{d(%H:%M:%S)} [{l}] {m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(log_file)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose, &log_file_path(&cli))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let config = ServiceConfig::resolve(&cli).context("Invalid configuration")?;
    log::info!(
        "Notion key {}, Anthropic key {}",
        config.notion_api_key,
        config.anthropic_api_key
    );
    if let Some(database_id) = &config.database_id {
        log::info!("Content database: {}", database_id.to_hyphenated());
    }

    let store = Arc::new(NotionHttpClient::new(&config.notion_api_key)?);
    let generator = Arc::new(AnthropicClient::new(&config.anthropic_api_key)?);
    let state = AppState::new(store, generator, config.database_id.clone())?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind HTTP server on {}", config.bind))?;
    log::info!("Listening on http://{}", config.bind);

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}
