// Standalone MCP server binary

use anyhow::{Context, Result};
use clap::Parser;
use hko_weather_core::Dispatcher;
use hko_weather_mcp::tools::{GetWeatherTool, ToolRegistry};
use hko_weather_mcp::{McpConfig, McpServer, Overrides};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "hko-weather-mcp")]
#[command(about = "MCP server for Hong Kong Observatory weather data", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "HKO_WEATHER_CONFIG", default_value = "hko-weather.toml")]
    config: PathBuf,

    /// HKO open data API root
    #[arg(long, env = "HKO_BASE_URL")]
    base_url: Option<String>,

    /// Default response language (en, tc, sc)
    #[arg(short, long, env = "HKO_LANGUAGE")]
    language: Option<String>,

    /// Timeout for a single HKO request, in seconds
    #[arg(long, env = "HKO_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_ansi(false)
        .init();

    let args = Args::parse();

    tracing::info!("HKO Weather MCP Server starting...");

    let config = McpConfig::load(&args.config)?.apply(Overrides {
        base_url: args.base_url,
        language: args.language,
        timeout_secs: args.timeout_secs,
    });

    let dispatcher =
        Arc::new(Dispatcher::new(config.hko).context("Failed to create weather dispatcher")?);

    // Create tool registry
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(GetWeatherTool::new(dispatcher)));

    tracing::info!("Registered {} tools", registry.len());

    // Start MCP server
    let server = McpServer::new(registry);
    server.start().await?;

    Ok(())
}
