use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

mod cli;

use cli::Cli;
use cli::commands::Commands;
use mcp_router::config::Config;
use mcp_router::console::{print_catalog, print_envelope, run_interactive, spawn_line_reader};
use mcp_router::llm::{LlmClient, OpenAiClient};
use mcp_router::orchestrator::RequestOrchestrator;
use mcp_router::provider::McpStdioProvider;
use mcp_router::routing::{RoutingModel, Sampling};
use mcp_router::session::Session;
use mcp_router::tools::ToolExecutor;

type Orchestrator = RequestOrchestrator<OpenAiClient, McpStdioProvider>;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(env!("CARGO_PKG_NAME"))
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join(format!("{}.log", env!("CARGO_PKG_NAME")));

    // Stdout belongs to the console, so logs go to a file
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn open_session(config: &Config) -> Result<Session<McpStdioProvider>> {
    let provider = McpStdioProvider::connect(&config.provider)
        .await
        .context("Failed to start MCP server")?;
    if let Some(server) = provider.server_info() {
        info!("Server: {:?} {:?}", server.name, server.version);
    }
    Session::open(provider).await.context("Failed to fetch tool catalog")
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    config.load_env_file().context("Failed to load environment file")?;

    if let Some(Commands::Tools) = &cli.command {
        return handle_tools_command(config).await;
    }

    let api_key = config.llm.resolve_api_key().context("Missing LLM credentials")?;
    let llm = OpenAiClient::from_config(&config.llm, api_key).context("Failed to create LLM client")?;
    info!("Using model {} at {}", llm.model(), config.llm.api_url);

    println!("{}", "Starting MCP server...".cyan());
    let session = open_session(config).await?;

    let router = RoutingModel::new(Arc::new(llm)).with_sampling(Sampling::from(&config.llm));
    let executor = ToolExecutor::new().with_validation(config.routing.validate_tool_names);
    let orchestrator = RequestOrchestrator::new(router, executor, session);

    let outcome = match cli.command.as_ref().and_then(Commands::ask_text) {
        Some(text) => handle_ask_command(&orchestrator, &text).await,
        None => run_console(&orchestrator).await,
    };

    orchestrator.shutdown().await.context("Failed to close MCP server")?;
    outcome
}

async fn run_console(orchestrator: &Orchestrator) -> Result<()> {
    info!("Launching interactive console");
    let mut lines =
        spawn_line_reader(std::io::BufReader::new(std::io::stdin())).context("Failed to read console input")?;
    let mut stdout = std::io::stdout();

    tokio::select! {
        result = run_interactive(orchestrator, &mut lines, &mut stdout) => {
            result.context("Console failed")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
            println!("\n{}", "Interrupted".yellow());
        }
    }
    Ok(())
}

async fn handle_ask_command(orchestrator: &Orchestrator, text: &str) -> Result<()> {
    info!("Answering single request");
    let mut stdout = std::io::stdout();

    tokio::select! {
        envelope = orchestrator.process(text) => {
            print_envelope(&mut stdout, &envelope).context("Failed to print result")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
            println!("\n{}", "Interrupted".yellow());
        }
    }
    Ok(())
}

async fn handle_tools_command(config: &Config) -> Result<()> {
    info!("Listing tools");
    let session = open_session(config).await?;
    print_catalog(&mut std::io::stdout(), session.catalog()).context("Failed to print catalog")?;
    session.close().await.context("Failed to close MCP server")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.apply_overrides(cli.env_file.clone(), cli.server.clone(), cli.model.clone());

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
