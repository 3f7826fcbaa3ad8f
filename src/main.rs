use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

use evogate::Gateway;
use evogate::endpoints::{Controller, EndpointCatalog};
use evogate::tools::{Tool, ToolResult};

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("evogate")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("evogate.log");

    // Setup env_logger with file output
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

fn parse_controller(name: Option<&str>) -> Result<Option<Controller>> {
    name.map(|n| Controller::from_str(n).ok_or_else(|| eyre!("Unknown controller: {}", n)))
        .transpose()
}

/// Build the gateway and generate tools from the configured selection.
///
/// Inspection commands never contact the server, so they accept a
/// configuration without an API key.
fn build_gateway(config: &Config, controller: Option<Controller>, offline: bool) -> Result<Gateway> {
    let mut gateway = if offline {
        Gateway::offline(config.server.clone())
    } else {
        Gateway::new(config.server.clone())
    }
    .context("Failed to create gateway")?;
    let mut selection = config.tools.clone();
    if let Some(controller) = controller {
        selection = selection.with_controllers(vec![controller]);
    }
    let count = gateway.generate(selection).context("Failed to generate tools")?;
    info!("Generated {} tools", count);
    Ok(gateway)
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
        println!("  Server: {}", config.server.base_url);
    }

    match &cli.command {
        Commands::Endpoints { controller } => handle_endpoints_command(controller.as_deref()),
        Commands::Tools { controller } => handle_tools_command(controller.as_deref(), config),
        Commands::Search { query } => handle_search_command(query, config),
        Commands::Stats => handle_stats_command(config),
        Commands::Validate => handle_validate_command(config),
        Commands::Call { tool, params } => handle_call_command(tool, params.as_deref(), config).await,
    }
}

fn handle_endpoints_command(controller: Option<&str>) -> Result<()> {
    let controller = parse_controller(controller)?;
    let catalog = EndpointCatalog::standard().context("Endpoint catalog is invalid")?;

    for endpoint in catalog.all().filter(|e| controller.is_none_or(|c| e.controller == c)) {
        println!(
            "{:<32} {:<7} {}",
            endpoint.name.green(),
            endpoint.method.to_string().cyan(),
            endpoint.path
        );
        println!("    {}", endpoint.description.dimmed());
    }
    Ok(())
}

fn print_tool(tool: &Tool) {
    println!(
        "{:<42} {:<9} {}",
        tool.name.green(),
        tool.controller.to_string().cyan(),
        tool.description
    );
}

fn handle_tools_command(controller: Option<&str>, config: &Config) -> Result<()> {
    let controller = parse_controller(controller)?;
    let gateway = build_gateway(config, controller, true)?;

    for tool in gateway.registry().list() {
        print_tool(tool);
    }
    println!("{} {}", "Total:".bold(), gateway.registry().len());
    Ok(())
}

fn handle_search_command(query: &str, config: &Config) -> Result<()> {
    let gateway = build_gateway(config, None, true)?;
    let matches = gateway.registry().search(query);

    if matches.is_empty() {
        println!("{} {}", "No tools match".yellow(), query);
    }
    for tool in matches {
        print_tool(tool);
    }
    Ok(())
}

fn handle_stats_command(config: &Config) -> Result<()> {
    let gateway = build_gateway(config, None, true)?;
    let stats = gateway.generator().stats();

    println!("{:<10} {:>9} {:>10}", "controller".bold(), "available".bold(), "registered".bold());
    for entry in &stats.controllers {
        println!("{:<10} {:>9} {:>10}", entry.controller.to_string(), entry.available, entry.registered);
    }
    println!("{:<10} {:>9} {:>10}", "total".bold(), stats.total_available, stats.total_registered);
    Ok(())
}

fn handle_validate_command(config: &Config) -> Result<()> {
    let gateway = build_gateway(config, None, true)?;
    let report = gateway.generator().validate();

    if report.valid {
        println!("{} {} tools", "Valid:".green(), gateway.registry().len());
        return Ok(());
    }
    for violation in &report.violations {
        println!("  {} {}", "-".red(), violation);
    }
    Err(eyre!("{} validation violation(s)", report.violations.len()))
}

async fn handle_call_command(tool: &str, params: Option<&str>, config: &Config) -> Result<()> {
    let params: Value = match params {
        Some(raw) => serde_json::from_str(raw).context("Failed to parse --params as JSON")?,
        None => Value::Object(Default::default()),
    };

    let gateway = build_gateway(config, None, false)?;
    info!("Calling tool {}", tool);
    let result = gateway.call(tool, params).await?;

    let rendered = serde_json::to_string_pretty(&result).context("Failed to render result")?;
    match result {
        ToolResult::Success(_) => println!("{}", rendered),
        ToolResult::Error(_) => println!("{}", rendered.red()),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
