use anyhow::{Context, Result};
use clap::Parser;
use colored::{ColoredString, Colorize};
use tracing::info;

use vps_control::app::App;
use vps_control::cli::{Cli, Commands, ConfigCommands, BUILD_TIMESTAMP};
use vps_control::core::console::{run_headless, LogKind};
use vps_control::core::server::{catalog, find, ServerStatus};
use vps_control::utils::helpers::format_clock;
use vps_control::utils::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    vps_control::init_logging(&config)?;

    match cli.command {
        None => {
            // No command - run interactive TUI
            let mut app = App::new(config);
            app.run().await?;
        }
        Some(Commands::Servers { json }) => {
            handle_servers(json)?;
        }
        Some(Commands::Console { server, commands }) => {
            handle_console(&config, &server, &commands).await?;
        }
        Some(Commands::Config { command }) => {
            handle_config(&config, command)?;
        }
    }

    Ok(())
}

fn status_colored(status: ServerStatus) -> ColoredString {
    let label = format!("{:<13}", status.label());
    match status {
        ServerStatus::Online => label.green(),
        ServerStatus::Offline => label.red(),
        ServerStatus::Starting | ServerStatus::Stopping => label.yellow(),
        ServerStatus::Maintenance => label.blue(),
    }
}

fn handle_servers(json: bool) -> Result<()> {
    let servers = catalog();

    if json {
        let output = serde_json::to_string_pretty(&servers)
            .context("Failed to serialize server catalog")?;
        println!("{}", output);
        return Ok(());
    }

    println!("{}\n", "Game Servers".bold());
    println!("{:<4} {:<22} {:<13} {:<9} {:<22}", "ID", "Name", "Status", "Players", "Address");
    println!("{}", "-".repeat(72));

    for server in &servers {
        println!(
            "{:<4} {:<22} {} {:<9} {:<22}",
            server.id,
            server.name,
            status_colored(server.status),
            server.players.to_string(),
            server.address()
        );
    }

    Ok(())
}

async fn handle_console(config: &AppConfig, server_id: &str, commands: &[String]) -> Result<()> {
    let servers = catalog();
    let server = find(&servers, server_id)
        .with_context(|| format!("No server with id '{}' (see `vps-control servers`)", server_id))?;

    info!(server = %server.name, commands = commands.len(), "Running headless console");
    let console = run_headless(&config.simulation, &server, commands).await?;

    for log in console.logs() {
        let message = match log.kind {
            LogKind::Info => log.message.normal(),
            LogKind::Success => log.message.green(),
            LogKind::Error => log.message.red(),
            LogKind::Command => log.message.cyan().bold(),
        };
        println!("{} {}", format!("[{}]", format_clock(&log.timestamp)).dimmed(), message);
    }

    Ok(())
}

fn handle_config(config: &AppConfig, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::View => {
            println!("# vps-control {} (built {})", env!("CARGO_PKG_VERSION"), BUILD_TIMESTAMP);
            println!("# {}\n", AppConfig::config_path()?.display());
            let contents = toml::to_string_pretty(config)
                .context("Failed to serialize config")?;
            println!("{}", contents);
        }
        ConfigCommands::Path => {
            println!("{}", AppConfig::config_path()?.display());
        }
        ConfigCommands::Init { force } => {
            let path = AppConfig::config_path()?;
            if path.exists() && !force {
                println!("{} {} already exists (use --force to overwrite)", "!".yellow(), path.display());
                return Ok(());
            }
            let written = AppConfig::default().save()?;
            println!("{} Wrote default configuration to {}", "✓".green(), written.display());
        }
    }

    Ok(())
}
