/// CLI argument parsing

use clap::{Parser, Subcommand};

// Build timestamp injected at compile time
pub const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP");
pub const VERSION_WITH_BUILD: &str = concat!(env!("CARGO_PKG_VERSION"), " (built: ", env!("BUILD_TIMESTAMP"), ")");

#[derive(Parser)]
#[command(name = "vps-control")]
#[command(author, version = VERSION_WITH_BUILD, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the servers in the catalog
    Servers {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run console commands against a simulated server
    Console {
        /// Server id (see `servers`)
        #[arg(short, long, default_value = "1")]
        server: String,

        /// Commands to run, in order
        #[arg(required = true)]
        commands: Vec<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    View,

    /// Print the configuration file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_runs_tui() {
        let cli = Cli::try_parse_from(["vps-control"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_console_takes_several_commands() {
        let cli = Cli::try_parse_from(["vps-control", "console", "--server", "2", "status", "say hi"]).unwrap();
        match cli.command {
            Some(Commands::Console { server, commands }) => {
                assert_eq!(server, "2");
                assert_eq!(commands, vec!["status", "say hi"]);
            }
            _ => panic!("expected console command"),
        }
    }

    #[test]
    fn test_console_requires_a_command() {
        assert!(Cli::try_parse_from(["vps-control", "console"]).is_err());
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::try_parse_from(["vps-control", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config { command: ConfigCommands::Init { force: true } })
        ));
    }
}
