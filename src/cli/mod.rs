//! Command-line interface for mgnctl.
//!
//! Argument parsing, configuration merging, and subcommand handling live
//! here; all service semantics stay in the library crate.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// mgnctl - a typed CLI for AWS Application Migration Service
#[derive(Parser, Debug, Clone)]
#[command(name = "mgnctl")]
#[command(version)]
#[command(about = "Drive AWS Application Migration Service from the command line", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// AWS region for service calls
    #[arg(short = 'r', long, global = true)]
    pub region: Option<String>,

    /// Credential profile name
    #[arg(short = 'p', long, global = true)]
    pub profile: Option<String>,

    /// Shared credentials file to use instead of the OS keychain
    #[arg(long, global = true)]
    pub profiles_location: Option<PathBuf>,

    /// Endpoint URL override (testing/private endpoints)
    #[arg(long, global = true)]
    pub endpoint_url: Option<String>,

    /// Response projection: empty for the operation default, '*' for the
    /// whole response, or a dotted property path like 'job.participating_servers[0]'
    #[arg(short = 's', long, global = true)]
    pub select: Option<String>,

    /// Output format
    #[arg(long, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Disable the progress spinner
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true, env = "MGNCTL_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON output for scripting
    Json,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Source server inventory operations
    Server(commands::server::ServerArgs),

    /// Test and cutover launches
    Launch(commands::launch::LaunchArgs),

    /// Migration job inspection
    Job(commands::job::JobArgs),

    /// Replication configuration templates
    Template(commands::template::TemplateArgs),

    /// Per-server replication configuration
    Replication(commands::replication::ReplicationArgs),

    /// Per-server launch configuration
    #[command(name = "launch-config")]
    LaunchConfig(commands::launch_config::LaunchConfigArgs),

    /// Initialize the service in the current account and region
    #[command(name = "init-service")]
    InitService(commands::admin::InitServiceArgs),

    /// Resource tagging
    Tags(commands::admin::TagsArgs),

    /// Manage stored credential profiles
    Profile(commands::profile::ProfileArgs),
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Get the effective verbosity level (0-3)
    pub fn verbosity(&self) -> u8 {
        self.verbose.min(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["mgnctl", "server", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::Server(_)));
    }

    #[test]
    fn test_globals_anywhere() {
        let cli = Cli::try_parse_from([
            "mgnctl",
            "server",
            "list",
            "--region",
            "eu-west-1",
            "-s",
            "items[0].hostname",
        ])
        .unwrap();
        assert_eq!(cli.region.as_deref(), Some("eu-west-1"));
        assert_eq!(cli.select.as_deref(), Some("items[0].hostname"));
    }

    #[test]
    fn test_verbosity() {
        let cli = Cli::try_parse_from(["mgnctl", "-vvvv", "job", "list"]).unwrap();
        assert_eq!(cli.verbosity(), 3);
    }

    #[test]
    fn test_output_format() {
        let cli = Cli::try_parse_from(["mgnctl", "--output", "json", "job", "list"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }
}
