//! mgnctl - drive AWS Application Migration Service from the command line.
//!
//! This is the main entry point for the mgnctl CLI.

mod cli;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mgnctl::config::Config;
use mgnctl::error::Result;

use cli::commands::CommandContext;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    let config = Config::load(cli.config.as_ref()).unwrap_or_else(|e| {
        eprintln!("Warning: failed to load config: {e}");
        Config::default()
    });

    init_logging(cli.verbosity(), &config.logging.level);

    let exit_code = match run(&cli, config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: &Cli, config: Config) -> Result<i32> {
    let ctx = CommandContext::new(cli, config)?;

    match &cli.command {
        Commands::Server(args) => args.execute(&ctx).await,
        Commands::Launch(args) => args.execute(&ctx).await,
        Commands::Job(args) => args.execute(&ctx).await,
        Commands::Template(args) => args.execute(&ctx).await,
        Commands::Replication(args) => args.execute(&ctx).await,
        Commands::LaunchConfig(args) => args.execute(&ctx).await,
        Commands::InitService(args) => args.execute(&ctx).await,
        Commands::Tags(args) => args.execute(&ctx).await,
        Commands::Profile(args) => args.execute(&ctx).await,
    }
}

/// Initialize logging. Verbosity flags override the configured base level.
fn init_logging(verbosity: u8, configured_level: &str) {
    let filter = match verbosity {
        0 => configured_level,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(verbosity >= 2))
        .with(env_filter)
        .init();
}
