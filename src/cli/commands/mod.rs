//! Subcommand implementations for the mgnctl CLI.

pub mod admin;
pub mod job;
pub mod launch;
pub mod launch_config;
pub mod profile;
pub mod replication;
pub mod server;
pub mod template;

use std::future::Future;

use mgnctl::client::{self, ClientSettings, OpContext};
use mgnctl::config::Config;
use mgnctl::error::{Error, Result};
use mgnctl::ops::{self, OpOutput};
use mgnctl::progress::{ProgressRunner, ProgressTracker};
use mgnctl::select::Select;

use crate::cli::output::OutputFormatter;
use crate::cli::{Cli, OutputFormat};

/// Common context shared between commands
pub struct CommandContext {
    /// Configuration
    pub config: Config,
    /// Output formatter
    pub output: OutputFormatter,
    /// Resolved connection settings
    pub settings: ClientSettings,
    /// Response projection in effect
    pub select: Select,
    /// Show progress records during long calls
    pub progress: bool,
    /// Verbosity level
    pub verbosity: u8,
}

impl CommandContext {
    /// Create a new command context from CLI arguments, CLI flags override
    /// configuration values field by field.
    pub fn new(cli: &Cli, config: Config) -> Result<Self> {
        let json_mode = match cli.output {
            Some(format) => format == OutputFormat::Json,
            None => config.defaults.output.eq_ignore_ascii_case("json"),
        };
        let use_color = !cli.no_color && config.colors.enabled;
        let output = OutputFormatter::new(use_color, json_mode, cli.verbosity());

        let select = Select::parse(cli.select.as_deref().unwrap_or(""))?;

        let settings = ClientSettings {
            region: cli.region.clone().or_else(|| config.defaults.region.clone()),
            profile: cli
                .profile
                .clone()
                .or_else(|| config.defaults.profile.clone()),
            profiles_location: cli
                .profiles_location
                .clone()
                .or_else(|| config.credentials.profiles_location.clone()),
            endpoint_url: cli
                .endpoint_url
                .clone()
                .or_else(|| config.defaults.endpoint_url.clone()),
        };

        let progress = !cli.no_progress && config.defaults.progress;

        Ok(Self {
            config,
            output,
            settings,
            select,
            progress,
            verbosity: cli.verbosity(),
        })
    }

    /// Build the operation context, resolving credentials and region.
    pub async fn op_context(&self) -> Result<OpContext> {
        client::build_context(&self.settings, self.select.clone()).await
    }

    /// Drive one service call: progress records while it runs, Ctrl-C
    /// cancellation, then the selected projection printed to stdout.
    pub async fn run_op<T, F>(&self, ctx: &OpContext, activity: &str, work: F) -> Result<i32>
    where
        T: OpOutput,
        F: Future<Output = Result<T>>,
    {
        let sink = self.output.progress_sink(self.progress);
        let runner = ProgressRunner::new(sink, &ctx.endpoint, &ctx.region);
        let tracker = ProgressTracker::new(activity);

        let output = tokio::select! {
            result = runner.run(&tracker, work) => result?,
            _ = tokio::signal::ctrl_c() => return Err(Error::Interrupted),
        };

        let value = ops::project(&ctx.select, &output)?;
        self.output.result(&value);
        Ok(0)
    }
}

/// Parses a `key=value` tag argument.
pub fn parse_tag(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got {raw:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_key_value() {
        assert_eq!(
            parse_tag("env=prod").unwrap(),
            ("env".to_string(), "prod".to_string())
        );
        assert_eq!(
            parse_tag("note=a=b").unwrap(),
            ("note".to_string(), "a=b".to_string())
        );
        assert!(parse_tag("no-separator").is_err());
        assert!(parse_tag("=value").is_err());
    }
}
