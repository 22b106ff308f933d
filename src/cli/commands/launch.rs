//! `mgnctl launch` - test launches, cutovers, and their teardown.

use clap::{Args, Subcommand};

use mgnctl::error::Result;
use mgnctl::ops::lifecycle::{
    FinalizeCutoverParams, StartCutoverParams, StartTestParams, TerminateTargetInstancesParams,
};

use super::{parse_tag, CommandContext};

/// Arguments for the launch command group
#[derive(Args, Debug, Clone)]
pub struct LaunchArgs {
    #[command(subcommand)]
    pub command: LaunchCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum LaunchCommands {
    /// Launch test instances for one or more source servers
    Test(BatchLaunchArgs),

    /// Launch cutover instances for one or more source servers
    Cutover(BatchLaunchArgs),

    /// Terminate launched target instances
    Terminate(BatchLaunchArgs),

    /// Finalize the cutover of a single server
    Finalize {
        /// Source server ID
        source_server_id: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct BatchLaunchArgs {
    /// Source server IDs
    #[arg(required = true)]
    pub source_server_ids: Vec<String>,

    /// Tag applied to the created job, key=value (repeatable)
    #[arg(long = "tag", value_parser = parse_tag)]
    pub tags: Vec<(String, String)>,
}

impl LaunchArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<i32> {
        match &self.command {
            LaunchCommands::Test(args) => {
                let params = StartTestParams {
                    source_server_ids: args.source_server_ids.clone(),
                    tags: args.tags.iter().cloned().collect(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                let activity = format!(
                    "Starting test for {} server(s)",
                    params.source_server_ids.len()
                );
                ctx.run_op(&op, &activity, params.send(&op)).await
            }
            LaunchCommands::Cutover(args) => {
                let params = StartCutoverParams {
                    source_server_ids: args.source_server_ids.clone(),
                    tags: args.tags.iter().cloned().collect(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                let activity = format!(
                    "Starting cutover for {} server(s)",
                    params.source_server_ids.len()
                );
                ctx.run_op(&op, &activity, params.send(&op)).await
            }
            LaunchCommands::Terminate(args) => {
                let params = TerminateTargetInstancesParams {
                    source_server_ids: args.source_server_ids.clone(),
                    tags: args.tags.iter().cloned().collect(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                let activity = format!(
                    "Terminating target instances for {} server(s)",
                    params.source_server_ids.len()
                );
                ctx.run_op(&op, &activity, params.send(&op)).await
            }
            LaunchCommands::Finalize { source_server_id } => {
                let params = FinalizeCutoverParams {
                    source_server_id: source_server_id.clone(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                ctx.run_op(
                    &op,
                    &format!("Finalizing cutover for {source_server_id}"),
                    params.send(&op),
                )
                .await
            }
        }
    }
}
