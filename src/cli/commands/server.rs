//! `mgnctl server` - source server inventory commands.

use clap::{Args, Subcommand};

use mgnctl::error::Result;
use mgnctl::ops::source_server::{
    ChangeServerLifeCycleStateParams, DeleteSourceServerParams, DescribeSourceServersParams,
    DisconnectFromServiceParams, MarkAsArchivedParams, RetryDataReplicationParams,
};

use super::CommandContext;

/// Arguments for the server command group
#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    #[command(subcommand)]
    pub command: ServerCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ServerCommands {
    /// List source servers, optionally filtered
    List(ListServersArgs),

    /// Delete a source server record
    Delete {
        /// Source server ID
        source_server_id: String,
    },

    /// Archive a source server after cutover
    Archive {
        /// Source server ID
        source_server_id: String,
    },

    /// Disconnect a source server from the service
    Disconnect {
        /// Source server ID
        source_server_id: String,
    },

    /// Restart data replication for a stalled server
    #[command(name = "retry-replication")]
    RetryReplication {
        /// Source server ID
        source_server_id: String,
    },

    /// Move a server to another lifecycle state
    #[command(name = "set-lifecycle")]
    SetLifecycle {
        /// Source server ID
        source_server_id: String,

        /// Target state (READY_FOR_TEST, READY_FOR_CUTOVER, CUTOVER)
        #[arg(long)]
        state: String,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListServersArgs {
    /// Restrict to these server IDs (repeatable)
    #[arg(long = "id")]
    pub ids: Vec<String>,

    /// Filter on archived state
    #[arg(long)]
    pub archived: Option<bool>,

    /// Filter on lifecycle state (repeatable)
    #[arg(long = "lifecycle-state")]
    pub lifecycle_states: Vec<String>,

    /// Filter on replication type (repeatable)
    #[arg(long = "replication-type")]
    pub replication_types: Vec<String>,

    /// Page size
    #[arg(long)]
    pub max_results: Option<i32>,

    /// Pagination token from a previous call
    #[arg(long)]
    pub next_token: Option<String>,
}

impl ServerArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<i32> {
        match &self.command {
            ServerCommands::List(args) => {
                let params = DescribeSourceServersParams {
                    source_server_ids: args.ids.clone(),
                    is_archived: args.archived,
                    lifecycle_states: args.lifecycle_states.clone(),
                    replication_types: args.replication_types.clone(),
                    max_results: args.max_results,
                    next_token: args.next_token.clone(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                ctx.run_op(&op, "Listing source servers", params.send(&op))
                    .await
            }
            ServerCommands::Delete { source_server_id } => {
                let params = DeleteSourceServerParams {
                    source_server_id: source_server_id.clone(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                ctx.run_op(
                    &op,
                    &format!("Deleting source server {source_server_id}"),
                    params.send(&op),
                )
                .await
            }
            ServerCommands::Archive { source_server_id } => {
                let params = MarkAsArchivedParams {
                    source_server_id: source_server_id.clone(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                ctx.run_op(
                    &op,
                    &format!("Archiving source server {source_server_id}"),
                    params.send(&op),
                )
                .await
            }
            ServerCommands::Disconnect { source_server_id } => {
                let params = DisconnectFromServiceParams {
                    source_server_id: source_server_id.clone(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                ctx.run_op(
                    &op,
                    &format!("Disconnecting source server {source_server_id}"),
                    params.send(&op),
                )
                .await
            }
            ServerCommands::RetryReplication { source_server_id } => {
                let params = RetryDataReplicationParams {
                    source_server_id: source_server_id.clone(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                ctx.run_op(
                    &op,
                    &format!("Retrying data replication for {source_server_id}"),
                    params.send(&op),
                )
                .await
            }
            ServerCommands::SetLifecycle {
                source_server_id,
                state,
            } => {
                let params = ChangeServerLifeCycleStateParams {
                    source_server_id: source_server_id.clone(),
                    lifecycle_state: state.clone(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                ctx.run_op(
                    &op,
                    &format!("Changing lifecycle state of {source_server_id}"),
                    params.send(&op),
                )
                .await
            }
        }
    }
}
