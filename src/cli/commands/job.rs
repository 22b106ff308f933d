//! `mgnctl job` - migration job inspection.

use clap::{Args, Subcommand};

use mgnctl::error::Result;
use mgnctl::ops::job::{DeleteJobParams, DescribeJobLogItemsParams, DescribeJobsParams};

use super::CommandContext;

/// Arguments for the job command group
#[derive(Args, Debug, Clone)]
pub struct JobArgs {
    #[command(subcommand)]
    pub command: JobCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum JobCommands {
    /// List jobs, optionally filtered
    List(ListJobsArgs),

    /// Show the event log of one job
    Logs {
        /// Job ID
        job_id: String,

        /// Page size
        #[arg(long)]
        max_results: Option<i32>,

        /// Pagination token from a previous call
        #[arg(long)]
        next_token: Option<String>,
    },

    /// Delete a finished job record
    Delete {
        /// Job ID
        job_id: String,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListJobsArgs {
    /// Restrict to these job IDs (repeatable)
    #[arg(long = "id")]
    pub ids: Vec<String>,

    /// Only jobs created at or after this RFC 3339 datetime
    #[arg(long)]
    pub from_date: Option<String>,

    /// Only jobs created at or before this RFC 3339 datetime
    #[arg(long)]
    pub to_date: Option<String>,

    /// Page size
    #[arg(long)]
    pub max_results: Option<i32>,

    /// Pagination token from a previous call
    #[arg(long)]
    pub next_token: Option<String>,
}

impl JobArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<i32> {
        match &self.command {
            JobCommands::List(args) => {
                let params = DescribeJobsParams {
                    job_ids: args.ids.clone(),
                    from_date: args.from_date.clone(),
                    to_date: args.to_date.clone(),
                    max_results: args.max_results,
                    next_token: args.next_token.clone(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                ctx.run_op(&op, "Listing jobs", params.send(&op)).await
            }
            JobCommands::Logs {
                job_id,
                max_results,
                next_token,
            } => {
                let params = DescribeJobLogItemsParams {
                    job_id: job_id.clone(),
                    max_results: *max_results,
                    next_token: next_token.clone(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                ctx.run_op(
                    &op,
                    &format!("Fetching log of job {job_id}"),
                    params.send(&op),
                )
                .await
            }
            JobCommands::Delete { job_id } => {
                let params = DeleteJobParams {
                    job_id: job_id.clone(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                ctx.run_op(&op, &format!("Deleting job {job_id}"), params.send(&op))
                    .await
            }
        }
    }
}
