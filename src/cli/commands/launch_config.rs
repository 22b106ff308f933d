//! `mgnctl launch-config` - per-server launch configuration.

use clap::{Args, Subcommand};

use mgnctl::error::Result;
use mgnctl::ops::launch_config::{
    GetLaunchConfigurationParams, UpdateLaunchConfigurationParams,
};

use super::CommandContext;

/// Arguments for the launch-config command group
#[derive(Args, Debug, Clone)]
pub struct LaunchConfigArgs {
    #[command(subcommand)]
    pub command: LaunchConfigCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum LaunchConfigCommands {
    /// Show a server's launch configuration
    Get {
        /// Source server ID
        source_server_id: String,
    },

    /// Update a server's launch configuration
    Update(UpdateLaunchConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct UpdateLaunchConfigArgs {
    /// Source server ID
    pub source_server_id: String,

    #[arg(long)]
    pub name: Option<String>,

    /// STOPPED or STARTED
    #[arg(long)]
    pub launch_disposition: Option<String>,

    /// NONE or BASIC
    #[arg(long = "right-sizing-method")]
    pub target_instance_type_right_sizing_method: Option<String>,

    #[arg(long)]
    pub copy_private_ip: Option<bool>,

    #[arg(long)]
    pub copy_tags: Option<bool>,

    /// LEGACY_BIOS or UEFI
    #[arg(long)]
    pub boot_mode: Option<String>,

    /// Bring-your-own-license for the OS
    #[arg(long)]
    pub os_byol: Option<bool>,
}

impl LaunchConfigArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<i32> {
        match &self.command {
            LaunchConfigCommands::Get { source_server_id } => {
                let params = GetLaunchConfigurationParams {
                    source_server_id: source_server_id.clone(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                ctx.run_op(
                    &op,
                    &format!("Fetching launch configuration of {source_server_id}"),
                    params.send(&op),
                )
                .await
            }
            LaunchConfigCommands::Update(args) => {
                let params = UpdateLaunchConfigurationParams {
                    source_server_id: args.source_server_id.clone(),
                    name: args.name.clone(),
                    launch_disposition: args.launch_disposition.clone(),
                    target_instance_type_right_sizing_method: args
                        .target_instance_type_right_sizing_method
                        .clone(),
                    copy_private_ip: args.copy_private_ip,
                    copy_tags: args.copy_tags,
                    boot_mode: args.boot_mode.clone(),
                    os_byol: args.os_byol,
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                ctx.run_op(
                    &op,
                    &format!("Updating launch configuration of {}", args.source_server_id),
                    params.send(&op),
                )
                .await
            }
        }
    }
}
