//! `mgnctl replication` - per-server replication configuration.

use clap::{Args, Subcommand};

use mgnctl::error::{Error, Result};
use mgnctl::ops::replication_config::{
    GetReplicationConfigurationParams, ReplicatedDiskSpec, UpdateReplicationConfigurationParams,
};

use super::{parse_tag, CommandContext};

/// Arguments for the replication command group
#[derive(Args, Debug, Clone)]
pub struct ReplicationArgs {
    #[command(subcommand)]
    pub command: ReplicationCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ReplicationCommands {
    /// Show a server's replication configuration
    Get {
        /// Source server ID
        source_server_id: String,
    },

    /// Update a server's replication configuration
    Update(UpdateReplicationArgs),
}

#[derive(Args, Debug, Clone)]
pub struct UpdateReplicationArgs {
    /// Source server ID
    pub source_server_id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub staging_area_subnet_id: Option<String>,

    #[arg(long)]
    pub associate_default_security_group: Option<bool>,

    /// Security group for replication servers (repeatable, replaces the set)
    #[arg(long = "security-group")]
    pub security_groups: Vec<String>,

    #[arg(long)]
    pub replication_server_instance_type: Option<String>,

    #[arg(long)]
    pub use_dedicated_replication_server: Option<bool>,

    #[arg(long)]
    pub default_large_staging_disk_type: Option<String>,

    /// Disk override as JSON, e.g.
    /// '{"device_name":"/dev/sda1","staging_disk_type":"GP3","iops":3000}'
    /// (repeatable, replaces the set)
    #[arg(long = "replicated-disk")]
    pub replicated_disks: Vec<String>,

    #[arg(long)]
    pub ebs_encryption: Option<String>,

    #[arg(long)]
    pub ebs_encryption_key_arn: Option<String>,

    #[arg(long)]
    pub bandwidth_throttling: Option<i64>,

    #[arg(long)]
    pub data_plane_routing: Option<String>,

    #[arg(long)]
    pub create_public_ip: Option<bool>,

    /// Tag applied to staging area resources, key=value (repeatable,
    /// replaces the set)
    #[arg(long = "staging-tag", value_parser = parse_tag)]
    pub staging_area_tags: Vec<(String, String)>,
}

impl UpdateReplicationArgs {
    fn parse_disks(&self) -> Result<Vec<ReplicatedDiskSpec>> {
        self.replicated_disks
            .iter()
            .map(|raw| {
                serde_json::from_str(raw).map_err(|e| {
                    Error::InvalidParameter(format!("replicated-disk is not valid JSON: {e}"))
                })
            })
            .collect()
    }
}

impl ReplicationArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<i32> {
        match &self.command {
            ReplicationCommands::Get { source_server_id } => {
                let params = GetReplicationConfigurationParams {
                    source_server_id: source_server_id.clone(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                ctx.run_op(
                    &op,
                    &format!("Fetching replication configuration of {source_server_id}"),
                    params.send(&op),
                )
                .await
            }
            ReplicationCommands::Update(args) => {
                let params = UpdateReplicationConfigurationParams {
                    source_server_id: args.source_server_id.clone(),
                    name: args.name.clone(),
                    staging_area_subnet_id: args.staging_area_subnet_id.clone(),
                    associate_default_security_group: args.associate_default_security_group,
                    replication_servers_security_groups_ids: if args.security_groups.is_empty() {
                        None
                    } else {
                        Some(args.security_groups.clone())
                    },
                    replication_server_instance_type: args
                        .replication_server_instance_type
                        .clone(),
                    use_dedicated_replication_server: args.use_dedicated_replication_server,
                    default_large_staging_disk_type: args
                        .default_large_staging_disk_type
                        .clone(),
                    replicated_disks: args.parse_disks()?,
                    ebs_encryption: args.ebs_encryption.clone(),
                    ebs_encryption_key_arn: args.ebs_encryption_key_arn.clone(),
                    bandwidth_throttling: args.bandwidth_throttling,
                    data_plane_routing: args.data_plane_routing.clone(),
                    create_public_ip: args.create_public_ip,
                    staging_area_tags: if args.staging_area_tags.is_empty() {
                        None
                    } else {
                        Some(args.staging_area_tags.iter().cloned().collect())
                    },
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                ctx.run_op(
                    &op,
                    &format!(
                        "Updating replication configuration of {}",
                        args.source_server_id
                    ),
                    params.send(&op),
                )
                .await
            }
        }
    }
}
