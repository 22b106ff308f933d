//! `mgnctl template` - replication configuration template CRUD.

use clap::{Args, Subcommand};

use mgnctl::error::Result;
use mgnctl::ops::replication_template::{
    CreateReplicationTemplateParams, DeleteReplicationTemplateParams,
    DescribeReplicationTemplatesParams, UpdateReplicationTemplateParams,
};

use super::{parse_tag, CommandContext};

/// Arguments for the template command group
#[derive(Args, Debug, Clone)]
pub struct TemplateArgs {
    #[command(subcommand)]
    pub command: TemplateCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TemplateCommands {
    /// Create a replication configuration template
    Create(CreateTemplateArgs),

    /// List replication configuration templates
    List(ListTemplatesArgs),

    /// Update a replication configuration template
    Update(UpdateTemplateArgs),

    /// Delete a replication configuration template
    Delete {
        /// Template ID
        template_id: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CreateTemplateArgs {
    /// Subnet the replication servers are launched into
    #[arg(long)]
    pub staging_area_subnet_id: String,

    /// Instance type for replication servers
    #[arg(long, default_value = "t3.small")]
    pub replication_server_instance_type: String,

    /// Security group for replication servers (repeatable)
    #[arg(long = "security-group")]
    pub security_groups: Vec<String>,

    /// Attach the default security group to replication servers
    #[arg(long)]
    pub associate_default_security_group: bool,

    /// Use a dedicated replication server per source server
    #[arg(long)]
    pub use_dedicated_replication_server: bool,

    /// Staging disk type for large disks
    #[arg(long, default_value = "GP3")]
    pub default_large_staging_disk_type: String,

    /// EBS encryption mode
    #[arg(long, default_value = "DEFAULT")]
    pub ebs_encryption: String,

    /// KMS key ARN for custom EBS encryption
    #[arg(long)]
    pub ebs_encryption_key_arn: Option<String>,

    /// Bandwidth cap in Mbps, 0 for unlimited
    #[arg(long, default_value_t = 0)]
    pub bandwidth_throttling: i64,

    /// Data plane routing
    #[arg(long, default_value = "PRIVATE_IP")]
    pub data_plane_routing: String,

    /// Assign public IPs to replication servers
    #[arg(long)]
    pub create_public_ip: bool,

    /// Tag applied to staging area resources, key=value (repeatable)
    #[arg(long = "staging-tag", value_parser = parse_tag)]
    pub staging_area_tags: Vec<(String, String)>,

    /// Tag applied to the template itself, key=value (repeatable)
    #[arg(long = "tag", value_parser = parse_tag)]
    pub tags: Vec<(String, String)>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListTemplatesArgs {
    /// Restrict to these template IDs (repeatable)
    #[arg(long = "id")]
    pub ids: Vec<String>,

    /// Page size
    #[arg(long)]
    pub max_results: Option<i32>,

    /// Pagination token from a previous call
    #[arg(long)]
    pub next_token: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateTemplateArgs {
    /// Template ID
    pub template_id: String,

    #[arg(long)]
    pub staging_area_subnet_id: Option<String>,

    #[arg(long)]
    pub replication_server_instance_type: Option<String>,

    /// Security group for replication servers (repeatable, replaces the set)
    #[arg(long = "security-group")]
    pub security_groups: Vec<String>,

    #[arg(long)]
    pub associate_default_security_group: Option<bool>,

    #[arg(long)]
    pub use_dedicated_replication_server: Option<bool>,

    #[arg(long)]
    pub default_large_staging_disk_type: Option<String>,

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

impl TemplateArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<i32> {
        match &self.command {
            TemplateCommands::Create(args) => {
                let params = CreateReplicationTemplateParams {
                    staging_area_subnet_id: args.staging_area_subnet_id.clone(),
                    associate_default_security_group: args.associate_default_security_group,
                    replication_servers_security_groups_ids: args.security_groups.clone(),
                    replication_server_instance_type: args
                        .replication_server_instance_type
                        .clone(),
                    use_dedicated_replication_server: args.use_dedicated_replication_server,
                    default_large_staging_disk_type: args
                        .default_large_staging_disk_type
                        .clone(),
                    ebs_encryption: args.ebs_encryption.clone(),
                    ebs_encryption_key_arn: args.ebs_encryption_key_arn.clone(),
                    bandwidth_throttling: args.bandwidth_throttling,
                    data_plane_routing: args.data_plane_routing.clone(),
                    create_public_ip: args.create_public_ip,
                    staging_area_tags: args.staging_area_tags.iter().cloned().collect(),
                    tags: args.tags.iter().cloned().collect(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                ctx.run_op(&op, "Creating replication template", params.send(&op))
                    .await
            }
            TemplateCommands::List(args) => {
                let params = DescribeReplicationTemplatesParams {
                    template_ids: args.ids.clone(),
                    max_results: args.max_results,
                    next_token: args.next_token.clone(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                ctx.run_op(&op, "Listing replication templates", params.send(&op))
                    .await
            }
            TemplateCommands::Update(args) => {
                let params = UpdateReplicationTemplateParams {
                    replication_configuration_template_id: args.template_id.clone(),
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
                    &format!("Updating replication template {}", args.template_id),
                    params.send(&op),
                )
                .await
            }
            TemplateCommands::Delete { template_id } => {
                let params = DeleteReplicationTemplateParams {
                    replication_configuration_template_id: template_id.clone(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                ctx.run_op(
                    &op,
                    &format!("Deleting replication template {template_id}"),
                    params.send(&op),
                )
                .await
            }
        }
    }
}
