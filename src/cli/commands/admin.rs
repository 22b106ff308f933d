//! `mgnctl init-service` and `mgnctl tags` - account-level commands.

use clap::{Args, Subcommand};

use mgnctl::error::Result;
use mgnctl::ops::service::InitializeServiceParams;
use mgnctl::ops::tags::{ListTagsParams, TagResourceParams, UntagResourceParams};

use super::{parse_tag, CommandContext};

/// Arguments for the init-service command
#[derive(Args, Debug, Clone)]
pub struct InitServiceArgs {}

impl InitServiceArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<i32> {
        let params = InitializeServiceParams;
        params.validate()?;
        let op = ctx.op_context().await?;
        ctx.run_op(
            &op,
            &format!("Initializing the service in {}", op.region),
            params.send(&op),
        )
        .await
    }
}

/// Arguments for the tags command group
#[derive(Args, Debug, Clone)]
pub struct TagsArgs {
    #[command(subcommand)]
    pub command: TagsCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TagsCommands {
    /// List the tags on a resource
    List {
        /// Resource ARN
        resource_arn: String,
    },

    /// Add or overwrite tags on a resource
    Add {
        /// Resource ARN
        resource_arn: String,

        /// Tag to apply, key=value (repeatable)
        #[arg(long = "tag", value_parser = parse_tag, required = true)]
        tags: Vec<(String, String)>,
    },

    /// Remove tags from a resource
    Remove {
        /// Resource ARN
        resource_arn: String,

        /// Tag key to remove (repeatable)
        #[arg(long = "key", required = true)]
        keys: Vec<String>,
    },
}

impl TagsArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<i32> {
        match &self.command {
            TagsCommands::List { resource_arn } => {
                let params = ListTagsParams {
                    resource_arn: resource_arn.clone(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                ctx.run_op(&op, "Listing resource tags", params.send(&op))
                    .await
            }
            TagsCommands::Add { resource_arn, tags } => {
                let params = TagResourceParams {
                    resource_arn: resource_arn.clone(),
                    tags: tags.iter().cloned().collect(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                ctx.run_op(&op, "Tagging resource", params.send(&op)).await
            }
            TagsCommands::Remove { resource_arn, keys } => {
                let params = UntagResourceParams {
                    resource_arn: resource_arn.clone(),
                    tag_keys: keys.clone(),
                };
                params.validate()?;
                let op = ctx.op_context().await?;
                ctx.run_op(&op, "Untagging resource", params.send(&op)).await
            }
        }
    }
}
