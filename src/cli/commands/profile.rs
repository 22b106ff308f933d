//! `mgnctl profile` - stored credential profile management.
//!
//! Profiles land in the OS keychain when one is available, otherwise in the
//! shared credentials file. No network calls are made here.

use clap::{Args, Subcommand};

use mgnctl::credentials::{CredentialProfile, CredentialProfileChain};
use mgnctl::error::Result;

use super::CommandContext;

/// Arguments for the profile command group
#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCommands {
    /// Store a credential profile
    Set {
        /// Profile name
        name: String,

        /// AWS access key ID
        #[arg(long, env = "AWS_ACCESS_KEY_ID")]
        access_key_id: String,

        /// AWS secret access key
        #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
        secret_access_key: String,

        /// Session token for temporary credentials
        #[arg(long, env = "AWS_SESSION_TOKEN", hide_env_values = true)]
        session_token: Option<String>,
    },

    /// Remove a stored credential profile
    Remove {
        /// Profile name
        name: String,
    },
}

impl ProfileArgs {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<i32> {
        let chain = CredentialProfileChain::new(ctx.settings.profiles_location.as_deref());

        match &self.command {
            ProfileCommands::Set {
                name,
                access_key_id,
                secret_access_key,
                session_token,
            } => {
                let profile = CredentialProfile {
                    access_key_id: access_key_id.clone(),
                    secret_access_key: secret_access_key.clone(),
                    session_token: session_token.clone(),
                };
                chain.register(name, &profile)?;
                ctx.output.info(&format!("Stored profile {name}"));
                Ok(0)
            }
            ProfileCommands::Remove { name } => {
                if chain.unregister(name)? {
                    ctx.output.info(&format!("Removed profile {name}"));
                    Ok(0)
                } else {
                    ctx.output
                        .warning(&format!("profile {name} was not found in any store"));
                    Ok(0)
                }
            }
        }
    }
}
