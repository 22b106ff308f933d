//! SDK client construction and per-invocation operation context.
//!
//! [`OpContext`] is the explicit context every operation receives: the built
//! MGN client plus the resolved region, endpoint and select mode. It is
//! constructed once per invocation and never stored globally.

use std::path::PathBuf;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_mgn::Client;

use crate::credentials::CredentialProfileChain;
use crate::error::Result;
use crate::select::Select;

/// Region assumed when neither flags, environment nor configuration name one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Connection settings resolved from configuration and command-line flags.
#[derive(Debug, Clone, Default)]
pub struct ClientSettings {
    /// AWS region
    pub region: Option<String>,
    /// Credential profile name; unset means the SDK default provider chain
    pub profile: Option<String>,
    /// Shared credentials file override
    pub profiles_location: Option<PathBuf>,
    /// Endpoint URL override
    pub endpoint_url: Option<String>,
}

impl ClientSettings {
    /// The region these settings resolve to.
    pub fn resolved_region(&self) -> String {
        self.region
            .clone()
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
    }

    /// The endpoint calls will be directed at. Used verbatim for error
    /// context; the SDK derives the same value itself.
    pub fn resolved_endpoint(&self) -> String {
        self.endpoint_url
            .clone()
            .unwrap_or_else(|| format!("https://mgn.{}.amazonaws.com", self.resolved_region()))
    }
}

/// Per-invocation context handed to every operation.
pub struct OpContext {
    /// The MGN service client
    pub client: Client,
    /// Resolved region name
    pub region: String,
    /// Resolved endpoint, for error diagnostics
    pub endpoint: String,
    /// Output projection in effect
    pub select: Select,
}

/// Builds the operation context: resolves credentials through the profile
/// chain when a profile was named, otherwise defers to the SDK's default
/// provider chain.
pub async fn build_context(settings: &ClientSettings, select: Select) -> Result<OpContext> {
    let region = settings.resolved_region();
    let endpoint = settings.resolved_endpoint();

    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.clone()));

    if let Some(name) = &settings.profile {
        let chain = CredentialProfileChain::new(settings.profiles_location.as_deref());
        let profile = chain.resolve(name)?;
        loader = loader.credentials_provider(profile.into_credentials());
    }

    if let Some(url) = &settings.endpoint_url {
        loader = loader.endpoint_url(url);
    }

    let sdk_config = loader.load().await;
    Ok(OpContext {
        client: Client::new(&sdk_config),
        region,
        endpoint,
        select,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_follows_region() {
        let settings = ClientSettings {
            region: Some("eu-central-1".into()),
            ..Default::default()
        };
        assert_eq!(
            settings.resolved_endpoint(),
            "https://mgn.eu-central-1.amazonaws.com"
        );
    }

    #[test]
    fn explicit_endpoint_wins() {
        let settings = ClientSettings {
            region: Some("eu-central-1".into()),
            endpoint_url: Some("http://localhost:4566".into()),
            ..Default::default()
        };
        assert_eq!(settings.resolved_endpoint(), "http://localhost:4566");
    }

    #[test]
    fn region_defaults_when_unset() {
        assert_eq!(ClientSettings::default().resolved_region(), DEFAULT_REGION);
    }
}
