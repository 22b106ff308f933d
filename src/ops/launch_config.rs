//! Per-server launch configuration: GetLaunchConfiguration and
//! UpdateLaunchConfiguration.

use aws_sdk_mgn::types::{
    BootMode, LaunchDisposition, Licensing, TargetInstanceTypeRightSizingMethod,
};
use serde::Serialize;

use super::{validate_enum_member, warn_if_empty, OpOutput};
use crate::client::OpContext;
use crate::error::{Error, Result};

/// Pipeline projection of one server's launch configuration.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchConfigInfo {
    pub source_server_id: Option<String>,
    pub name: Option<String>,
    pub ec2_launch_template_id: Option<String>,
    pub launch_disposition: Option<String>,
    pub target_instance_type_right_sizing_method: Option<String>,
    pub copy_private_ip: Option<bool>,
    pub copy_tags: Option<bool>,
    pub boot_mode: Option<String>,
    pub os_byol: Option<bool>,
}

impl OpOutput for LaunchConfigInfo {}

/// Get and Update both return the configuration members at the top level
/// of the response.
macro_rules! launch_config_info {
    ($config:expr) => {{
        let config = $config;
        LaunchConfigInfo {
            source_server_id: config.source_server_id().map(str::to_string),
            name: config.name().map(str::to_string),
            ec2_launch_template_id: config.ec2_launch_template_id().map(str::to_string),
            launch_disposition: config
                .launch_disposition()
                .map(|d| d.as_str().to_string()),
            target_instance_type_right_sizing_method: config
                .target_instance_type_right_sizing_method()
                .map(|m| m.as_str().to_string()),
            copy_private_ip: config.copy_private_ip(),
            copy_tags: config.copy_tags(),
            boot_mode: config.boot_mode().map(|m| m.as_str().to_string()),
            os_byol: config.licensing().and_then(|l| l.os_byol()),
        }
    }};
}

// ============================================================================
// GetLaunchConfiguration
// ============================================================================

/// Parameters for GetLaunchConfiguration.
#[derive(Debug, Clone)]
pub struct GetLaunchConfigurationParams {
    pub source_server_id: String,
}

impl GetLaunchConfigurationParams {
    pub fn validate(&self) -> Result<()> {
        warn_if_empty(
            "GetLaunchConfiguration",
            "source-server-id",
            &self.source_server_id,
        );
        Ok(())
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<LaunchConfigInfo> {
        let response = ctx
            .client
            .get_launch_configuration()
            .source_server_id(&self.source_server_id)
            .send()
            .await
            .map_err(|e| Error::api("GetLaunchConfiguration", e))?;
        Ok(launch_config_info!(&response))
    }
}

// ============================================================================
// UpdateLaunchConfiguration
// ============================================================================

/// Parameters for UpdateLaunchConfiguration. Only the server id is
/// required; unset fields keep their current values.
#[derive(Debug, Clone, Default)]
pub struct UpdateLaunchConfigurationParams {
    pub source_server_id: String,
    pub name: Option<String>,
    pub launch_disposition: Option<String>,
    pub target_instance_type_right_sizing_method: Option<String>,
    pub copy_private_ip: Option<bool>,
    pub copy_tags: Option<bool>,
    pub boot_mode: Option<String>,
    pub os_byol: Option<bool>,
}

impl UpdateLaunchConfigurationParams {
    pub fn validate(&self) -> Result<()> {
        warn_if_empty(
            "UpdateLaunchConfiguration",
            "source-server-id",
            &self.source_server_id,
        );
        if let Some(disposition) = &self.launch_disposition {
            validate_enum_member(
                "launch-disposition",
                disposition,
                LaunchDisposition::values(),
            )?;
        }
        if let Some(method) = &self.target_instance_type_right_sizing_method {
            validate_enum_member(
                "right-sizing-method",
                method,
                TargetInstanceTypeRightSizingMethod::values(),
            )?;
        }
        if let Some(mode) = &self.boot_mode {
            validate_enum_member("boot-mode", mode, BootMode::values())?;
        }
        Ok(())
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<LaunchConfigInfo> {
        let mut request = ctx
            .client
            .update_launch_configuration()
            .source_server_id(&self.source_server_id);

        if let Some(name) = &self.name {
            request = request.name(name);
        }
        if let Some(disposition) = &self.launch_disposition {
            request = request.launch_disposition(LaunchDisposition::from(disposition.as_str()));
        }
        if let Some(method) = &self.target_instance_type_right_sizing_method {
            request = request.target_instance_type_right_sizing_method(
                TargetInstanceTypeRightSizingMethod::from(method.as_str()),
            );
        }
        if let Some(copy_ip) = self.copy_private_ip {
            request = request.copy_private_ip(copy_ip);
        }
        if let Some(copy_tags) = self.copy_tags {
            request = request.copy_tags(copy_tags);
        }
        if let Some(mode) = &self.boot_mode {
            request = request.boot_mode(BootMode::from(mode.as_str()));
        }
        if let Some(byol) = self.os_byol {
            request = request.licensing(Licensing::builder().os_byol(byol).build());
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::api("UpdateLaunchConfiguration", e))?;
        Ok(launch_config_info!(&response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_accepts_known_members() {
        let params = UpdateLaunchConfigurationParams {
            source_server_id: "s-1".into(),
            launch_disposition: Some("STOPPED".into()),
            target_instance_type_right_sizing_method: Some("BASIC".into()),
            boot_mode: Some("UEFI".into()),
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn update_rejects_unknown_disposition() {
        let params = UpdateLaunchConfigurationParams {
            source_server_id: "s-1".into(),
            launch_disposition: Some("PAUSED".into()),
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("launch-disposition"));
    }
}
