//! Replication configuration template CRUD.

use std::collections::HashMap;

use aws_sdk_mgn::types::{
    ReplicationConfigurationDataPlaneRouting, ReplicationConfigurationDefaultLargeStagingDiskType,
    ReplicationConfigurationEbsEncryption, ReplicationConfigurationTemplate,
};
use serde::Serialize;

use super::{validate_enum_member, validate_max_results, warn_if_empty, OpOutput};
use crate::client::OpContext;
use crate::error::{Error, Result};

/// Pipeline projection of one replication configuration template.
#[derive(Debug, Clone, Serialize)]
pub struct ReplicationTemplateInfo {
    pub replication_configuration_template_id: String,
    pub arn: Option<String>,
    pub staging_area_subnet_id: Option<String>,
    pub associate_default_security_group: Option<bool>,
    pub replication_servers_security_groups_ids: Vec<String>,
    pub replication_server_instance_type: Option<String>,
    pub use_dedicated_replication_server: Option<bool>,
    pub default_large_staging_disk_type: Option<String>,
    pub ebs_encryption: Option<String>,
    pub ebs_encryption_key_arn: Option<String>,
    pub bandwidth_throttling: i64,
    pub data_plane_routing: Option<String>,
    pub create_public_ip: Option<bool>,
    pub staging_area_tags: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
}

/// Create and Update return the template members at the top level of the
/// response, same shape as `ReplicationConfigurationTemplate` itself.
macro_rules! replication_template_info {
    ($template:expr) => {{
        let template = $template;
        ReplicationTemplateInfo {
            replication_configuration_template_id: template
                .replication_configuration_template_id()
                .to_string(),
            arn: template.arn().map(str::to_string),
            staging_area_subnet_id: template.staging_area_subnet_id().map(str::to_string),
            associate_default_security_group: template.associate_default_security_group(),
            replication_servers_security_groups_ids: template
                .replication_servers_security_groups_ids()
                .to_vec(),
            replication_server_instance_type: template
                .replication_server_instance_type()
                .map(str::to_string),
            use_dedicated_replication_server: template.use_dedicated_replication_server(),
            default_large_staging_disk_type: template
                .default_large_staging_disk_type()
                .map(|t| t.as_str().to_string()),
            ebs_encryption: template.ebs_encryption().map(|e| e.as_str().to_string()),
            ebs_encryption_key_arn: template.ebs_encryption_key_arn().map(str::to_string),
            bandwidth_throttling: template.bandwidth_throttling(),
            data_plane_routing: template
                .data_plane_routing()
                .map(|r| r.as_str().to_string()),
            create_public_ip: template.create_public_ip(),
            staging_area_tags: template.staging_area_tags().cloned(),
            tags: template.tags().cloned(),
        }
    }};
}

impl ReplicationTemplateInfo {
    pub(crate) fn from_sdk(template: &ReplicationConfigurationTemplate) -> Self {
        replication_template_info!(template)
    }
}

/// Output of the single-template verbs.
#[derive(Debug, Clone, Serialize)]
pub struct ReplicationTemplateResult {
    pub template: ReplicationTemplateInfo,
}

impl OpOutput for ReplicationTemplateResult {
    fn default_projection(&self) -> Option<&'static str> {
        Some("template")
    }
}

// ============================================================================
// CreateReplicationConfigurationTemplate
// ============================================================================

/// Parameters for CreateReplicationConfigurationTemplate. All fields except
/// `ebs_encryption_key_arn` and `tags` are required by the service.
#[derive(Debug, Clone)]
pub struct CreateReplicationTemplateParams {
    pub staging_area_subnet_id: String,
    pub associate_default_security_group: bool,
    pub replication_servers_security_groups_ids: Vec<String>,
    pub replication_server_instance_type: String,
    pub use_dedicated_replication_server: bool,
    pub default_large_staging_disk_type: String,
    pub ebs_encryption: String,
    pub ebs_encryption_key_arn: Option<String>,
    pub bandwidth_throttling: i64,
    pub data_plane_routing: String,
    pub create_public_ip: bool,
    pub staging_area_tags: HashMap<String, String>,
    pub tags: HashMap<String, String>,
}

fn validate_template_enums(
    data_plane_routing: Option<&str>,
    default_large_staging_disk_type: Option<&str>,
    ebs_encryption: Option<&str>,
) -> Result<()> {
    if let Some(routing) = data_plane_routing {
        validate_enum_member(
            "data-plane-routing",
            routing,
            ReplicationConfigurationDataPlaneRouting::values(),
        )?;
    }
    if let Some(disk_type) = default_large_staging_disk_type {
        validate_enum_member(
            "default-large-staging-disk-type",
            disk_type,
            ReplicationConfigurationDefaultLargeStagingDiskType::values(),
        )?;
    }
    if let Some(encryption) = ebs_encryption {
        validate_enum_member(
            "ebs-encryption",
            encryption,
            ReplicationConfigurationEbsEncryption::values(),
        )?;
    }
    Ok(())
}

impl CreateReplicationTemplateParams {
    pub fn validate(&self) -> Result<()> {
        warn_if_empty(
            "CreateReplicationConfigurationTemplate",
            "staging-area-subnet-id",
            &self.staging_area_subnet_id,
        );
        if self.bandwidth_throttling < 0 {
            return Err(Error::InvalidParameter(
                "bandwidth-throttling must be non-negative".into(),
            ));
        }
        validate_template_enums(
            Some(&self.data_plane_routing),
            Some(&self.default_large_staging_disk_type),
            Some(&self.ebs_encryption),
        )
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<ReplicationTemplateResult> {
        let mut request = ctx
            .client
            .create_replication_configuration_template()
            .staging_area_subnet_id(&self.staging_area_subnet_id)
            .associate_default_security_group(self.associate_default_security_group)
            .replication_server_instance_type(&self.replication_server_instance_type)
            .use_dedicated_replication_server(self.use_dedicated_replication_server)
            .default_large_staging_disk_type(
                ReplicationConfigurationDefaultLargeStagingDiskType::from(
                    self.default_large_staging_disk_type.as_str(),
                ),
            )
            .ebs_encryption(ReplicationConfigurationEbsEncryption::from(
                self.ebs_encryption.as_str(),
            ))
            .bandwidth_throttling(self.bandwidth_throttling)
            .data_plane_routing(ReplicationConfigurationDataPlaneRouting::from(
                self.data_plane_routing.as_str(),
            ))
            .create_public_ip(self.create_public_ip);

        for group in &self.replication_servers_security_groups_ids {
            request = request.replication_servers_security_groups_ids(group);
        }
        if let Some(arn) = &self.ebs_encryption_key_arn {
            request = request.ebs_encryption_key_arn(arn);
        }
        for (key, value) in &self.staging_area_tags {
            request = request.staging_area_tags(key, value);
        }
        for (key, value) in &self.tags {
            request = request.tags(key, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::api("CreateReplicationConfigurationTemplate", e))?;
        Ok(ReplicationTemplateResult {
            template: replication_template_info!(&response),
        })
    }
}

// ============================================================================
// DescribeReplicationConfigurationTemplates
// ============================================================================

/// Parameters for DescribeReplicationConfigurationTemplates.
#[derive(Debug, Clone, Default)]
pub struct DescribeReplicationTemplatesParams {
    pub template_ids: Vec<String>,
    pub max_results: Option<i32>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DescribeReplicationTemplatesOutput {
    pub items: Vec<ReplicationTemplateInfo>,
    pub next_token: Option<String>,
}

impl OpOutput for DescribeReplicationTemplatesOutput {
    fn default_projection(&self) -> Option<&'static str> {
        Some("items")
    }
}

impl DescribeReplicationTemplatesParams {
    pub fn validate(&self) -> Result<()> {
        validate_max_results(self.max_results)
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<DescribeReplicationTemplatesOutput> {
        let mut request = ctx.client.describe_replication_configuration_templates();
        for id in &self.template_ids {
            warn_if_empty(
                "DescribeReplicationConfigurationTemplates",
                "template-ids",
                id,
            );
            request = request.replication_configuration_template_ids(id);
        }
        if let Some(max_results) = self.max_results {
            request = request.max_results(max_results);
        }
        if let Some(token) = &self.next_token {
            request = request.next_token(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::api("DescribeReplicationConfigurationTemplates", e))?;

        Ok(DescribeReplicationTemplatesOutput {
            items: response
                .items()
                .iter()
                .map(ReplicationTemplateInfo::from_sdk)
                .collect(),
            next_token: response.next_token().map(str::to_string),
        })
    }
}

// ============================================================================
// UpdateReplicationConfigurationTemplate
// ============================================================================

/// Parameters for UpdateReplicationConfigurationTemplate. Only the template
/// id is required; unset fields keep their current values.
#[derive(Debug, Clone, Default)]
pub struct UpdateReplicationTemplateParams {
    pub replication_configuration_template_id: String,
    pub staging_area_subnet_id: Option<String>,
    pub associate_default_security_group: Option<bool>,
    pub replication_servers_security_groups_ids: Option<Vec<String>>,
    pub replication_server_instance_type: Option<String>,
    pub use_dedicated_replication_server: Option<bool>,
    pub default_large_staging_disk_type: Option<String>,
    pub ebs_encryption: Option<String>,
    pub ebs_encryption_key_arn: Option<String>,
    pub bandwidth_throttling: Option<i64>,
    pub data_plane_routing: Option<String>,
    pub create_public_ip: Option<bool>,
    pub staging_area_tags: Option<HashMap<String, String>>,
}

impl UpdateReplicationTemplateParams {
    pub fn validate(&self) -> Result<()> {
        warn_if_empty(
            "UpdateReplicationConfigurationTemplate",
            "template-id",
            &self.replication_configuration_template_id,
        );
        if matches!(self.bandwidth_throttling, Some(bw) if bw < 0) {
            return Err(Error::InvalidParameter(
                "bandwidth-throttling must be non-negative".into(),
            ));
        }
        validate_template_enums(
            self.data_plane_routing.as_deref(),
            self.default_large_staging_disk_type.as_deref(),
            self.ebs_encryption.as_deref(),
        )
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<ReplicationTemplateResult> {
        let mut request = ctx
            .client
            .update_replication_configuration_template()
            .replication_configuration_template_id(
                &self.replication_configuration_template_id,
            );

        if let Some(subnet) = &self.staging_area_subnet_id {
            request = request.staging_area_subnet_id(subnet);
        }
        if let Some(associate) = self.associate_default_security_group {
            request = request.associate_default_security_group(associate);
        }
        if let Some(groups) = &self.replication_servers_security_groups_ids {
            for group in groups {
                request = request.replication_servers_security_groups_ids(group);
            }
        }
        if let Some(instance_type) = &self.replication_server_instance_type {
            request = request.replication_server_instance_type(instance_type);
        }
        if let Some(dedicated) = self.use_dedicated_replication_server {
            request = request.use_dedicated_replication_server(dedicated);
        }
        if let Some(disk_type) = &self.default_large_staging_disk_type {
            request = request.default_large_staging_disk_type(
                ReplicationConfigurationDefaultLargeStagingDiskType::from(disk_type.as_str()),
            );
        }
        if let Some(encryption) = &self.ebs_encryption {
            request = request.ebs_encryption(ReplicationConfigurationEbsEncryption::from(
                encryption.as_str(),
            ));
        }
        if let Some(arn) = &self.ebs_encryption_key_arn {
            request = request.ebs_encryption_key_arn(arn);
        }
        if let Some(bandwidth) = self.bandwidth_throttling {
            request = request.bandwidth_throttling(bandwidth);
        }
        if let Some(routing) = &self.data_plane_routing {
            request = request.data_plane_routing(ReplicationConfigurationDataPlaneRouting::from(
                routing.as_str(),
            ));
        }
        if let Some(public_ip) = self.create_public_ip {
            request = request.create_public_ip(public_ip);
        }
        if let Some(staging_tags) = &self.staging_area_tags {
            for (key, value) in staging_tags {
                request = request.staging_area_tags(key, value);
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::api("UpdateReplicationConfigurationTemplate", e))?;
        Ok(ReplicationTemplateResult {
            template: replication_template_info!(&response),
        })
    }
}

// ============================================================================
// DeleteReplicationConfigurationTemplate
// ============================================================================

/// Parameters for DeleteReplicationConfigurationTemplate.
#[derive(Debug, Clone)]
pub struct DeleteReplicationTemplateParams {
    pub replication_configuration_template_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteReplicationTemplateOutput {
    pub replication_configuration_template_id: String,
}

impl OpOutput for DeleteReplicationTemplateOutput {}

impl DeleteReplicationTemplateParams {
    pub fn validate(&self) -> Result<()> {
        warn_if_empty(
            "DeleteReplicationConfigurationTemplate",
            "template-id",
            &self.replication_configuration_template_id,
        );
        Ok(())
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<DeleteReplicationTemplateOutput> {
        ctx.client
            .delete_replication_configuration_template()
            .replication_configuration_template_id(
                &self.replication_configuration_template_id,
            )
            .send()
            .await
            .map_err(|e| Error::api("DeleteReplicationConfigurationTemplate", e))?;
        Ok(DeleteReplicationTemplateOutput {
            replication_configuration_template_id: self
                .replication_configuration_template_id
                .clone(),
        })
    }
}
