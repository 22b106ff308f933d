//! Per-server replication configuration: GetReplicationConfiguration and
//! UpdateReplicationConfiguration.

use std::collections::HashMap;

use aws_sdk_mgn::types::{
    ReplicationConfigurationDataPlaneRouting, ReplicationConfigurationDefaultLargeStagingDiskType,
    ReplicationConfigurationEbsEncryption, ReplicationConfigurationReplicatedDisk,
    ReplicationConfigurationReplicatedDiskStagingDiskType,
};
use serde::{Deserialize, Serialize};

use super::{validate_enum_member, warn_if_empty, OpOutput};
use crate::client::OpContext;
use crate::error::{Error, Result};

/// One replicated disk as reported by the service.
#[derive(Debug, Clone, Serialize)]
pub struct ReplicatedDiskInfo {
    pub device_name: Option<String>,
    pub is_boot_disk: Option<bool>,
    pub staging_disk_type: Option<String>,
    pub iops: i64,
    pub throughput: i64,
}

impl ReplicatedDiskInfo {
    fn from_sdk(disk: &ReplicationConfigurationReplicatedDisk) -> Self {
        Self {
            device_name: disk.device_name().map(str::to_string),
            is_boot_disk: disk.is_boot_disk(),
            staging_disk_type: disk.staging_disk_type().map(|t| t.as_str().to_string()),
            iops: disk.iops(),
            throughput: disk.throughput(),
        }
    }
}

/// One replicated disk override, accepted from the command line as JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplicatedDiskSpec {
    pub device_name: String,
    #[serde(default)]
    pub is_boot_disk: Option<bool>,
    #[serde(default)]
    pub staging_disk_type: Option<String>,
    #[serde(default)]
    pub iops: Option<i64>,
    #[serde(default)]
    pub throughput: Option<i64>,
}

impl ReplicatedDiskSpec {
    fn validate(&self) -> Result<()> {
        if let Some(disk_type) = &self.staging_disk_type {
            validate_enum_member(
                "replicated-disks.staging_disk_type",
                disk_type,
                ReplicationConfigurationReplicatedDiskStagingDiskType::values(),
            )?;
        }
        Ok(())
    }

    fn to_sdk(&self) -> ReplicationConfigurationReplicatedDisk {
        let mut builder = ReplicationConfigurationReplicatedDisk::builder()
            .device_name(&self.device_name);
        if let Some(boot) = self.is_boot_disk {
            builder = builder.is_boot_disk(boot);
        }
        if let Some(disk_type) = &self.staging_disk_type {
            builder = builder.staging_disk_type(
                ReplicationConfigurationReplicatedDiskStagingDiskType::from(disk_type.as_str()),
            );
        }
        if let Some(iops) = self.iops {
            builder = builder.iops(iops);
        }
        if let Some(throughput) = self.throughput {
            builder = builder.throughput(throughput);
        }
        builder.build()
    }
}

/// Pipeline projection of one server's replication configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ReplicationConfigInfo {
    pub source_server_id: Option<String>,
    pub name: Option<String>,
    pub staging_area_subnet_id: Option<String>,
    pub associate_default_security_group: Option<bool>,
    pub replication_servers_security_groups_ids: Vec<String>,
    pub replication_server_instance_type: Option<String>,
    pub use_dedicated_replication_server: Option<bool>,
    pub default_large_staging_disk_type: Option<String>,
    pub replicated_disks: Vec<ReplicatedDiskInfo>,
    pub ebs_encryption: Option<String>,
    pub ebs_encryption_key_arn: Option<String>,
    pub bandwidth_throttling: i64,
    pub data_plane_routing: Option<String>,
    pub create_public_ip: Option<bool>,
    pub staging_area_tags: Option<HashMap<String, String>>,
}

impl OpOutput for ReplicationConfigInfo {}

/// Get and Update both return the configuration members at the top level
/// of the response.
macro_rules! replication_config_info {
    ($config:expr) => {{
        let config = $config;
        ReplicationConfigInfo {
            source_server_id: config.source_server_id().map(str::to_string),
            name: config.name().map(str::to_string),
            staging_area_subnet_id: config.staging_area_subnet_id().map(str::to_string),
            associate_default_security_group: config.associate_default_security_group(),
            replication_servers_security_groups_ids: config
                .replication_servers_security_groups_ids()
                .to_vec(),
            replication_server_instance_type: config
                .replication_server_instance_type()
                .map(str::to_string),
            use_dedicated_replication_server: config.use_dedicated_replication_server(),
            default_large_staging_disk_type: config
                .default_large_staging_disk_type()
                .map(|t| t.as_str().to_string()),
            replicated_disks: config
                .replicated_disks()
                .iter()
                .map(ReplicatedDiskInfo::from_sdk)
                .collect(),
            ebs_encryption: config.ebs_encryption().map(|e| e.as_str().to_string()),
            ebs_encryption_key_arn: config.ebs_encryption_key_arn().map(str::to_string),
            bandwidth_throttling: config.bandwidth_throttling(),
            data_plane_routing: config.data_plane_routing().map(|r| r.as_str().to_string()),
            create_public_ip: config.create_public_ip(),
            staging_area_tags: config.staging_area_tags().cloned(),
        }
    }};
}

// ============================================================================
// GetReplicationConfiguration
// ============================================================================

/// Parameters for GetReplicationConfiguration.
#[derive(Debug, Clone)]
pub struct GetReplicationConfigurationParams {
    pub source_server_id: String,
}

impl GetReplicationConfigurationParams {
    pub fn validate(&self) -> Result<()> {
        warn_if_empty(
            "GetReplicationConfiguration",
            "source-server-id",
            &self.source_server_id,
        );
        Ok(())
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<ReplicationConfigInfo> {
        let response = ctx
            .client
            .get_replication_configuration()
            .source_server_id(&self.source_server_id)
            .send()
            .await
            .map_err(|e| Error::api("GetReplicationConfiguration", e))?;
        Ok(replication_config_info!(&response))
    }
}

// ============================================================================
// UpdateReplicationConfiguration
// ============================================================================

/// Parameters for UpdateReplicationConfiguration. Only the server id is
/// required; unset fields keep their current values.
#[derive(Debug, Clone, Default)]
pub struct UpdateReplicationConfigurationParams {
    pub source_server_id: String,
    pub name: Option<String>,
    pub staging_area_subnet_id: Option<String>,
    pub associate_default_security_group: Option<bool>,
    pub replication_servers_security_groups_ids: Option<Vec<String>>,
    pub replication_server_instance_type: Option<String>,
    pub use_dedicated_replication_server: Option<bool>,
    pub default_large_staging_disk_type: Option<String>,
    pub replicated_disks: Vec<ReplicatedDiskSpec>,
    pub ebs_encryption: Option<String>,
    pub ebs_encryption_key_arn: Option<String>,
    pub bandwidth_throttling: Option<i64>,
    pub data_plane_routing: Option<String>,
    pub create_public_ip: Option<bool>,
    pub staging_area_tags: Option<HashMap<String, String>>,
}

impl UpdateReplicationConfigurationParams {
    pub fn validate(&self) -> Result<()> {
        warn_if_empty(
            "UpdateReplicationConfiguration",
            "source-server-id",
            &self.source_server_id,
        );
        if matches!(self.bandwidth_throttling, Some(bw) if bw < 0) {
            return Err(Error::InvalidParameter(
                "bandwidth-throttling must be non-negative".into(),
            ));
        }
        if let Some(disk_type) = &self.default_large_staging_disk_type {
            validate_enum_member(
                "default-large-staging-disk-type",
                disk_type,
                ReplicationConfigurationDefaultLargeStagingDiskType::values(),
            )?;
        }
        if let Some(encryption) = &self.ebs_encryption {
            validate_enum_member(
                "ebs-encryption",
                encryption,
                ReplicationConfigurationEbsEncryption::values(),
            )?;
        }
        if let Some(routing) = &self.data_plane_routing {
            validate_enum_member(
                "data-plane-routing",
                routing,
                ReplicationConfigurationDataPlaneRouting::values(),
            )?;
        }
        for disk in &self.replicated_disks {
            disk.validate()?;
        }
        Ok(())
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<ReplicationConfigInfo> {
        let mut request = ctx
            .client
            .update_replication_configuration()
            .source_server_id(&self.source_server_id);

        if let Some(name) = &self.name {
            request = request.name(name);
        }
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
        for disk in &self.replicated_disks {
            request = request.replicated_disks(disk.to_sdk());
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
            .map_err(|e| Error::api("UpdateReplicationConfiguration", e))?;
        Ok(replication_config_info!(&response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disk_spec_parses_from_json() {
        let spec: ReplicatedDiskSpec = serde_json::from_str(
            r#"{"device_name": "/dev/sda1", "is_boot_disk": true, "staging_disk_type": "GP3", "iops": 3000}"#,
        )
        .unwrap();
        assert!(spec.validate().is_ok());
        assert_eq!(spec.device_name, "/dev/sda1");
        assert_eq!(spec.throughput, None);
    }

    #[test]
    fn disk_info_maps_sdk_members() {
        let disk = ReplicationConfigurationReplicatedDisk::builder()
            .device_name("/dev/sda1")
            .iops(3000)
            .build();
        let info = ReplicatedDiskInfo::from_sdk(&disk);
        assert_eq!(info.device_name.as_deref(), Some("/dev/sda1"));
        assert_eq!(info.iops, 3000);
        assert_eq!(info.throughput, 0);
    }

    #[test]
    fn disk_spec_rejects_unknown_fields() {
        let parsed: std::result::Result<ReplicatedDiskSpec, _> =
            serde_json::from_str(r#"{"device_name": "/dev/sda1", "size_gb": 100}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn disk_spec_rejects_unknown_staging_type() {
        let spec = ReplicatedDiskSpec {
            device_name: "/dev/sdb".into(),
            is_boot_disk: None,
            staging_disk_type: Some("FLOPPY".into()),
            iops: None,
            throughput: None,
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn update_validates_enums_and_disks() {
        let params = UpdateReplicationConfigurationParams {
            source_server_id: "s-1".into(),
            data_plane_routing: Some("PUBLIC_IP".into()),
            replicated_disks: vec![ReplicatedDiskSpec {
                device_name: "/dev/sda1".into(),
                is_boot_disk: Some(true),
                staging_disk_type: Some("AUTO".into()),
                iops: None,
                throughput: None,
            }],
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }
}
