//! Source server inventory operations.
//!
//! Covers DescribeSourceServers with its request filters plus the
//! single-server verbs: DeleteSourceServer, MarkAsArchived,
//! DisconnectFromService, RetryDataReplication and
//! ChangeServerLifeCycleState.

use std::collections::HashMap;

use aws_sdk_mgn::types::{
    ChangeServerLifeCycleStateSourceServerLifecycle,
    ChangeServerLifeCycleStateSourceServerLifecycleState, DescribeSourceServersRequestFilters,
    LifeCycleState, ReplicationType, SourceServer,
};
use serde::Serialize;

use super::{validate_enum_member, validate_max_results, warn_if_empty, OpOutput};
use crate::client::OpContext;
use crate::error::{Error, Result};

/// Pipeline projection of one source server.
#[derive(Debug, Clone, Serialize)]
pub struct SourceServerInfo {
    pub source_server_id: Option<String>,
    pub arn: Option<String>,
    pub is_archived: Option<bool>,
    pub replication_type: Option<String>,
    pub lifecycle_state: Option<String>,
    pub added_to_service: Option<String>,
    pub last_seen_by_service: Option<String>,
    pub data_replication_state: Option<String>,
    pub data_replication_eta: Option<String>,
    pub data_replication_lag: Option<String>,
    pub data_replication_error: Option<String>,
    pub hostname: Option<String>,
    pub fqdn: Option<String>,
    pub os: Option<String>,
    pub recommended_instance_type: Option<String>,
    pub launched_ec2_instance_id: Option<String>,
    pub launch_job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
}

/// The MGN single-server verbs return responses whose accessors mirror
/// `SourceServer` member-for-member, so the projection is shared between
/// `SourceServer` and those operation outputs.
macro_rules! source_server_info {
    ($server:expr) => {{
        let server = $server;
        let life_cycle = server.life_cycle();
        let replication = server.data_replication_info();
        let properties = server.source_properties();
        let hints = properties.and_then(|p| p.identification_hints());
        let launched = server.launched_instance();

        SourceServerInfo {
            source_server_id: server.source_server_id().map(str::to_string),
            arn: server.arn().map(str::to_string),
            is_archived: server.is_archived(),
            replication_type: server.replication_type().map(|t| t.as_str().to_string()),
            lifecycle_state: life_cycle
                .and_then(|l| l.state())
                .map(|s| s.as_str().to_string()),
            added_to_service: life_cycle
                .and_then(|l| l.added_to_service_date_time())
                .map(str::to_string),
            last_seen_by_service: life_cycle
                .and_then(|l| l.last_seen_by_service_date_time())
                .map(str::to_string),
            data_replication_state: replication
                .and_then(|r| r.data_replication_state())
                .map(|s| s.as_str().to_string()),
            data_replication_eta: replication
                .and_then(|r| r.eta_date_time())
                .map(str::to_string),
            data_replication_lag: replication
                .and_then(|r| r.lag_duration())
                .map(str::to_string),
            data_replication_error: replication
                .and_then(|r| r.data_replication_error())
                .and_then(|e| e.raw_error())
                .map(str::to_string),
            hostname: hints.and_then(|h| h.hostname()).map(str::to_string),
            fqdn: hints.and_then(|h| h.fqdn()).map(str::to_string),
            os: properties
                .and_then(|p| p.os())
                .and_then(|os| os.full_string())
                .map(str::to_string),
            recommended_instance_type: properties
                .and_then(|p| p.recommended_instance_type())
                .map(str::to_string),
            launched_ec2_instance_id: launched
                .and_then(|l| l.ec2_instance_id())
                .map(str::to_string),
            launch_job_id: launched.and_then(|l| l.job_id()).map(str::to_string),
            tags: server.tags().cloned(),
        }
    }};
}

pub(crate) use source_server_info;

impl SourceServerInfo {
    pub(crate) fn from_sdk(server: &SourceServer) -> Self {
        source_server_info!(server)
    }
}

/// Output of the single-server verbs, all of which return the updated
/// server record.
#[derive(Debug, Clone, Serialize)]
pub struct SourceServerResult {
    pub source_server: Option<SourceServerInfo>,
}

impl OpOutput for SourceServerResult {
    fn default_projection(&self) -> Option<&'static str> {
        Some("source_server")
    }
}

// ============================================================================
// DescribeSourceServers
// ============================================================================

/// Parameters for DescribeSourceServers.
#[derive(Debug, Clone, Default)]
pub struct DescribeSourceServersParams {
    /// Restrict to these server IDs
    pub source_server_ids: Vec<String>,
    /// Filter on archived state
    pub is_archived: Option<bool>,
    /// Filter on lifecycle states (service member names)
    pub lifecycle_states: Vec<String>,
    /// Filter on replication types
    pub replication_types: Vec<String>,
    /// Page size
    pub max_results: Option<i32>,
    /// Pagination token from a previous call
    pub next_token: Option<String>,
}

/// Response projection for DescribeSourceServers.
#[derive(Debug, Clone, Serialize)]
pub struct DescribeSourceServersOutput {
    pub items: Vec<SourceServerInfo>,
    pub next_token: Option<String>,
}

impl OpOutput for DescribeSourceServersOutput {
    fn default_projection(&self) -> Option<&'static str> {
        Some("items")
    }
}

impl DescribeSourceServersParams {
    pub fn validate(&self) -> Result<()> {
        validate_max_results(self.max_results)?;
        for state in &self.lifecycle_states {
            validate_enum_member("lifecycle-state", state, LifeCycleState::values())?;
        }
        for replication_type in &self.replication_types {
            validate_enum_member(
                "replication-type",
                replication_type,
                ReplicationType::values(),
            )?;
        }
        Ok(())
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<DescribeSourceServersOutput> {
        let mut filters = DescribeSourceServersRequestFilters::builder();
        for id in &self.source_server_ids {
            warn_if_empty("DescribeSourceServers", "source-server-ids", id);
            filters = filters.source_server_ids(id);
        }
        if let Some(archived) = self.is_archived {
            filters = filters.is_archived(archived);
        }
        for state in &self.lifecycle_states {
            filters = filters.life_cycle_states(LifeCycleState::from(state.as_str()));
        }
        for replication_type in &self.replication_types {
            filters = filters.replication_types(ReplicationType::from(replication_type.as_str()));
        }

        let mut request = ctx.client.describe_source_servers().filters(filters.build());
        if let Some(max_results) = self.max_results {
            request = request.max_results(max_results);
        }
        if let Some(token) = &self.next_token {
            request = request.next_token(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::api("DescribeSourceServers", e))?;

        Ok(DescribeSourceServersOutput {
            items: response.items().iter().map(SourceServerInfo::from_sdk).collect(),
            next_token: response.next_token().map(str::to_string),
        })
    }
}

// ============================================================================
// Single-server verbs
// ============================================================================

/// Parameters for DeleteSourceServer.
#[derive(Debug, Clone)]
pub struct DeleteSourceServerParams {
    pub source_server_id: String,
}

/// Echo of the deleted server id.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteSourceServerOutput {
    pub source_server_id: String,
}

impl OpOutput for DeleteSourceServerOutput {}

impl DeleteSourceServerParams {
    pub fn validate(&self) -> Result<()> {
        warn_if_empty("DeleteSourceServer", "source-server-id", &self.source_server_id);
        Ok(())
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<DeleteSourceServerOutput> {
        ctx.client
            .delete_source_server()
            .source_server_id(&self.source_server_id)
            .send()
            .await
            .map_err(|e| Error::api("DeleteSourceServer", e))?;
        Ok(DeleteSourceServerOutput {
            source_server_id: self.source_server_id.clone(),
        })
    }
}

/// Parameters for MarkAsArchived.
#[derive(Debug, Clone)]
pub struct MarkAsArchivedParams {
    pub source_server_id: String,
}

impl MarkAsArchivedParams {
    pub fn validate(&self) -> Result<()> {
        warn_if_empty("MarkAsArchived", "source-server-id", &self.source_server_id);
        Ok(())
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<SourceServerResult> {
        let response = ctx
            .client
            .mark_as_archived()
            .source_server_id(&self.source_server_id)
            .send()
            .await
            .map_err(|e| Error::api("MarkAsArchived", e))?;
        Ok(SourceServerResult {
            source_server: Some(source_server_info!(&response)),
        })
    }
}

/// Parameters for DisconnectFromService.
#[derive(Debug, Clone)]
pub struct DisconnectFromServiceParams {
    pub source_server_id: String,
}

impl DisconnectFromServiceParams {
    pub fn validate(&self) -> Result<()> {
        warn_if_empty(
            "DisconnectFromService",
            "source-server-id",
            &self.source_server_id,
        );
        Ok(())
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<SourceServerResult> {
        let response = ctx
            .client
            .disconnect_from_service()
            .source_server_id(&self.source_server_id)
            .send()
            .await
            .map_err(|e| Error::api("DisconnectFromService", e))?;
        Ok(SourceServerResult {
            source_server: Some(source_server_info!(&response)),
        })
    }
}

/// Parameters for RetryDataReplication.
#[derive(Debug, Clone)]
pub struct RetryDataReplicationParams {
    pub source_server_id: String,
}

impl RetryDataReplicationParams {
    pub fn validate(&self) -> Result<()> {
        warn_if_empty(
            "RetryDataReplication",
            "source-server-id",
            &self.source_server_id,
        );
        Ok(())
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<SourceServerResult> {
        let response = ctx
            .client
            .retry_data_replication()
            .source_server_id(&self.source_server_id)
            .send()
            .await
            .map_err(|e| Error::api("RetryDataReplication", e))?;
        Ok(SourceServerResult {
            source_server: Some(source_server_info!(&response)),
        })
    }
}

/// Parameters for ChangeServerLifeCycleState.
#[derive(Debug, Clone)]
pub struct ChangeServerLifeCycleStateParams {
    pub source_server_id: String,
    /// Target state: READY_FOR_TEST, READY_FOR_CUTOVER or CUTOVER
    pub lifecycle_state: String,
}

impl ChangeServerLifeCycleStateParams {
    pub fn validate(&self) -> Result<()> {
        warn_if_empty(
            "ChangeServerLifeCycleState",
            "source-server-id",
            &self.source_server_id,
        );
        validate_enum_member(
            "lifecycle-state",
            &self.lifecycle_state,
            ChangeServerLifeCycleStateSourceServerLifecycleState::values(),
        )
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<SourceServerResult> {
        let life_cycle = ChangeServerLifeCycleStateSourceServerLifecycle::builder()
            .state(ChangeServerLifeCycleStateSourceServerLifecycleState::from(
                self.lifecycle_state.as_str(),
            ))
            .build()
            .map_err(|e| Error::InvalidParameter(e.to_string()))?;

        let response = ctx
            .client
            .change_server_life_cycle_state()
            .source_server_id(&self.source_server_id)
            .life_cycle(life_cycle)
            .send()
            .await
            .map_err(|e| Error::api("ChangeServerLifeCycleState", e))?;
        Ok(SourceServerResult {
            source_server: Some(source_server_info!(&response)),
        })
    }
}
