//! Launch lifecycle operations.
//!
//! StartTest, StartCutover and TerminateTargetInstances each accept a batch
//! of source servers and return the job that was kicked off for them.
//! FinalizeCutover closes out a single server and returns its updated record.

use std::collections::HashMap;

use serde::Serialize;

use super::job::JobInfo;
use super::source_server::{source_server_info, SourceServerInfo, SourceServerResult};
use super::{warn_if_empty, OpOutput};
use crate::client::OpContext;
use crate::error::{Error, Result};

/// Output of the job-starting verbs.
#[derive(Debug, Clone, Serialize)]
pub struct JobResult {
    pub job: Option<JobInfo>,
}

impl OpOutput for JobResult {
    fn default_projection(&self) -> Option<&'static str> {
        Some("job")
    }
}

/// Parameters for StartTest.
#[derive(Debug, Clone, Default)]
pub struct StartTestParams {
    pub source_server_ids: Vec<String>,
    pub tags: HashMap<String, String>,
}

impl StartTestParams {
    pub fn validate(&self) -> Result<()> {
        if self.source_server_ids.is_empty() {
            return Err(Error::MissingParameter(
                "StartTest requires at least one source-server-id".into(),
            ));
        }
        for id in &self.source_server_ids {
            warn_if_empty("StartTest", "source-server-ids", id);
        }
        Ok(())
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<JobResult> {
        let mut request = ctx.client.start_test();
        for id in &self.source_server_ids {
            request = request.source_server_ids(id);
        }
        for (key, value) in &self.tags {
            request = request.tags(key, value);
        }

        let response = request.send().await.map_err(|e| Error::api("StartTest", e))?;
        Ok(JobResult {
            job: response.job().map(JobInfo::from_sdk),
        })
    }
}

/// Parameters for StartCutover.
#[derive(Debug, Clone, Default)]
pub struct StartCutoverParams {
    pub source_server_ids: Vec<String>,
    pub tags: HashMap<String, String>,
}

impl StartCutoverParams {
    pub fn validate(&self) -> Result<()> {
        if self.source_server_ids.is_empty() {
            return Err(Error::MissingParameter(
                "StartCutover requires at least one source-server-id".into(),
            ));
        }
        for id in &self.source_server_ids {
            warn_if_empty("StartCutover", "source-server-ids", id);
        }
        Ok(())
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<JobResult> {
        let mut request = ctx.client.start_cutover();
        for id in &self.source_server_ids {
            request = request.source_server_ids(id);
        }
        for (key, value) in &self.tags {
            request = request.tags(key, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::api("StartCutover", e))?;
        Ok(JobResult {
            job: response.job().map(JobInfo::from_sdk),
        })
    }
}

/// Parameters for TerminateTargetInstances.
#[derive(Debug, Clone, Default)]
pub struct TerminateTargetInstancesParams {
    pub source_server_ids: Vec<String>,
    pub tags: HashMap<String, String>,
}

impl TerminateTargetInstancesParams {
    pub fn validate(&self) -> Result<()> {
        if self.source_server_ids.is_empty() {
            return Err(Error::MissingParameter(
                "TerminateTargetInstances requires at least one source-server-id".into(),
            ));
        }
        for id in &self.source_server_ids {
            warn_if_empty("TerminateTargetInstances", "source-server-ids", id);
        }
        Ok(())
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<JobResult> {
        let mut request = ctx.client.terminate_target_instances();
        for id in &self.source_server_ids {
            request = request.source_server_ids(id);
        }
        for (key, value) in &self.tags {
            request = request.tags(key, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::api("TerminateTargetInstances", e))?;
        Ok(JobResult {
            job: response.job().map(JobInfo::from_sdk),
        })
    }
}

/// Parameters for FinalizeCutover.
#[derive(Debug, Clone)]
pub struct FinalizeCutoverParams {
    pub source_server_id: String,
}

impl FinalizeCutoverParams {
    pub fn validate(&self) -> Result<()> {
        warn_if_empty("FinalizeCutover", "source-server-id", &self.source_server_id);
        Ok(())
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<SourceServerResult> {
        let response = ctx
            .client
            .finalize_cutover()
            .source_server_id(&self.source_server_id)
            .send()
            .await
            .map_err(|e| Error::api("FinalizeCutover", e))?;
        let info: SourceServerInfo = source_server_info!(&response);
        Ok(SourceServerResult {
            source_server: Some(info),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_verbs_require_servers() {
        let params = StartTestParams::default();
        let err = params.validate().unwrap_err();
        assert!(matches!(err, Error::MissingParameter(_)));

        let params = StartCutoverParams {
            source_server_ids: vec!["s-1".into()],
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn terminate_requires_servers() {
        let params = TerminateTargetInstancesParams::default();
        assert!(params.validate().is_err());
    }
}
