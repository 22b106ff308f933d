//! Migration job operations: DescribeJobs, DescribeJobLogItems, DeleteJob.

use std::collections::HashMap;

use aws_sdk_mgn::types::{DescribeJobsRequestFilters, Job, JobLog, ParticipatingServer};
use chrono::DateTime;
use serde::Serialize;

use super::{validate_max_results, warn_if_empty, OpOutput};
use crate::client::OpContext;
use crate::error::{Error, Result};

/// Pipeline projection of one job.
#[derive(Debug, Clone, Serialize)]
pub struct JobInfo {
    pub job_id: String,
    pub arn: Option<String>,
    pub job_type: Option<String>,
    pub initiated_by: Option<String>,
    pub status: Option<String>,
    pub creation_date_time: Option<String>,
    pub end_date_time: Option<String>,
    pub participating_servers: Vec<ParticipatingServerInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipatingServerInfo {
    pub source_server_id: String,
    pub launch_status: Option<String>,
    pub launched_ec2_instance_id: Option<String>,
}

impl JobInfo {
    pub(crate) fn from_sdk(job: &Job) -> Self {
        Self {
            job_id: job.job_id().to_string(),
            arn: job.arn().map(str::to_string),
            job_type: job.r#type().map(|t| t.as_str().to_string()),
            initiated_by: job.initiated_by().map(|i| i.as_str().to_string()),
            status: job.status().map(|s| s.as_str().to_string()),
            creation_date_time: job.creation_date_time().map(str::to_string),
            end_date_time: job.end_date_time().map(str::to_string),
            participating_servers: job
                .participating_servers()
                .iter()
                .map(ParticipatingServerInfo::from_sdk)
                .collect(),
            tags: job.tags().cloned(),
        }
    }
}

impl ParticipatingServerInfo {
    fn from_sdk(server: &ParticipatingServer) -> Self {
        Self {
            source_server_id: server.source_server_id().to_string(),
            launch_status: server.launch_status().map(|s| s.as_str().to_string()),
            launched_ec2_instance_id: server
                .launched_ec2_instance_id()
                .map(str::to_string),
        }
    }
}

/// One entry from a job's event log.
#[derive(Debug, Clone, Serialize)]
pub struct JobLogInfo {
    pub log_date_time: Option<String>,
    pub event: Option<String>,
    pub source_server_id: Option<String>,
    pub conversion_server_id: Option<String>,
    pub target_instance_id: Option<String>,
    pub raw_error: Option<String>,
}

impl JobLogInfo {
    fn from_sdk(log: &JobLog) -> Self {
        let data = log.event_data();
        Self {
            log_date_time: log.log_date_time().map(str::to_string),
            event: log.event().map(|e| e.as_str().to_string()),
            source_server_id: data
                .and_then(|d| d.source_server_id())
                .map(str::to_string),
            conversion_server_id: data
                .and_then(|d| d.conversion_server_id())
                .map(str::to_string),
            target_instance_id: data
                .and_then(|d| d.target_instance_id())
                .map(str::to_string),
            raw_error: data.and_then(|d| d.raw_error()).map(str::to_string),
        }
    }
}

// ============================================================================
// DescribeJobs
// ============================================================================

/// Parameters for DescribeJobs.
#[derive(Debug, Clone, Default)]
pub struct DescribeJobsParams {
    pub job_ids: Vec<String>,
    /// Lower creation-time bound, RFC 3339
    pub from_date: Option<String>,
    /// Upper creation-time bound, RFC 3339
    pub to_date: Option<String>,
    pub max_results: Option<i32>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DescribeJobsOutput {
    pub items: Vec<JobInfo>,
    pub next_token: Option<String>,
}

impl OpOutput for DescribeJobsOutput {
    fn default_projection(&self) -> Option<&'static str> {
        Some("items")
    }
}

fn validate_date(parameter: &str, value: &str) -> Result<()> {
    DateTime::parse_from_rfc3339(value).map_err(|e| {
        Error::InvalidParameter(format!(
            "{parameter} must be an RFC 3339 datetime, got {value:?}: {e}"
        ))
    })?;
    Ok(())
}

impl DescribeJobsParams {
    pub fn validate(&self) -> Result<()> {
        validate_max_results(self.max_results)?;
        if let Some(from) = &self.from_date {
            validate_date("from-date", from)?;
        }
        if let Some(to) = &self.to_date {
            validate_date("to-date", to)?;
        }
        Ok(())
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<DescribeJobsOutput> {
        let mut filters = DescribeJobsRequestFilters::builder();
        for id in &self.job_ids {
            warn_if_empty("DescribeJobs", "job-ids", id);
            filters = filters.job_ids(id);
        }
        if let Some(from) = &self.from_date {
            filters = filters.from_date(from);
        }
        if let Some(to) = &self.to_date {
            filters = filters.to_date(to);
        }

        let mut request = ctx.client.describe_jobs().filters(filters.build());
        if let Some(max_results) = self.max_results {
            request = request.max_results(max_results);
        }
        if let Some(token) = &self.next_token {
            request = request.next_token(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::api("DescribeJobs", e))?;

        Ok(DescribeJobsOutput {
            items: response.items().iter().map(JobInfo::from_sdk).collect(),
            next_token: response.next_token().map(str::to_string),
        })
    }
}

// ============================================================================
// DescribeJobLogItems
// ============================================================================

/// Parameters for DescribeJobLogItems.
#[derive(Debug, Clone, Default)]
pub struct DescribeJobLogItemsParams {
    pub job_id: String,
    pub max_results: Option<i32>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DescribeJobLogItemsOutput {
    pub items: Vec<JobLogInfo>,
    pub next_token: Option<String>,
}

impl OpOutput for DescribeJobLogItemsOutput {
    fn default_projection(&self) -> Option<&'static str> {
        Some("items")
    }
}

impl DescribeJobLogItemsParams {
    pub fn validate(&self) -> Result<()> {
        warn_if_empty("DescribeJobLogItems", "job-id", &self.job_id);
        validate_max_results(self.max_results)
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<DescribeJobLogItemsOutput> {
        let mut request = ctx.client.describe_job_log_items().job_id(&self.job_id);
        if let Some(max_results) = self.max_results {
            request = request.max_results(max_results);
        }
        if let Some(token) = &self.next_token {
            request = request.next_token(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::api("DescribeJobLogItems", e))?;

        Ok(DescribeJobLogItemsOutput {
            items: response.items().iter().map(JobLogInfo::from_sdk).collect(),
            next_token: response.next_token().map(str::to_string),
        })
    }
}

// ============================================================================
// DeleteJob
// ============================================================================

/// Parameters for DeleteJob.
#[derive(Debug, Clone)]
pub struct DeleteJobParams {
    pub job_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteJobOutput {
    pub job_id: String,
}

impl OpOutput for DeleteJobOutput {}

impl DeleteJobParams {
    pub fn validate(&self) -> Result<()> {
        warn_if_empty("DeleteJob", "job-id", &self.job_id);
        Ok(())
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<DeleteJobOutput> {
        ctx.client
            .delete_job()
            .job_id(&self.job_id)
            .send()
            .await
            .map_err(|e| Error::api("DeleteJob", e))?;
        Ok(DeleteJobOutput {
            job_id: self.job_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_dates_must_be_rfc3339() {
        let mut params = DescribeJobsParams {
            from_date: Some("2024-03-01T00:00:00Z".into()),
            to_date: Some("2024-03-02T12:30:00+02:00".into()),
            ..Default::default()
        };
        assert!(params.validate().is_ok());

        params.to_date = Some("yesterday".into());
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("to-date"));
    }

    #[test]
    fn log_items_page_size_bounds() {
        let params = DescribeJobLogItemsParams {
            job_id: "mgnjob-1".into(),
            max_results: Some(-5),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
