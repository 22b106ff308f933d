//! Integration tests for parameter validation and response projection.

use serde_json::json;

use mgnctl::ops::job::DescribeJobsParams;
use mgnctl::ops::lifecycle::StartTestParams;
use mgnctl::ops::source_server::{
    ChangeServerLifeCycleStateParams, DescribeSourceServersOutput, DescribeSourceServersParams,
    SourceServerInfo,
};
use mgnctl::ops;
use mgnctl::select::Select;
use mgnctl::Error;

fn server(id: &str, hostname: &str) -> SourceServerInfo {
    SourceServerInfo {
        source_server_id: Some(id.to_string()),
        arn: None,
        is_archived: Some(false),
        replication_type: Some("AGENT_BASED".to_string()),
        lifecycle_state: Some("READY_FOR_TEST".to_string()),
        added_to_service: None,
        last_seen_by_service: Some("2024-03-01T00:00:00Z".to_string()),
        data_replication_state: Some("CONTINUOUS".to_string()),
        data_replication_eta: None,
        data_replication_lag: None,
        data_replication_error: None,
        hostname: Some(hostname.to_string()),
        fqdn: None,
        os: None,
        recommended_instance_type: None,
        launched_ec2_instance_id: None,
        launch_job_id: None,
        tags: None,
    }
}

#[test]
fn default_projection_picks_the_item_list() {
    let output = DescribeSourceServersOutput {
        items: vec![server("s-1", "web01"), server("s-2", "db01")],
        next_token: None,
    };

    let value = ops::project(&Select::Default, &output).unwrap();
    assert!(value.is_array());
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[0]["source_server_id"], json!("s-1"));
}

#[test]
fn response_projection_keeps_the_pagination_token() {
    let output = DescribeSourceServersOutput {
        items: vec![server("s-1", "web01")],
        next_token: Some("token-1".to_string()),
    };

    let value = ops::project(&Select::Response, &output).unwrap();
    assert_eq!(value["next_token"], json!("token-1"));
    assert_eq!(value["items"][0]["hostname"], json!("web01"));
}

#[test]
fn path_projection_reaches_into_items() {
    let output = DescribeSourceServersOutput {
        items: vec![server("s-1", "web01"), server("s-2", "db01")],
        next_token: None,
    };

    let select = Select::parse("items[1].hostname").unwrap();
    let value = ops::project(&select, &output).unwrap();
    assert_eq!(value, json!("db01"));
}

#[test]
fn unresolved_paths_project_to_null() {
    let output = DescribeSourceServersOutput {
        items: vec![],
        next_token: None,
    };

    let select = Select::parse("items[3].no_such_field").unwrap();
    let value = ops::project(&select, &output).unwrap();
    assert!(value.is_null());
}

#[test]
fn malformed_select_fails_before_any_call() {
    for raw in ["items[", "items[one]", ".leading", "a..b", "items[0]extra"] {
        let err = Select::parse(raw).unwrap_err();
        assert!(matches!(err, Error::SelectPath { .. }), "accepted {raw:?}");
    }
}

#[test]
fn describe_source_servers_rejects_unknown_filter_members() {
    let params = DescribeSourceServersParams {
        lifecycle_states: vec!["ALMOST_READY".into()],
        ..Default::default()
    };
    let err = params.validate().unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("lifecycle-state"));
    assert!(rendered.contains("ALMOST_READY"));
}

#[test]
fn lifecycle_change_rejects_lowercase_members() {
    let params = ChangeServerLifeCycleStateParams {
        source_server_id: "s-1".into(),
        lifecycle_state: "cutover".into(),
    };
    assert!(params.validate().is_err());
}

#[test]
fn describe_jobs_rejects_bad_dates_and_page_sizes() {
    let params = DescribeJobsParams {
        from_date: Some("last tuesday".into()),
        ..Default::default()
    };
    assert!(matches!(
        params.validate().unwrap_err(),
        Error::InvalidParameter(_)
    ));

    let params = DescribeJobsParams {
        max_results: Some(0),
        ..Default::default()
    };
    assert!(params.validate().is_err());
}

#[test]
fn start_test_requires_a_batch() {
    let params = StartTestParams::default();
    assert!(matches!(
        params.validate().unwrap_err(),
        Error::MissingParameter(_)
    ));
}
