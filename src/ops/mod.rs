//! Operation layer: one typed parameter struct per MGN API call.
//!
//! Every operation follows the same mechanical shape: bind parameters into a
//! typed struct, `validate()` synchronously before any network traffic,
//! build exactly one SDK request, invoke one `send()`, and project the
//! response into serializable output DTOs for the pipeline. Retries,
//! signing, and transport all belong to the SDK.
//!
//! One deliberate leniency carried over from the original tooling: a
//! required identifier that arrives empty from the pipeline produces a
//! warning and the call still goes out (the service rejects it). Everything
//! else (enum member names, numeric ranges, date formats) fails fast in
//! `validate()`.

pub mod job;
pub mod launch_config;
pub mod lifecycle;
pub mod replication_config;
pub mod replication_template;
pub mod service;
pub mod source_server;
pub mod tags;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::select::Select;

/// An operation output that knows its natural default projection.
pub trait OpOutput: Serialize {
    /// Property path projected when [`Select::Default`] is in effect; `None`
    /// means the whole response.
    fn default_projection(&self) -> Option<&'static str> {
        None
    }
}

/// Applies the select mode to an operation output.
pub fn project<T: OpOutput>(select: &Select, output: &T) -> Result<Value> {
    select.project(output, output.default_projection())
}

/// Warn-and-proceed handling for identifiers that arrive empty from the
/// pipeline; see the module docs.
pub(crate) fn warn_if_empty(operation: &'static str, parameter: &'static str, value: &str) {
    if value.trim().is_empty() {
        tracing::warn!(
            operation,
            parameter,
            "required parameter is empty; the service call will likely fail"
        );
    }
}

/// Checks a raw string against a service enum's known members and fails
/// before any network call on a typo.
pub(crate) fn validate_enum_member(
    parameter: &'static str,
    value: &str,
    known: &'static [&'static str],
) -> Result<()> {
    if known.contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!(
            "{parameter} must be one of {}, got '{value}'",
            known.join(", ")
        )))
    }
}

/// Validates a positive page size.
pub(crate) fn validate_max_results(max_results: Option<i32>) -> Result<()> {
    match max_results {
        Some(n) if n < 1 => Err(Error::InvalidParameter(
            "max-results must be at least 1".to_string(),
        )),
        _ => Ok(()),
    }
}
