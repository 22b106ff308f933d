//! # mgnctl - a typed CLI surface for AWS Application Migration Service
//!
//! mgnctl wraps the AWS Application Migration Service (MGN) API in typed
//! operations with validation that runs before any network traffic, a
//! progress-reporting runner for long calls, and a credential profile chain
//! that prefers the OS keychain over the shared credentials file.
//!
//! ## Core Concepts
//!
//! - **Operations**: one typed parameter struct per MGN API call, with
//!   `validate()` and a single `send()` ([`ops`])
//! - **Projection**: a select expression picks what part of a response is
//!   written to the pipeline ([`select`])
//! - **Progress**: a snapshot mailbox polled at a fixed interval while the
//!   call runs ([`progress`])
//! - **Profiles**: named credentials resolved keychain-first ([`credentials`])
//!
//! ## Example
//!
//! ```rust,ignore
//! use mgnctl::client::{build_context, ClientSettings};
//! use mgnctl::ops::source_server::DescribeSourceServersParams;
//! use mgnctl::select::Select;
//!
//! #[tokio::main]
//! async fn main() -> mgnctl::error::Result<()> {
//!     let settings = ClientSettings {
//!         region: Some("eu-west-1".into()),
//!         ..Default::default()
//!     };
//!     let ctx = build_context(&settings, Select::Default).await?;
//!
//!     let params = DescribeSourceServersParams::default();
//!     params.validate()?;
//!     let servers = params.send(&ctx).await?;
//!     for server in &servers.items {
//!         println!("{:?}", server.hostname);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

/// Error types and result alias covering API failures, credential stores,
/// parameter validation, and projection paths.
pub mod error;

/// Service client construction: settings resolution, region and endpoint
/// defaults, credential wiring.
pub mod client;

/// Layered configuration loading from standard file locations and
/// environment variables.
pub mod config;

/// Credential profile storage and resolution. Keychain first, shared
/// credentials file as the fallback.
pub mod credentials;

/// The operation layer: one module per resource family, one typed parameter
/// struct per MGN API call.
pub mod ops;

/// Progress reporting for long service calls: snapshot tracker, record
/// sink, and the polling runner.
pub mod progress;

/// Response projection: default views, whole responses, and property paths.
pub mod select;

pub use error::{Error, Result};
