//! Account-level service operations.

use serde::Serialize;

use super::OpOutput;
use crate::client::OpContext;
use crate::error::{Error, Result};

/// Parameters for InitializeService. The call takes no inputs; it creates
/// the service-linked roles and templates MGN needs in the account.
#[derive(Debug, Clone, Default)]
pub struct InitializeServiceParams;

/// InitializeService returns an empty body; the output records that the
/// call went through.
#[derive(Debug, Clone, Serialize)]
pub struct InitializeServiceOutput {
    pub initialized: bool,
    pub region: String,
}

impl OpOutput for InitializeServiceOutput {}

impl InitializeServiceParams {
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<InitializeServiceOutput> {
        ctx.client
            .initialize_service()
            .send()
            .await
            .map_err(|e| Error::api("InitializeService", e))?;
        Ok(InitializeServiceOutput {
            initialized: true,
            region: ctx.region.clone(),
        })
    }
}
