//! Resource tagging: ListTagsForResource, TagResource, UntagResource.

use std::collections::HashMap;

use serde::Serialize;

use super::{warn_if_empty, OpOutput};
use crate::client::OpContext;
use crate::error::{Error, Result};

/// Parameters for ListTagsForResource.
#[derive(Debug, Clone)]
pub struct ListTagsParams {
    pub resource_arn: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListTagsOutput {
    pub resource_arn: String,
    pub tags: HashMap<String, String>,
}

impl OpOutput for ListTagsOutput {
    fn default_projection(&self) -> Option<&'static str> {
        Some("tags")
    }
}

impl ListTagsParams {
    pub fn validate(&self) -> Result<()> {
        warn_if_empty("ListTagsForResource", "resource-arn", &self.resource_arn);
        Ok(())
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<ListTagsOutput> {
        let response = ctx
            .client
            .list_tags_for_resource()
            .resource_arn(&self.resource_arn)
            .send()
            .await
            .map_err(|e| Error::api("ListTagsForResource", e))?;
        Ok(ListTagsOutput {
            resource_arn: self.resource_arn.clone(),
            tags: response.tags().cloned().unwrap_or_default(),
        })
    }
}

/// Parameters for TagResource.
#[derive(Debug, Clone)]
pub struct TagResourceParams {
    pub resource_arn: String,
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagResourceOutput {
    pub resource_arn: String,
    pub applied: usize,
}

impl OpOutput for TagResourceOutput {}

impl TagResourceParams {
    pub fn validate(&self) -> Result<()> {
        warn_if_empty("TagResource", "resource-arn", &self.resource_arn);
        if self.tags.is_empty() {
            return Err(Error::MissingParameter(
                "TagResource requires at least one tag".into(),
            ));
        }
        Ok(())
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<TagResourceOutput> {
        let mut request = ctx.client.tag_resource().resource_arn(&self.resource_arn);
        for (key, value) in &self.tags {
            request = request.tags(key, value);
        }
        request
            .send()
            .await
            .map_err(|e| Error::api("TagResource", e))?;
        Ok(TagResourceOutput {
            resource_arn: self.resource_arn.clone(),
            applied: self.tags.len(),
        })
    }
}

/// Parameters for UntagResource.
#[derive(Debug, Clone)]
pub struct UntagResourceParams {
    pub resource_arn: String,
    pub tag_keys: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UntagResourceOutput {
    pub resource_arn: String,
    pub removed: usize,
}

impl OpOutput for UntagResourceOutput {}

impl UntagResourceParams {
    pub fn validate(&self) -> Result<()> {
        warn_if_empty("UntagResource", "resource-arn", &self.resource_arn);
        if self.tag_keys.is_empty() {
            return Err(Error::MissingParameter(
                "UntagResource requires at least one tag key".into(),
            ));
        }
        Ok(())
    }

    pub async fn send(&self, ctx: &OpContext) -> Result<UntagResourceOutput> {
        let mut request = ctx.client.untag_resource().resource_arn(&self.resource_arn);
        for key in &self.tag_keys {
            request = request.tag_keys(key);
        }
        request
            .send()
            .await
            .map_err(|e| Error::api("UntagResource", e))?;
        Ok(UntagResourceOutput {
            resource_arn: self.resource_arn.clone(),
            removed: self.tag_keys.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagging_requires_tags() {
        let params = TagResourceParams {
            resource_arn: "arn:aws:mgn:us-east-1:123456789012:source-server/s-1".into(),
            tags: HashMap::new(),
        };
        assert!(matches!(
            params.validate().unwrap_err(),
            Error::MissingParameter(_)
        ));
    }

    #[test]
    fn untagging_requires_keys() {
        let params = UntagResourceParams {
            resource_arn: "arn:aws:mgn:us-east-1:123456789012:source-server/s-1".into(),
            tag_keys: Vec::new(),
        };
        assert!(params.validate().is_err());
    }
}
