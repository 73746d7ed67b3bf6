//! Heat (orchestration) API
//!
//! Stack lookup and resource listing.

use super::http::{join_url, path_segment, OsHttpClient};
use crate::error::FetchError;
use anyhow::Result;
use serde_json::Value;

/// Client for the orchestration service
#[derive(Clone)]
pub struct OrchestrationClient {
    http: OsHttpClient,
    endpoint: String,
    token: String,
}

impl OrchestrationClient {
    pub fn new(http: OsHttpClient, endpoint: &str, token: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.to_string(),
            token: token.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// List stacks whose name matches `name` exactly
    pub async fn list_stacks_by_name(&self, name: &str) -> Result<Vec<Value>> {
        let url = join_url(&self.endpoint, "stacks");
        let response = self
            .http
            .get_with_query(&url, &self.token, Some(&[("name", name)]))
            .await?;

        take_array(response, "stacks")
    }

    /// List every resource of a stack, in the order Heat reports them
    pub async fn list_resources(&self, stack_id: &str) -> Result<Vec<Value>> {
        let url = join_url(
            &self.endpoint,
            &format!("stacks/{}/resources", path_segment(stack_id)),
        );
        let response = self.http.get(&url, &self.token).await?;

        take_array(response, "resources")
    }
}

/// Pull the list under `key` out of a collection response
fn take_array(mut response: Value, key: &str) -> Result<Vec<Value>> {
    match response.get_mut(key).map(Value::take) {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(FetchError::MalformedResponse(format!("missing '{}' list", key)).into()),
    }
}
