//! Nova (compute) API

use super::auth::IdentityClient;
use super::http::{join_url, path_segment, OsHttpClient};
use crate::config::ConnectionSettings;
use crate::error::FetchError;
use anyhow::{Context, Result};
use serde_json::Value;

const SERVICE_TYPE: &str = "compute";

/// Client for the compute service
#[derive(Clone)]
pub struct ComputeClient {
    http: OsHttpClient,
    endpoint: String,
    token: String,
}

impl ComputeClient {
    /// Build from the identity endpoint and credentials
    ///
    /// The compute client finds its own endpoint in the token's catalog
    /// instead of being handed one.
    pub fn connect(
        http: OsHttpClient,
        settings: &ConnectionSettings,
        identity: &IdentityClient,
    ) -> Result<Self> {
        tracing::debug!(
            "Connecting compute client for '{}' via {}",
            settings.username,
            identity.auth_url()
        );

        let endpoint = identity
            .url_for(
                SERVICE_TYPE,
                settings.endpoint_type,
                settings.region_name.as_deref(),
            )
            .context("Failed to resolve the compute endpoint")?;

        Ok(Self {
            http,
            endpoint,
            token: identity.auth_token().to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch one server, returning the bare server object
    pub async fn get_server(&self, server_id: &str) -> Result<Value> {
        let url = join_url(&self.endpoint, &format!("servers/{}", path_segment(server_id)));
        let mut response = self.http.get(&url, &self.token).await?;

        match response.get_mut("server").map(Value::take) {
            Some(server @ Value::Object(_)) => Ok(server),
            _ => Err(FetchError::MalformedResponse(format!(
                "server {} response has no 'server' object",
                server_id
            ))
            .into()),
        }
    }
}
