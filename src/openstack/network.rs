//! Neutron (network) API
//!
//! Single-object lookups. Each returns the response body unchanged, e.g.
//! `{"network": {...}}`.

use super::http::{join_url, path_segment, OsHttpClient};
use anyhow::Result;
use serde_json::Value;

const API_PREFIX: &str = "v2.0";

/// Client for the network service
#[derive(Clone)]
pub struct NetworkClient {
    http: OsHttpClient,
    endpoint: String,
    token: String,
}

impl NetworkClient {
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

    pub async fn show_network(&self, id: &str) -> Result<Value> {
        self.show("networks", id).await
    }

    pub async fn show_subnet(&self, id: &str) -> Result<Value> {
        self.show("subnets", id).await
    }

    pub async fn show_router(&self, id: &str) -> Result<Value> {
        self.show("routers", id).await
    }

    pub async fn show_port(&self, id: &str) -> Result<Value> {
        self.show("ports", id).await
    }

    pub async fn show_floatingip(&self, id: &str) -> Result<Value> {
        self.show("floatingips", id).await
    }

    async fn show(&self, collection: &str, id: &str) -> Result<Value> {
        let url = self.object_url(collection, id);
        self.http.get(&url, &self.token).await
    }

    fn object_url(&self, collection: &str, id: &str) -> String {
        join_url(
            &self.endpoint,
            &format!("{}/{}/{}", API_PREFIX, collection, path_segment(id)),
        )
    }
}
