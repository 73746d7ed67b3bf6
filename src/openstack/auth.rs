//! Keystone Authentication
//!
//! Password authentication against the Identity v2.0 API. A successful
//! authentication yields a token and the service catalog that every other
//! client uses to find its endpoint.

use super::http::{join_url, OsHttpClient};
use crate::config::{ConnectionSettings, EndpointType};
use crate::error::FetchError;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

/// Body of a `POST /tokens` response
#[derive(Debug, Deserialize)]
struct TokensResponse {
    access: Access,
}

#[derive(Debug, Deserialize)]
struct Access {
    token: Token,
    #[serde(default, rename = "serviceCatalog")]
    service_catalog: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct Token {
    id: String,
    #[serde(default)]
    expires: Option<String>,
}

/// One service in the catalog
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub endpoints: Vec<CatalogEndpoint>,
}

/// One regional endpoint of a catalog service
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEndpoint {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, rename = "publicURL")]
    pub public_url: Option<String>,
    #[serde(default, rename = "internalURL")]
    pub internal_url: Option<String>,
    #[serde(default, rename = "adminURL")]
    pub admin_url: Option<String>,
}

impl CatalogEndpoint {
    fn url(&self, endpoint_type: EndpointType) -> Option<&str> {
        match endpoint_type {
            EndpointType::Public => self.public_url.as_deref(),
            EndpointType::Internal => self.internal_url.as_deref(),
            EndpointType::Admin => self.admin_url.as_deref(),
        }
    }
}

/// Authenticated identity client: token plus service catalog
#[derive(Debug, Clone)]
pub struct IdentityClient {
    auth_url: String,
    token: String,
    expires_at: Option<DateTime<Utc>>,
    catalog: Vec<CatalogEntry>,
}

impl IdentityClient {
    /// Authenticate with username, password and tenant name
    pub async fn authenticate(http: &OsHttpClient, settings: &ConnectionSettings) -> Result<Self> {
        let url = join_url(&settings.auth_url, "tokens");
        tracing::info!(
            "Authenticating user '{}' on tenant '{}' at {}",
            settings.username,
            settings.tenant_name,
            settings.auth_url
        );

        let body = json!({
            "auth": {
                "passwordCredentials": {
                    "username": settings.username,
                    "password": settings.password,
                },
                "tenantName": settings.tenant_name,
            }
        });

        let response = http
            .post_json(&url, &body)
            .await
            .context("Failed to authenticate with the identity service")?;

        let client = Self::from_response(&settings.auth_url, response)?;
        match client.expires_at {
            Some(expiry) => tracing::debug!("Token issued, expires at {}", expiry),
            None => tracing::debug!("Token issued without an expiry"),
        }
        tracing::debug!("Service catalog has {} entries", client.catalog.len());

        Ok(client)
    }

    fn from_response(auth_url: &str, response: serde_json::Value) -> Result<Self> {
        let parsed: TokensResponse = serde_json::from_value(response)
            .map_err(|e| FetchError::MalformedResponse(format!("token response: {}", e)))?;

        let expires_at = parsed.access.token.expires.as_deref().and_then(parse_expiry);

        Ok(Self {
            auth_url: auth_url.to_string(),
            token: parsed.access.token.id,
            expires_at,
            catalog: parsed.access.service_catalog,
        })
    }

    /// Identity endpoint this client authenticated against
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Token to send as `X-Auth-Token`
    pub fn auth_token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Look up a service endpoint in the catalog
    ///
    /// The first endpoint of the first matching service wins; with a region
    /// the endpoint must belong to that region.
    pub fn url_for(
        &self,
        service_type: &str,
        endpoint_type: EndpointType,
        region: Option<&str>,
    ) -> Result<String> {
        self.catalog
            .iter()
            .filter(|entry| entry.service_type == service_type)
            .flat_map(|entry| entry.endpoints.iter())
            .filter(|endpoint| match region {
                Some(region) => endpoint.region.as_deref() == Some(region),
                None => true,
            })
            .find_map(|endpoint| endpoint.url(endpoint_type))
            .map(str::to_string)
            .ok_or_else(|| {
                FetchError::EndpointNotFound {
                    service_type: service_type.to_string(),
                    endpoint_type: endpoint_type.as_str().to_string(),
                }
                .into()
            })
    }
}

/// Keystone v2 expiry, e.g. `2026-10-18T12:00:00Z`
fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!("Unparseable token expiry '{}': {}", raw, e);
            None
        }
    }
}
