//! OpenStack Client Set
//!
//! One lazily built client per backend service, shared by everything that
//! runs during a single invocation.

use super::auth::IdentityClient;
use super::compute::ComputeClient;
use super::http::OsHttpClient;
use super::network::NetworkClient;
use super::orchestration::OrchestrationClient;
use crate::config::ConnectionSettings;
use anyhow::{Context, Result};
use tokio::sync::OnceCell;

const ORCHESTRATION_SERVICE: &str = "orchestration";
const NETWORK_SERVICE: &str = "network";

/// Service clients, each created on first use and reused afterwards
///
/// The identity client is always built first: it owns the token and the
/// catalog every other client is derived from.
pub struct ServiceClients {
    settings: ConnectionSettings,
    http: OsHttpClient,
    identity: OnceCell<IdentityClient>,
    orchestration: OnceCell<OrchestrationClient>,
    compute: OnceCell<ComputeClient>,
    network: OnceCell<NetworkClient>,
}

impl ServiceClients {
    pub fn new(settings: ConnectionSettings) -> Result<Self> {
        Ok(Self {
            settings,
            http: OsHttpClient::new()?,
            identity: OnceCell::new(),
            orchestration: OnceCell::new(),
            compute: OnceCell::new(),
            network: OnceCell::new(),
        })
    }

    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    pub async fn identity(&self) -> Result<&IdentityClient> {
        let (http, settings) = (&self.http, &self.settings);
        self.identity
            .get_or_try_init(|| IdentityClient::authenticate(http, settings))
            .await
    }

    pub async fn orchestration(&self) -> Result<&OrchestrationClient> {
        let identity = self.identity().await?;
        self.orchestration
            .get_or_try_init(|| async move {
                let endpoint = self.endpoint_for(identity, ORCHESTRATION_SERVICE)?;
                tracing::info!("Orchestration endpoint: {}", endpoint);
                Ok::<_, anyhow::Error>(OrchestrationClient::new(
                    self.http.clone(),
                    &endpoint,
                    identity.auth_token(),
                ))
            })
            .await
    }

    pub async fn compute(&self) -> Result<&ComputeClient> {
        let identity = self.identity().await?;
        self.compute
            .get_or_try_init(|| async move {
                let client = ComputeClient::connect(self.http.clone(), &self.settings, identity)?;
                tracing::info!("Compute endpoint: {}", client.endpoint());
                Ok::<_, anyhow::Error>(client)
            })
            .await
    }

    pub async fn network(&self) -> Result<&NetworkClient> {
        let identity = self.identity().await?;
        self.network
            .get_or_try_init(|| async move {
                let endpoint = self.endpoint_for(identity, NETWORK_SERVICE)?;
                tracing::info!("Network endpoint: {}", endpoint);
                Ok::<_, anyhow::Error>(NetworkClient::new(
                    self.http.clone(),
                    &endpoint,
                    identity.auth_token(),
                ))
            })
            .await
    }

    fn endpoint_for(&self, identity: &IdentityClient, service_type: &str) -> Result<String> {
        identity
            .url_for(
                service_type,
                self.settings.endpoint_type,
                self.settings.region_name.as_deref(),
            )
            .with_context(|| format!("Failed to resolve the {} endpoint", service_type))
    }
}
