//! Resource Describer
//!
//! Turns one entry of a Heat resource listing into a descriptor, either
//! with attributes from the owning service, with Heat's own description,
//! or not at all.

use super::kind::{Lookup, ResourceKind};
use crate::error::FetchError;
use crate::openstack::client::ServiceClients;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Flags deciding what happens to resources without a dedicated lookup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DescribePolicy {
    /// Drop router gateways and router interfaces
    pub ignore_heat_resources: bool,
    /// Keep any other type, described by Heat
    pub include_unsupported_resources: bool,
}

/// Where a resource's attributes come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeSource {
    Lookup(Lookup),
    /// Heat's listing entry as-is
    Raw,
    Omit,
}

impl AttributeSource {
    pub fn for_kind(kind: &ResourceKind, policy: DescribePolicy) -> Self {
        if let Some(lookup) = kind.lookup() {
            return Self::Lookup(lookup);
        }

        let glue = kind.is_glue();
        if (!policy.ignore_heat_resources && glue)
            || (policy.include_unsupported_resources && !glue)
        {
            Self::Raw
        } else {
            Self::Omit
        }
    }
}

/// One entry of `GET /stacks/{id}/resources`
#[derive(Debug, Clone)]
pub struct StackResource {
    pub physical_resource_id: String,
    pub kind: ResourceKind,
    pub resource_name: String,
    pub raw: Value,
}

#[derive(Deserialize)]
struct ResourceSummary {
    #[serde(default)]
    physical_resource_id: Option<String>,
    resource_type: String,
    resource_name: String,
}

impl StackResource {
    pub fn from_value(raw: Value) -> Result<Self> {
        let summary: ResourceSummary = serde_json::from_value(raw.clone())
            .map_err(|e| FetchError::MalformedResponse(format!("stack resource: {}", e)))?;

        Ok(Self {
            physical_resource_id: summary.physical_resource_id.unwrap_or_default(),
            kind: ResourceKind::from_tag(&summary.resource_type),
            resource_name: summary.resource_name,
            raw,
        })
    }
}

/// Flattened description of one stack resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub resource_id: String,
    pub resource_type: String,
    pub resource_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_attributes: Option<Value>,
}

/// Describe a single resource, or `None` if the policy omits it
pub async fn get_single_resource_info(
    clients: &ServiceClients,
    resource: &StackResource,
    policy: DescribePolicy,
) -> Result<Option<ResourceDescriptor>> {
    let attributes = match AttributeSource::for_kind(&resource.kind, policy) {
        AttributeSource::Lookup(lookup) => fetch_attributes(clients, lookup, resource)
            .await
            .with_context(|| {
                format!(
                    "Failed to fetch attributes of '{}' ({})",
                    resource.resource_name, resource.kind
                )
            })?,
        AttributeSource::Raw => resource.raw.clone(),
        AttributeSource::Omit => {
            tracing::debug!(
                "Skipping '{}' ({})",
                resource.resource_name,
                resource.kind
            );
            return Ok(None);
        }
    };

    Ok(Some(ResourceDescriptor {
        resource_id: resource.physical_resource_id.clone(),
        resource_type: resource.kind.as_tag().to_string(),
        resource_name: resource.resource_name.clone(),
        resource_attributes: Some(attributes),
    }))
}

async fn fetch_attributes(
    clients: &ServiceClients,
    lookup: Lookup,
    resource: &StackResource,
) -> Result<Value> {
    let id = resource.physical_resource_id.as_str();
    if id.is_empty() {
        return Err(FetchError::MissingPhysicalId {
            resource_name: resource.resource_name.clone(),
            resource_type: resource.kind.as_tag().to_string(),
        }
        .into());
    }

    tracing::debug!("{:?} lookup for '{}' ({})", lookup, resource.resource_name, id);

    match lookup {
        Lookup::Server => {
            let server = clients.compute().await?.get_server(id).await?;
            Ok(json!({ "server": server }))
        }
        Lookup::Network => clients.network().await?.show_network(id).await,
        Lookup::Subnet => clients.network().await?.show_subnet(id).await,
        Lookup::Router => clients.network().await?.show_router(id).await,
        Lookup::Port => clients.network().await?.show_port(id).await,
        Lookup::FloatingIp => clients.network().await?.show_floatingip(id).await,
    }
}
