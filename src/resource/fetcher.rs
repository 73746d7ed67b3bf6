//! Stack Fetcher
//!
//! Locates a stack by name and collects the descriptors of its resources.

use super::describer::{get_single_resource_info, DescribePolicy, ResourceDescriptor, StackResource};
use crate::error::FetchError;
use crate::openstack::client::ServiceClients;
use anyhow::{Context, Result};
use serde_json::Value;

/// A stack as Heat reports it in a listing
#[derive(Debug, Clone, PartialEq)]
pub struct StackDescriptor(Value);

impl StackDescriptor {
    pub fn id(&self) -> Result<&str> {
        self.field("id")
    }

    pub fn name(&self) -> Result<&str> {
        self.field("stack_name")
    }

    pub fn status(&self) -> Option<&str> {
        self.0.get("stack_status").and_then(Value::as_str)
    }

    fn field(&self, key: &str) -> Result<&str> {
        self.0.get(key).and_then(Value::as_str).ok_or_else(|| {
            FetchError::MalformedResponse(format!("stack has no '{}'", key)).into()
        })
    }
}

/// Find the stack named `stack_name`
///
/// Heat returns at most one stack for an exact name, so the first match is
/// taken.
pub async fn get_stack_by_name(clients: &ServiceClients, stack_name: &str) -> Result<StackDescriptor> {
    let heat = clients.orchestration().await?;
    let stacks = heat
        .list_stacks_by_name(stack_name)
        .await
        .with_context(|| format!("Failed to list stacks named '{}'", stack_name))?;

    let Some(stack) = stacks.into_iter().next() else {
        return Err(FetchError::StackNotFound(stack_name.to_string()).into());
    };

    let stack = StackDescriptor(stack);
    tracing::info!(
        "Found stack '{}' ({}), status {}",
        stack_name,
        stack.id()?,
        stack.status().unwrap_or("unknown")
    );
    Ok(stack)
}

/// Describe every resource of a stack, keeping Heat's listing order
pub async fn get_all_stack_resource_info(
    clients: &ServiceClients,
    stack_id: &str,
    policy: DescribePolicy,
) -> Result<Vec<ResourceDescriptor>> {
    let heat = clients.orchestration().await?;
    let listing = heat
        .list_resources(stack_id)
        .await
        .with_context(|| format!("Failed to list resources of stack {}", stack_id))?;

    tracing::info!("Stack {} has {} resources", stack_id, listing.len());

    let mut resources = Vec::with_capacity(listing.len());
    for raw in listing {
        let resource = StackResource::from_value(raw)?;
        if let Some(info) = get_single_resource_info(clients, &resource, policy).await? {
            resources.push(info);
        }
    }

    tracing::info!("Described {} resources", resources.len());
    Ok(resources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stack_descriptor_accessors() {
        let stack = StackDescriptor(json!({
            "id": "5b1c",
            "stack_name": "demo",
            "stack_status": "CREATE_COMPLETE"
        }));
        assert_eq!(stack.id().unwrap(), "5b1c");
        assert_eq!(stack.name().unwrap(), "demo");
        assert_eq!(stack.status(), Some("CREATE_COMPLETE"));
    }

    #[test]
    fn test_stack_descriptor_missing_id() {
        let stack = StackDescriptor(json!({"stack_name": "demo"}));
        assert!(stack.id().is_err());
        assert_eq!(stack.status(), None);
    }
}
