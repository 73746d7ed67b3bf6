//! Stack resource inventory
//!
//! # Architecture
//!
//! - [`kind`] - Heat type tags mapped to a closed set of kinds
//! - [`describer`] - Per-resource policy and attribute lookup
//! - [`fetcher`] - Stack lookup by name and resource aggregation
//!
//! # Example
//!
//! ```ignore
//! use crate::resource::{get_stack_by_name, get_all_stack_resource_info, DescribePolicy};
//!
//! async fn export(clients: &ServiceClients) -> anyhow::Result<Vec<ResourceDescriptor>> {
//!     let stack = get_stack_by_name(clients, "demo").await?;
//!     get_all_stack_resource_info(clients, stack.id()?, DescribePolicy::default()).await
//! }
//! ```

mod describer;
mod fetcher;
mod kind;

pub use describer::{
    get_single_resource_info, AttributeSource, DescribePolicy, ResourceDescriptor, StackResource,
};
pub use fetcher::{get_all_stack_resource_info, get_stack_by_name, StackDescriptor};
pub use kind::{Lookup, ResourceKind, GLUE_KINDS, SUPPORTED_KINDS};
