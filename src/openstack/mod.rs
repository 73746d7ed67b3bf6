//! OpenStack API interaction module
//!
//! Thin clients for the four services this tool talks to, plus the
//! lazily populated client set tying them together.
//!
//! # Module Structure
//!
//! - [`auth`] - Keystone v2.0 password authentication and catalog lookup
//! - [`client`] - Per-invocation set of service clients
//! - [`http`] - HTTP utilities for REST API calls
//! - [`orchestration`] - Heat stacks and stack resources
//! - [`compute`] - Nova servers
//! - [`network`] - Neutron networks, subnets, routers, ports, floating IPs
//!
//! # Example
//!
//! ```ignore
//! use crate::openstack::client::ServiceClients;
//!
//! async fn example(clients: &ServiceClients) -> anyhow::Result<()> {
//!     let heat = clients.orchestration().await?;
//!     let stacks = heat.list_stacks_by_name("demo").await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod compute;
pub mod http;
pub mod network;
pub mod orchestration;
