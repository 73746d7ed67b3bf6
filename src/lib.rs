//! Export the resources of an OpenStack Heat stack.
//!
//! # Module Structure
//!
//! - [`config`] - Connection settings and persisted defaults
//! - [`error`] - Error kinds the command line distinguishes
//! - [`openstack`] - Keystone, Heat, Nova and Neutron clients
//! - [`output`] - JSON / YAML rendering
//! - [`resource`] - Stack lookup, resource policy and aggregation

pub mod config;
pub mod error;
pub mod openstack;
pub mod output;
pub mod resource;
