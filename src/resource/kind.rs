//! Resource Kinds
//!
//! Heat resource type tags mapped onto a closed set of kinds.

use std::fmt;

/// Heat resource type, as far as this tool cares
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Server,
    Net,
    Subnet,
    Router,
    Port,
    FloatingIp,
    RouterGateway,
    RouterInterface,
    /// Any other tag, kept verbatim
    Unsupported(String),
}

/// Dedicated attribute lookup for a supported kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// compute: get server
    Server,
    /// network: show network
    Network,
    /// network: show subnet
    Subnet,
    /// network: show router
    Router,
    /// network: show port
    Port,
    /// network: show floating IP
    FloatingIp,
}

/// Kinds with a dedicated attribute lookup
pub const SUPPORTED_KINDS: &[ResourceKind] = &[
    ResourceKind::Server,
    ResourceKind::Net,
    ResourceKind::Subnet,
    ResourceKind::Router,
    ResourceKind::Port,
    ResourceKind::FloatingIp,
];

/// Attachment kinds that Heat describes well enough on its own
pub const GLUE_KINDS: &[ResourceKind] = &[ResourceKind::RouterGateway, ResourceKind::RouterInterface];

impl ResourceKind {
    /// Parse a Heat type tag; unknown tags become `Unsupported`
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "OS::Nova::Server" => Self::Server,
            "OS::Neutron::Net" => Self::Net,
            "OS::Neutron::Subnet" => Self::Subnet,
            "OS::Neutron::Router" => Self::Router,
            "OS::Neutron::Port" => Self::Port,
            "OS::Neutron::FloatingIP" => Self::FloatingIp,
            "OS::Neutron::RouterGateway" => Self::RouterGateway,
            "OS::Neutron::RouterInterface" => Self::RouterInterface,
            other => Self::Unsupported(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Self::Server => "OS::Nova::Server",
            Self::Net => "OS::Neutron::Net",
            Self::Subnet => "OS::Neutron::Subnet",
            Self::Router => "OS::Neutron::Router",
            Self::Port => "OS::Neutron::Port",
            Self::FloatingIp => "OS::Neutron::FloatingIP",
            Self::RouterGateway => "OS::Neutron::RouterGateway",
            Self::RouterInterface => "OS::Neutron::RouterInterface",
            Self::Unsupported(tag) => tag,
        }
    }

    /// The dedicated lookup for this kind, if it has one
    pub fn lookup(&self) -> Option<Lookup> {
        match self {
            Self::Server => Some(Lookup::Server),
            Self::Net => Some(Lookup::Network),
            Self::Subnet => Some(Lookup::Subnet),
            Self::Router => Some(Lookup::Router),
            Self::Port => Some(Lookup::Port),
            Self::FloatingIp => Some(Lookup::FloatingIp),
            Self::RouterGateway | Self::RouterInterface | Self::Unsupported(_) => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.lookup().is_some()
    }

    pub fn is_glue(&self) -> bool {
        matches!(self, Self::RouterGateway | Self::RouterInterface)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}
