use std::fmt;
use std::net::{IpAddr, SocketAddr, SocketAddrV4, SocketAddrV6};

use crate::zone;

/// A network endpoint: IP, port and an optional IPv6 zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetAddr {
    pub ip: IpAddr,
    pub port: u16,
    /// IPv6 scope (interface name or decimal index). Empty when not applicable.
    pub zone: String,
}

impl NetAddr {
    /// Create an address without a zone.
    pub fn new(ip: impl Into<IpAddr>, port: u16) -> Self {
        Self {
            ip: ip.into(),
            port,
            zone: String::new(),
        }
    }

    /// Attach a zone.
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = zone.into();
        self
    }

    /// Replace a numeric zone with the name of the local interface it
    /// indexes, when the host has one. Other zones are left as they are.
    pub fn with_interface_zone(mut self) -> Self {
        if let Ok(scope_id) = self.zone.parse::<u32>() {
            if scope_id != 0 {
                self.zone = zone::zone_name(scope_id);
            }
        }
        self
    }

    /// Convert to a socket address, resolving the zone to a scope id.
    ///
    /// The zone is ignored for IPv4 addresses.
    pub fn to_socket_addr(&self) -> SocketAddr {
        match self.ip {
            IpAddr::V4(ip) => SocketAddr::V4(SocketAddrV4::new(ip, self.port)),
            IpAddr::V6(ip) => SocketAddr::V6(SocketAddrV6::new(
                ip,
                self.port,
                0,
                zone::scope_id(&self.zone),
            )),
        }
    }
}

impl From<SocketAddr> for NetAddr {
    fn from(addr: SocketAddr) -> Self {
        match addr {
            SocketAddr::V4(v4) => Self::new(*v4.ip(), v4.port()),
            SocketAddr::V6(v6) => {
                let zone = match v6.scope_id() {
                    0 => String::new(),
                    id => id.to_string(),
                };
                Self::new(*v6.ip(), v6.port()).with_zone(zone)
            }
        }
    }
}

impl From<NetAddr> for SocketAddr {
    fn from(addr: NetAddr) -> Self {
        addr.to_socket_addr()
    }
}

impl fmt::Display for NetAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ip {
            IpAddr::V4(ip) => write!(f, "{ip}:{}", self.port),
            IpAddr::V6(ip) if self.zone.is_empty() => write!(f, "[{ip}]:{}", self.port),
            IpAddr::V6(ip) => write!(f, "[{ip}%{}]:{}", self.zone, self.port),
        }
    }
}
