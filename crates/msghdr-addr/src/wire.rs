use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use bytes::Bytes;
use prost::Message;
use tracing::warn;

use crate::addr::NetAddr;
use crate::error::{AddrError, Result};

/// Wire form of a network endpoint.
///
/// ```text
/// message Addrpb {
///   bytes  ip   = 1;  // 4 or 16 bytes
///   uint32 port = 2;
///   string zone = 3;
/// }
/// ```
#[derive(Clone, PartialEq, Eq, Hash, prost::Message)]
pub struct Addrpb {
    #[prost(bytes = "vec", tag = "1")]
    pub ip: Vec<u8>,
    #[prost(uint32, tag = "2")]
    pub port: u32,
    #[prost(string, tag = "3")]
    pub zone: String,
}

impl Addrpb {
    /// Build the wire form of an address. IPv4 addresses use 4 bytes.
    pub fn from_addr(addr: &NetAddr) -> Self {
        let ip = match addr.ip {
            IpAddr::V4(ip) => ip.octets().to_vec(),
            IpAddr::V6(ip) => ip.octets().to_vec(),
        };
        Self {
            ip,
            port: u32::from(addr.port),
            zone: addr.zone.clone(),
        }
    }

    /// Convert back to a [`NetAddr`].
    ///
    /// 16 bytes always decode as IPv6, including IPv4-mapped addresses; use
    /// [`Ipv6Addr::to_canonical`] to unwrap those.
    pub fn to_addr(&self) -> Result<NetAddr> {
        let ip = match self.ip.len() {
            4 => {
                let octets: [u8; 4] = self.ip[..].try_into().unwrap_or([0; 4]);
                IpAddr::V4(Ipv4Addr::from(octets))
            }
            16 => {
                let octets: [u8; 16] = self.ip[..].try_into().unwrap_or([0; 16]);
                IpAddr::V6(Ipv6Addr::from(octets))
            }
            len => return Err(AddrError::InvalidIpLength(len)),
        };
        let port = u16::try_from(self.port).map_err(|_| AddrError::PortOutOfRange(self.port))?;
        Ok(NetAddr {
            ip,
            port,
            zone: self.zone.clone(),
        })
    }

    /// Serialize to protobuf bytes.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::from(self.encode_to_vec())
    }

    /// Alias of [`Addrpb::to_bytes`].
    pub fn marshal(&self) -> Bytes {
        self.to_bytes()
    }

    /// Decode an address descriptor from protobuf bytes.
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        Ok(Self::decode(buf)?)
    }
}

impl From<&NetAddr> for Addrpb {
    fn from(addr: &NetAddr) -> Self {
        Self::from_addr(addr)
    }
}

impl TryFrom<&Addrpb> for NetAddr {
    type Error = AddrError;

    fn try_from(addr: &Addrpb) -> Result<Self> {
        addr.to_addr()
    }
}

/// Decode an address descriptor, logging and returning `None` on failure.
pub fn unmarshal_addr(buf: &[u8]) -> Option<Addrpb> {
    match Addrpb::from_bytes(buf) {
        Ok(addr) => Some(addr),
        Err(err) => {
            warn!(len = buf.len(), %err, "dropping malformed address descriptor");
            None
        }
    }
}
