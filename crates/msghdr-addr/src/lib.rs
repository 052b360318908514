//! Network address descriptor carried inside msghdr headers.
//!
//! [`Addrpb`] is the wire form (protobuf, tags 1-3). [`NetAddr`] is the value
//! type application code works with; it converts to and from
//! [`std::net::SocketAddr`].

pub mod addr;
pub mod error;
pub mod wire;
pub mod zone;

pub use addr::NetAddr;
pub use error::{AddrError, Result};
pub use wire::{unmarshal_addr, Addrpb};
