//! Message header for IPC and network payloads.
//!
//! A [`Header`] wraps an opaque body with a type code, a random correlation
//! id, flag bits and an optional network address. Headers are encoded as
//! protobuf:
//!
//! ```text
//! message Header {
//!   uint32 type32 = 1;
//!   uint32 id     = 2;
//!   uint32 flags  = 3;
//!   bytes  body   = 4;
//!   Addrpb addrpb = 5;
//! }
//! ```
//!
//! The body is never interpreted here. Which shape it has is decided by the
//! caller from the type code.

pub mod body;
pub mod codec;
pub mod error;
pub mod flags;
pub mod header;
pub mod kind;

pub use body::{Body, EncodeMessage};
pub use codec::{unmarshal, DecodeConfig};
pub use error::{HeaderError, Result};
pub use flags::Flags;
pub use header::Header;
pub use kind::MessageType;
pub use msghdr_addr::{unmarshal_addr, AddrError, Addrpb, NetAddr};
