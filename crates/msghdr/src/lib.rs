//! Message header envelope for IPC and network payloads.
//!
//! msghdr wraps an opaque payload with a type code, a random correlation id,
//! flag bits and an optional network address, and encodes the result as a
//! compact protobuf message.
//!
//! # Crate Structure
//!
//! - [`addr`] — Network address descriptor and its codec
//! - [`header`] — Header envelope, type codes, flags and the header codec
//!
//! ```
//! use msghdr::header::{unmarshal, Flags, Header, MessageType};
//!
//! let mut header = Header::new(MessageType::Test, "this is a test");
//! header.set_flag(Flags::QUERY);
//!
//! let decoded = unmarshal(&header.marshal()).expect("valid header");
//! assert!(decoded.is_query());
//! assert_eq!(decoded.body_string(), "this is a test");
//! ```

/// Re-export address types.
pub mod addr {
    pub use msghdr_addr::*;
}

/// Re-export header types.
pub mod header {
    pub use msghdr_header::*;
}

pub use msghdr_header::{unmarshal, Body, Flags, Header, HeaderError, MessageType};
