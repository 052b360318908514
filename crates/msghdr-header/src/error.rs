use msghdr_addr::AddrError;

/// Errors that can occur while decoding a header or its body.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    /// The buffer is not a valid protobuf message of the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// The encoded message exceeds the configured maximum size.
    #[error("message too large ({size} bytes, max {max})")]
    MessageTooLarge { size: usize, max: usize },

    /// The type code is not one of the known message types.
    #[error("unknown message type {0}")]
    UnknownType(u32),

    /// The embedded address descriptor is invalid.
    #[error("address error: {0}")]
    Addr(#[from] AddrError),
}

pub type Result<T> = std::result::Result<T, HeaderError>;
