/// Errors that can occur while decoding or converting an address descriptor.
#[derive(Debug, thiserror::Error)]
pub enum AddrError {
    /// The buffer is not a valid address descriptor.
    #[error("address decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// The IP field is neither 4 nor 16 bytes long.
    #[error("invalid ip length ({0} bytes, expected 4 or 16)")]
    InvalidIpLength(usize),

    /// The port field does not fit in 16 bits.
    #[error("port out of range: {0}")]
    PortOutOfRange(u32),
}

pub type Result<T> = std::result::Result<T, AddrError>;
