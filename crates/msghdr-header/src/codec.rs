use bytes::Bytes;
use prost::Message;
use tracing::{debug, warn};

use crate::error::{HeaderError, Result};
use crate::header::Header;
use crate::kind::MessageType;

/// Limits applied when decoding a header. The default imposes none.
#[derive(Debug, Clone, Default)]
pub struct DecodeConfig {
    /// Maximum encoded size in bytes. `None` accepts any size.
    pub max_message_size: Option<usize>,
    /// Reject type codes that are not a known [`MessageType`].
    pub require_known_type: bool,
}

impl Header {
    /// Serialize to protobuf bytes. Zero-valued fields are omitted.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::from(self.encode_to_vec())
    }

    /// Alias of [`Header::to_bytes`].
    pub fn marshal(&self) -> Bytes {
        self.to_bytes()
    }

    /// Decode a header with no size limit.
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        Self::from_bytes_with_config(buf, &DecodeConfig::default())
    }

    /// Decode a header with explicit limits.
    pub fn from_bytes_with_config(buf: &[u8], config: &DecodeConfig) -> Result<Self> {
        if let Some(max) = config.max_message_size {
            if buf.len() > max {
                return Err(HeaderError::MessageTooLarge {
                    size: buf.len(),
                    max,
                });
            }
        }

        let header = Self::decode(buf)?;

        if config.require_known_type {
            MessageType::try_from(header.type_code())?;
        }

        debug!(
            len = buf.len(),
            type_code = header.type_code(),
            id = header.id,
            body_len = header.body().len(),
            "decoded header"
        );
        Ok(header)
    }
}

/// Decode a header, logging and returning `None` on failure.
///
/// A malformed message is dropped; callers that need the reason should use
/// [`Header::from_bytes`].
pub fn unmarshal(buf: &[u8]) -> Option<Header> {
    match Header::from_bytes(buf) {
        Ok(header) => Some(header),
        Err(err) => {
            warn!(len = buf.len(), %err, "dropping malformed header");
            None
        }
    }
}
