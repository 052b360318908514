use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

/// A structured message that can be serialized into a header body.
///
/// Implemented for every [`prost::Message`].
pub trait EncodeMessage: fmt::Debug {
    fn encode_message(&self) -> Vec<u8>;
}

impl<M: prost::Message> EncodeMessage for M {
    fn encode_message(&self) -> Vec<u8> {
        self.encode_to_vec()
    }
}

/// Value accepted when setting a header body.
///
/// The encoded body carries no tag telling these variants apart. The
/// receiver knows which one to expect from the header type.
#[derive(Debug)]
pub enum Body<'a> {
    /// No body.
    Empty,
    /// Raw bytes, stored as-is.
    Raw(Bytes),
    /// Text, stored as its UTF-8 bytes without a length prefix.
    Text(String),
    /// A 4-byte little-endian integer.
    UInt32(u32),
    /// A structured message, serialized on assignment.
    Message(&'a dyn EncodeMessage),
}

impl<'a> Body<'a> {
    pub fn message<M: prost::Message>(msg: &'a M) -> Self {
        Body::Message(msg)
    }

    pub(crate) fn into_bytes(self) -> Bytes {
        match self {
            Body::Empty => Bytes::new(),
            Body::Raw(bytes) => bytes,
            Body::Text(text) => Bytes::from(text),
            Body::UInt32(value) => encode_u32(value),
            Body::Message(msg) => Bytes::from(msg.encode_message()),
        }
    }
}

pub(crate) fn encode_u32(value: u32) -> Bytes {
    let mut buf = BytesMut::with_capacity(4);
    buf.put_u32_le(value);
    buf.freeze()
}

pub(crate) fn decode_u32(body: &[u8]) -> Option<u32> {
    let bytes: [u8; 4] = body.get(..4)?.try_into().ok()?;
    Some(u32::from_le_bytes(bytes))
}

impl From<()> for Body<'_> {
    fn from(_: ()) -> Self {
        Body::Empty
    }
}

impl<'a, T: Into<Body<'a>>> From<Option<T>> for Body<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Body::Empty, Into::into)
    }
}

impl From<u32> for Body<'_> {
    fn from(value: u32) -> Self {
        Body::UInt32(value)
    }
}

impl From<Bytes> for Body<'_> {
    fn from(value: Bytes) -> Self {
        Body::Raw(value)
    }
}

impl From<Vec<u8>> for Body<'_> {
    fn from(value: Vec<u8>) -> Self {
        Body::Raw(Bytes::from(value))
    }
}

impl From<&[u8]> for Body<'_> {
    fn from(value: &[u8]) -> Self {
        Body::Raw(Bytes::copy_from_slice(value))
    }
}

impl<const N: usize> From<&[u8; N]> for Body<'_> {
    fn from(value: &[u8; N]) -> Self {
        Body::Raw(Bytes::copy_from_slice(value))
    }
}

impl From<String> for Body<'_> {
    fn from(value: String) -> Self {
        Body::Text(value)
    }
}

impl From<&str> for Body<'_> {
    fn from(value: &str) -> Self {
        Body::Text(value.to_owned())
    }
}
