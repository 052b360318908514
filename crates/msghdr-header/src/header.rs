use std::borrow::Cow;
use std::str::Utf8Error;

use bytes::Bytes;
use msghdr_addr::{Addrpb, NetAddr};
use rand::{CryptoRng, RngCore};

use crate::body::{decode_u32, Body};
use crate::error::Result;
use crate::flags::Flags;
use crate::kind::MessageType;

/// Envelope for a message exchanged over IPC or the network.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Header {
    #[prost(uint32, tag = "1")]
    type32: u32,
    /// Random correlation id assigned at construction.
    #[prost(uint32, tag = "2")]
    pub id: u32,
    #[prost(uint32, tag = "3")]
    flags: u32,
    #[prost(bytes = "bytes", tag = "4")]
    body: Bytes,
    #[prost(message, optional, tag = "5")]
    addrpb: Option<Addrpb>,
}

impl Header {
    /// Create a header with a fresh random id drawn from the thread-local CSPRNG.
    pub fn new<'a>(kind: MessageType, body: impl Into<Body<'a>>) -> Self {
        Self::with_rng(kind, body, &mut rand::thread_rng())
    }

    /// Create a header, drawing its id from `rng`.
    pub fn with_rng<'a, R>(kind: MessageType, body: impl Into<Body<'a>>, rng: &mut R) -> Self
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let mut header = Self {
            type32: kind.code(),
            id: rng.next_u32(),
            ..Self::default()
        };
        header.set_body(body);
        header
    }

    /// Replace the body.
    pub fn set_body<'a>(&mut self, body: impl Into<Body<'a>>) -> &mut Self {
        self.body = body.into().into_bytes();
        self
    }

    /// Builder form of [`Header::set_body`].
    pub fn with_body<'a>(mut self, body: impl Into<Body<'a>>) -> Self {
        self.set_body(body);
        self
    }

    /// The raw body bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The body as a little-endian `u32`, or 0 if it is shorter than 4 bytes.
    ///
    /// Use [`Header::try_body_u32`] to tell a short body from an encoded zero.
    pub fn body_to_u32(&self) -> u32 {
        self.try_body_u32().unwrap_or(0)
    }

    pub fn try_body_u32(&self) -> Option<u32> {
        decode_u32(&self.body)
    }

    /// The body as text. Invalid UTF-8 is replaced, never rejected.
    pub fn body_string(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// The body as text, failing on invalid UTF-8.
    pub fn body_str(&self) -> std::result::Result<&str, Utf8Error> {
        std::str::from_utf8(&self.body)
    }

    /// Decode the body as a structured message.
    pub fn decode_body<M: prost::Message + Default>(&self) -> Result<M> {
        Ok(M::decode(self.body.clone())?)
    }

    /// Decode the body into `target`, replacing its previous contents.
    pub fn unmarshal_body<M: prost::Message>(&self, target: &mut M) -> Result<()> {
        target.clear();
        target.merge(self.body.clone())?;
        Ok(())
    }

    /// The message type, or `None` for a code this build does not know.
    pub fn message_type(&self) -> Option<MessageType> {
        MessageType::from_code(self.type32)
    }

    /// The raw type code.
    pub fn type_code(&self) -> u32 {
        self.type32
    }

    pub fn set_type(&mut self, kind: MessageType) {
        self.type32 = kind.code();
    }

    pub fn set_type_code(&mut self, code: u32) {
        self.type32 = code;
    }

    pub fn flags(&self) -> Flags {
        Flags::from_bits(self.flags)
    }

    /// True iff every bit of `flag` is set.
    pub fn check_flag(&self, flag: Flags) -> bool {
        self.flags().contains(flag)
    }

    pub fn is_query(&self) -> bool {
        self.check_flag(Flags::QUERY)
    }

    pub fn is_response(&self) -> bool {
        self.check_flag(Flags::RESPONSE)
    }

    pub fn is_from_net(&self) -> bool {
        self.check_flag(Flags::FROM_NET)
    }

    pub fn is_to_net(&self) -> bool {
        self.check_flag(Flags::TO_NET)
    }

    pub fn set_flag(&mut self, flag: Flags) {
        self.flags |= flag.bits();
    }

    /// Clear every bit of `flag`. Bits that are already clear stay clear.
    pub fn unset_flag(&mut self, flag: Flags) {
        self.flags &= !flag.bits();
    }

    /// Flip every bit of `flag`.
    pub fn toggle_flag(&mut self, flag: Flags) {
        self.flags ^= flag.bits();
    }

    /// Attach an address descriptor built from `addr`.
    pub fn set_addr(&mut self, addr: &NetAddr) -> &mut Self {
        self.addrpb = Some(Addrpb::from_addr(addr));
        self
    }

    /// Builder form of [`Header::set_addr`].
    pub fn with_addr(mut self, addr: &NetAddr) -> Self {
        self.set_addr(addr);
        self
    }

    pub fn set_addrpb(&mut self, addr: Addrpb) -> &mut Self {
        self.addrpb = Some(addr);
        self
    }

    pub fn clear_addr(&mut self) {
        self.addrpb = None;
    }

    /// The wire address descriptor, if any.
    pub fn addr(&self) -> Option<&Addrpb> {
        self.addrpb.as_ref()
    }

    /// The attached address, converted. `None` when no address is attached.
    pub fn get_addr(&self) -> Option<Result<NetAddr>> {
        self.addrpb
            .as_ref()
            .map(|addr| addr.to_addr().map_err(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::*;
    use crate::error::HeaderError;

    #[derive(Clone, PartialEq, prost::Message)]
    struct Beacon {
        #[prost(string, tag = "1")]
        name: String,
        #[prost(uint32, tag = "2")]
        port: u32,
    }

    #[test]
    fn new_sets_type_and_body() {
        let header = Header::new(MessageType::Test, "this is a test");
        assert_eq!(header.message_type(), Some(MessageType::Test));
        assert_eq!(header.body_string(), "this is a test");
        assert!(header.flags().is_empty());
        assert!(header.addr().is_none());
    }

    #[test]
    fn ids_come_from_injected_rng() {
        let a = Header::with_rng(MessageType::Ping, (), &mut ChaCha20Rng::seed_from_u64(7));
        let b = Header::with_rng(MessageType::Ping, (), &mut ChaCha20Rng::seed_from_u64(7));
        assert_eq!(a.id, b.id);

        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let first = Header::with_rng(MessageType::Ping, (), &mut rng);
        let second = Header::with_rng(MessageType::Ping, (), &mut rng);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn set_body_is_chainable() {
        let mut header = Header::new(MessageType::GetPort, ());
        header.set_body("first").set_body(42u32);
        assert_eq!(header.body_to_u32(), 42);
    }

    #[test]
    fn empty_body_clears() {
        let header = Header::new(MessageType::Test, b"data").with_body(());
        assert!(header.body().is_empty());
    }

    #[test]
    fn u32_body() {
        let header = Header::new(MessageType::GetPort, 42u32);
        assert_eq!(header.body().len(), 4);
        assert_eq!(header.body_to_u32(), 42);
        assert_eq!(header.try_body_u32(), Some(42));
    }

    #[test]
    fn short_body_reads_as_zero() {
        let header = Header::new(MessageType::GetPort, &[1u8, 2, 3]);
        assert_eq!(header.body_to_u32(), 0);
        assert_eq!(header.try_body_u32(), None);
    }

    #[test]
    fn body_string_is_lossy_and_body_str_is_strict() {
        let header = Header::new(MessageType::Test, vec![b'o', b'k', 0xff]);
        assert_eq!(header.body_string(), "ok\u{fffd}");
        assert!(header.body_str().is_err());
    }

    #[test]
    fn message_body_decodes() {
        let beacon = Beacon {
            name: "node-1".to_string(),
            port: 9000,
        };
        let header = Header::new(MessageType::AddBeacon, Body::message(&beacon));
        let decoded: Beacon = header.decode_body().unwrap();
        assert_eq!(decoded, beacon);

        let mut target = Beacon {
            name: "stale".to_string(),
            port: 1,
        };
        header.unmarshal_body(&mut target).unwrap();
        assert_eq!(target, beacon);
    }

    #[test]
    fn malformed_message_body_is_an_error() {
        let header = Header::new(MessageType::AddBeacon, &[0x0a, 0x05, b'x']);
        let result = header.decode_body::<Beacon>();
        assert!(matches!(result, Err(HeaderError::Decode(_))));
    }

    #[test]
    fn type_accessors() {
        let mut header = Header::new(MessageType::Undefined, ());
        header.set_type(MessageType::Die);
        assert_eq!(header.message_type(), Some(MessageType::Die));
        header.set_type_code(500);
        assert_eq!(header.message_type(), None);
        assert_eq!(header.type_code(), 500);
    }

    #[test]
    fn flag_helpers() {
        let mut header = Header::new(MessageType::Ping, ());
        header.set_flag(Flags::QUERY);
        header.set_flag(Flags::TO_NET);
        assert!(header.is_query());
        assert!(header.is_to_net());
        assert!(!header.is_response());
        assert!(!header.is_from_net());

        header.unset_flag(Flags::QUERY);
        assert!(!header.is_query());
        assert!(header.is_to_net());
    }

    #[test]
    fn composite_check_needs_every_bit() {
        let mut header = Header::new(MessageType::Ping, ());
        let both = Flags::QUERY | Flags::RESPONSE;
        header.set_flag(Flags::QUERY);
        assert!(!header.check_flag(both));
        header.set_flag(Flags::RESPONSE);
        assert!(header.check_flag(both));
        header.unset_flag(Flags::QUERY);
        assert!(!header.check_flag(both));
    }

    #[test]
    fn unset_on_clear_flag_stays_clear() {
        let mut header = Header::new(MessageType::Ping, ());
        header.unset_flag(Flags::QUERY);
        assert_eq!(header.flags(), Flags::NONE);
    }

    #[test]
    fn toggle_flips_bits() {
        let mut header = Header::new(MessageType::Ping, ());
        header.toggle_flag(Flags::QUERY);
        assert_eq!(header.flags(), Flags::QUERY);
        header.toggle_flag(Flags::QUERY);
        assert_eq!(header.flags(), Flags::NONE);
    }

    #[test]
    fn addr_accessors() {
        let addr = NetAddr::new(Ipv4Addr::new(127, 0, 0, 1), 9000);
        let mut header = Header::new(MessageType::NetSend, "payload").with_addr(&addr);
        assert_eq!(header.addr().map(|a| a.port), Some(9000));
        assert_eq!(header.get_addr().unwrap().unwrap(), addr);

        header.clear_addr();
        assert!(header.get_addr().is_none());
    }

    #[test]
    fn ipv4_mapped_addr_is_returned_unchanged() {
        let mapped: std::net::Ipv6Addr = "::ffff:10.0.0.1".parse().unwrap();
        let addr = NetAddr::new(mapped, 80);
        let header = Header::new(MessageType::NetSend, ()).with_addr(&addr);
        assert_eq!(header.get_addr().unwrap().unwrap(), addr);
    }

    #[test]
    fn invalid_addrpb_surfaces_addr_error() {
        let mut header = Header::new(MessageType::NetReceive, ());
        header.set_addrpb(Addrpb {
            ip: vec![1, 2],
            port: 1,
            zone: String::new(),
        });
        assert!(matches!(
            header.get_addr(),
            Some(Err(HeaderError::Addr(_)))
        ));
    }

    proptest! {
        #[test]
        fn set_flag_is_idempotent(start: u32, flag: u32) {
            let mut once = Header::new(MessageType::Test, ());
            once.flags = start;
            once.set_flag(Flags::from_bits(flag));

            let mut twice = once.clone();
            twice.set_flag(Flags::from_bits(flag));

            prop_assert_eq!(once.flags(), twice.flags());
            prop_assert!(once.check_flag(Flags::from_bits(flag)));
        }

        #[test]
        fn unset_clears_exactly_the_given_bits(start: u32, flag: u32) {
            let mut header = Header::new(MessageType::Test, ());
            header.flags = start;
            header.unset_flag(Flags::from_bits(flag));
            prop_assert_eq!(header.flags().bits(), start & !flag);
        }

        #[test]
        fn u32_body_round_trips(value: u32) {
            let header = Header::new(MessageType::GetPort, value);
            prop_assert_eq!(header.body_to_u32(), value);
        }
    }
}
