//! Message type codes.
//!
//! Codes are part of the wire format and must never be renumbered. New types
//! are appended at the end.

use std::fmt;
use std::str::FromStr;

use crate::error::HeaderError;

/// Semantic kind of a message. Decides how the body is interpreted.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MessageType {
    #[default]
    Undefined = 0,
    GetPort = 1,
    GetIp = 2,
    RegisterService = 3,
    Test = 4,
    Ping = 5,
    NetSend = 6,
    NetReceive = 7,
    AddBeacon = 8,
    GetPubKey = 9,
    Die = 10,
    SessionData = 11,
    StaticKey = 12,
    RandomKey = 13,
}

impl MessageType {
    /// Every known type, in code order.
    pub const ALL: [MessageType; 14] = [
        MessageType::Undefined,
        MessageType::GetPort,
        MessageType::GetIp,
        MessageType::RegisterService,
        MessageType::Test,
        MessageType::Ping,
        MessageType::NetSend,
        MessageType::NetReceive,
        MessageType::AddBeacon,
        MessageType::GetPubKey,
        MessageType::Die,
        MessageType::SessionData,
        MessageType::StaticKey,
        MessageType::RandomKey,
    ];

    /// The wire code.
    pub const fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.get(usize::try_from(code).ok()?).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            MessageType::Undefined => "Undefined",
            MessageType::GetPort => "GetPort",
            MessageType::GetIp => "GetIP",
            MessageType::RegisterService => "RegisterService",
            MessageType::Test => "Test",
            MessageType::Ping => "Ping",
            MessageType::NetSend => "NetSend",
            MessageType::NetReceive => "NetReceive",
            MessageType::AddBeacon => "AddBeacon",
            MessageType::GetPubKey => "GetPubKey",
            MessageType::Die => "Die",
            MessageType::SessionData => "SessionData",
            MessageType::StaticKey => "StaticKey",
            MessageType::RandomKey => "RandomKey",
        }
    }

    /// Whether messages of this type usually carry an address descriptor.
    pub fn carries_addr(self) -> bool {
        matches!(
            self,
            MessageType::NetSend | MessageType::NetReceive | MessageType::AddBeacon
        )
    }
}

impl From<MessageType> for u32 {
    fn from(kind: MessageType) -> Self {
        kind.code()
    }
}

impl TryFrom<u32> for MessageType {
    type Error = HeaderError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(HeaderError::UnknownType(code))
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MessageType {
    type Err = String;

    /// Accepts a type name in any case, with or without `-`/`_`
    /// separators (`get-pub-key`, `GetPubKey`), or a numeric code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u32>() {
            return Self::from_code(code).ok_or_else(|| format!("unknown message type code: {code}"));
        }
        let wanted: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("unknown message type: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_sequential() {
        for (index, kind) in MessageType::ALL.iter().enumerate() {
            assert_eq!(kind.code() as usize, index);
            assert_eq!(MessageType::from_code(kind.code()), Some(*kind));
        }
        assert_eq!(MessageType::Test.code(), 4);
        assert_eq!(MessageType::RandomKey.code(), 13);
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_eq!(MessageType::from_code(14), None);
        assert!(matches!(
            MessageType::try_from(99),
            Err(HeaderError::UnknownType(99))
        ));
    }

    #[test]
    fn parses_names_and_codes() {
        assert_eq!("test".parse::<MessageType>().unwrap(), MessageType::Test);
        assert_eq!("get-pub-key".parse::<MessageType>().unwrap(), MessageType::GetPubKey);
        assert_eq!("GetIP".parse::<MessageType>().unwrap(), MessageType::GetIp);
        assert_eq!("session_data".parse::<MessageType>().unwrap(), MessageType::SessionData);
        assert_eq!("6".parse::<MessageType>().unwrap(), MessageType::NetSend);
        assert!("nope".parse::<MessageType>().is_err());
        assert!("14".parse::<MessageType>().is_err());
    }

    #[test]
    fn default_is_undefined() {
        assert_eq!(MessageType::default(), MessageType::Undefined);
        assert_eq!(MessageType::default().code(), 0);
    }
}
