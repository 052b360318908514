//! Header flag bits.
//!
//! Bits 0-3 are predefined. Higher bits are free for application use and are
//! carried through the codec untouched.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// A set of header flag bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u32);

impl Flags {
    /// No flags set.
    pub const NONE: Flags = Flags(0);
    /// The message is a query expecting a response.
    pub const QUERY: Flags = Flags(1);
    /// The message answers a query.
    pub const RESPONSE: Flags = Flags(1 << 1);
    /// The message arrived from the network.
    pub const FROM_NET: Flags = Flags(1 << 2);
    /// The message is bound for the network.
    pub const TO_NET: Flags = Flags(1 << 3);

    const NAMED: [(Flags, &'static str); 4] = [
        (Flags::QUERY, "query"),
        (Flags::RESPONSE, "response"),
        (Flags::FROM_NET, "from-net"),
        (Flags::TO_NET, "to-net"),
    ];

    pub const fn from_bits(bits: u32) -> Self {
        Flags(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True iff every bit of `other` is set in `self`.
    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Names of the predefined flags that are set.
    pub fn names(self) -> Vec<&'static str> {
        Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

impl From<u32> for Flags {
    fn from(bits: u32) -> Self {
        Flags(bits)
    }
}

impl From<Flags> for u32 {
    fn from(flags: Flags) -> Self {
        flags.0
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut parts: Vec<String> = self.names().into_iter().map(String::from).collect();
        let extra = self.0 & !0xF;
        if extra != 0 {
            parts.push(format!("{extra:#x}"));
        }
        f.write_str(&parts.join("|"))
    }
}

impl FromStr for Flags {
    type Err = String;

    /// Parse a single flag name (`query`, `response`, `from-net`, `to-net`)
    /// or a numeric bit mask.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let wanted = s.replace('_', "-");
        if let Some((flag, _)) = Self::NAMED
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(&wanted))
        {
            return Ok(*flag);
        }
        s.parse::<u32>()
            .map(Flags)
            .map_err(|_| format!("unknown flag: {s}"))
    }
}
