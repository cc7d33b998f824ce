//! Fixed-size hex identifiers and byte-string helpers.
//!
//! Addresses and hashes are rendered as lowercase `0x`-prefixed hex, both in
//! the text traces and in JSON.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while parsing hex identifiers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexParseError {
    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    #[error("Expected {expected} bytes, found {found}")]
    InvalidLength { expected: usize, found: usize },
}

macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            pub const LEN: usize = $len;

            pub const fn zero() -> Self {
                Self([0u8; $len])
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(self, f)
            }
        }

        impl FromStr for $name {
            type Err = HexParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bytes = decode_hex(s)?;
                let bytes: [u8; $len] =
                    bytes
                        .try_into()
                        .map_err(|b: Vec<u8>| HexParseError::InvalidLength {
                            expected: $len,
                            found: b.len(),
                        })?;
                Ok(Self(bytes))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_bytes!(
    /// 20-byte account or contract address
    Address,
    20
);

fixed_bytes!(
    /// 32-byte hash (transaction hash, log topic)
    H256,
    32
);

impl H256 {
    /// Interpret the low 20 bytes of a topic as an address
    pub fn to_address(&self) -> Address {
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&self.0[12..]);
        Address(bytes)
    }
}

/// Decode a hex string with or without `0x` prefix; odd lengths are left-padded
pub fn decode_hex(s: &str) -> Result<Vec<u8>, HexParseError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let result = if s.len() % 2 == 1 {
        hex::decode(format!("0{}", s))
    } else {
        hex::decode(s)
    };
    result.map_err(|e| HexParseError::InvalidHex(format!("{}: {}", s, e)))
}

/// Serde adapter storing `Vec<u8>` as a `0x`-prefixed hex string
pub mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(Vec::new());
        }
        super::decode_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `u128` amounts
///
/// Serializes as a decimal string. Deserializes from a decimal string or a
/// JSON integer; anything else (signs, separators, hex) is rejected.
pub mod decimal {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Int(u64),
        Str(String),
    }

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Int(n) => Ok(u128::from(n)),
            Repr::Str(s) => parse(&s).map_err(serde::de::Error::custom),
        }
    }

    /// Parse a plain decimal amount
    pub fn parse(s: &str) -> Result<u128, String> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("invalid decimal amount '{}'", s));
        }
        s.parse()
            .map_err(|e| format!("invalid decimal amount '{}': {}", s, e))
    }
}
