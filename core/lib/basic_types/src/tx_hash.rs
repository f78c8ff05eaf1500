use std::convert::TryInto;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TxHashError;

/// Transaction hash: SHA-256 over the canonical transaction bytes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TxHash {
    pub data: [u8; 32],
}

impl TxHash {
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn from_slice(slice: &[u8]) -> Result<Self, TxHashError> {
        let data: [u8; 32] = slice.try_into().map_err(|_| TxHashError::InvalidLength)?;
        Ok(TxHash { data })
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.data))
    }
}

impl FromStr for TxHash {
    type Err = TxHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").ok_or(TxHashError::MissingPrefix)?;
        let bytes = hex::decode(s).map_err(|_| TxHashError::InvalidHex)?;
        Self::from_slice(&bytes)
    }
}

impl Serialize for TxHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TxHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        Self::from_str(&string).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tx_hash_roundtrip() {
        let hash = TxHash { data: [0xab; 32] };
        let text = hash.to_string();
        assert!(text.starts_with("0x"));
        assert_eq!(text.parse::<TxHash>().unwrap(), hash);
    }

    #[test]
    fn tx_hash_rejects_malformed_input() {
        assert_eq!("".parse::<TxHash>(), Err(TxHashError::MissingPrefix));
        assert_eq!("0xzz".parse::<TxHash>(), Err(TxHashError::InvalidHex));
        assert_eq!("0x1234".parse::<TxHash>(), Err(TxHashError::InvalidLength));
    }
}
