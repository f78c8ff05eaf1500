//! Layer-1 style account addresses used across the zkLink network.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AddressError;
use crate::Address;

/// Address of an account as seen by the zkLink network.
///
/// The canonical form is a 20-byte Ethereum-style address; exactly one
/// `0x`-prefixed lowercase hex string corresponds to one binary value.
///
/// The inner storage is length-agnostic so that malformed inputs can be
/// carried up to transaction validation, where they are rejected with a
/// validation error instead of a panic.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZkLinkAddress(Vec<u8>);

impl ZkLinkAddress {
    pub const BYTES_LEN: usize = 20;

    /// Reads an account address from its byte sequence representation.
    ///
    /// Returns an error if the slice length does not match the address length.
    pub fn from_slice(slice: &[u8]) -> Result<Self, AddressError> {
        if slice.len() != Self::BYTES_LEN {
            return Err(AddressError::InvalidLength);
        }
        Ok(ZkLinkAddress(slice.to_vec()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    /// Whether the stored bytes form a well-formed 20-byte address.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == Self::BYTES_LEN
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|byte| *byte == 0)
    }

    /// The address reserved for the global asset account.
    pub fn is_global_account_address(&self) -> bool {
        self.0.len() == Self::BYTES_LEN && self.0.iter().all(|byte| *byte == 0xff)
    }

    /// Encodes the address as the 32-byte front-padded block used in
    /// canonical transaction bytes.
    pub fn to_fixed_bytes(&self) -> [u8; 32] {
        let mut bytes = [0; 32];
        bytes[32 - self.0.len()..].copy_from_slice(&self.0);
        bytes
    }
}

impl Default for ZkLinkAddress {
    fn default() -> ZkLinkAddress {
        ZkLinkAddress(vec![0; Self::BYTES_LEN])
    }
}

impl AsRef<[u8]> for ZkLinkAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ZkLinkAddress {
    fn from(bytes: Vec<u8>) -> Self {
        ZkLinkAddress(bytes)
    }
}

impl From<[u8; 20]> for ZkLinkAddress {
    fn from(bytes: [u8; 20]) -> Self {
        ZkLinkAddress(bytes.to_vec())
    }
}

impl From<Address> for ZkLinkAddress {
    fn from(address: Address) -> Self {
        ZkLinkAddress(address.as_bytes().to_vec())
    }
}

impl From<&ZkLinkAddress> for Address {
    fn from(address: &ZkLinkAddress) -> Self {
        Address::from_slice(address.as_bytes())
    }
}

impl fmt::Debug for ZkLinkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl fmt::Display for ZkLinkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl FromStr for ZkLinkAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").ok_or(AddressError::MissingPrefix)?;
        let bytes = hex::decode(s).map_err(|_| AddressError::InvalidHex)?;
        Self::from_slice(&bytes)
    }
}

impl Serialize for ZkLinkAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ZkLinkAddress {
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
    fn address_serde_roundtrip() {
        let address = ZkLinkAddress::from_slice(&[255u8; 20]).unwrap();
        let serialized = serde_json::to_string(&address).unwrap();
        assert_eq!(serialized, r#""0xffffffffffffffffffffffffffffffffffffffff""#);
        let restored: ZkLinkAddress = serde_json::from_str(&serialized).unwrap();
        assert_eq!(restored, address);
    }

    #[test]
    fn address_rejects_wrong_length() {
        assert_eq!(
            ZkLinkAddress::from_slice(&[1u8; 19]),
            Err(AddressError::InvalidLength)
        );
        // 19 bytes of hex digits cannot decode into a valid address.
        let short = format!("0x{}", hex::encode([7u8; 19]));
        assert_eq!(
            short.parse::<ZkLinkAddress>(),
            Err(AddressError::InvalidLength)
        );
        assert_eq!(
            "AFAFf3aD1a0425D792432D9eCD1c3e26Ef2C42E9".parse::<ZkLinkAddress>(),
            Err(AddressError::MissingPrefix)
        );
    }

    #[test]
    fn address_fixed_bytes_is_front_padded() {
        let address = "0xAFAFf3aD1a0425D792432D9eCD1c3e26Ef2C42E9"
            .parse::<ZkLinkAddress>()
            .unwrap();
        let fixed = address.to_fixed_bytes();
        assert_eq!(&fixed[..12], &[0u8; 12]);
        assert_eq!(&fixed[12..], address.as_bytes());
    }
}
