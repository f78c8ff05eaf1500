use std::convert::TryInto;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use zklink_crypto::params;
use zklink_crypto::primitives::pub_key_hash_bytes;
use zklink_crypto::{public_key_from_private, PrivateKey, PublicKey};

/// Hash of the account's owner public key.
///
/// This is an essential type used within the zkLink network to authorize the
/// transaction author to perform an operation.
///
/// `PubKeyHash` is calculated as the Rescue hash of the public key byte
/// sequence.
#[derive(Copy, Clone, PartialEq, Default, Eq, Hash, PartialOrd, Ord)]
pub struct PubKeyHash {
    pub data: [u8; params::NEW_PUBKEY_HASH_BYTES_LEN],
}

#[derive(Debug, Error, PartialEq)]
pub enum PubKeyHashError {
    #[error("pubkey hash should start with 0x")]
    MissingPrefix,
    #[error("pubkey hash is not a valid hex string")]
    InvalidHex,
    #[error("pubkey hash size mismatch")]
    SizeMismatch,
}

impl std::fmt::Debug for PubKeyHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_hex())
    }
}

impl PubKeyHash {
    /// Creates an uninitialized `PubkeyHash` object.
    /// This value is used for new accounts to signalize that the `PubKeyHash`
    /// was not yet set for the corresponding account.
    /// Accounts with unset `PubKeyHash` are unable to execute L2 transactions.
    pub fn zero() -> Self {
        PubKeyHash {
            data: [0; params::NEW_PUBKEY_HASH_BYTES_LEN],
        }
    }

    /// Converts the `PubKeyHash` object into its hexadecimal representation,
    /// prepended with the `0x` prefix.
    ///
    /// # Example
    ///
    /// ```
    /// use zklink_types::account::PubKeyHash;
    ///
    /// let pubkey_hash = PubKeyHash::zero();
    /// assert_eq!(pubkey_hash.as_hex(), "0x0000000000000000000000000000000000000000");
    /// ```
    pub fn as_hex(&self) -> String {
        format!("0x{}", hex::encode(self.data))
    }

    /// Decodes `PubKeyHash` from its hexadecimal form.
    /// Input string must have a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, PubKeyHashError> {
        let s = s.strip_prefix("0x").ok_or(PubKeyHashError::MissingPrefix)?;
        let bytes = hex::decode(s).map_err(|_| PubKeyHashError::InvalidHex)?;
        Self::from_bytes(&bytes)
    }

    /// Decodes `PubKeyHash` from the byte sequence.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PubKeyHashError> {
        let data: [u8; params::NEW_PUBKEY_HASH_BYTES_LEN] = bytes
            .try_into()
            .map_err(|_| PubKeyHashError::SizeMismatch)?;
        Ok(PubKeyHash { data })
    }

    /// Creates a `PubKeyHash` from the public key.
    pub fn from_pubkey(public_key: &PublicKey) -> Self {
        let pk_hash = pub_key_hash_bytes(public_key);
        Self::from_bytes(&pk_hash).expect("pk convert error")
    }

    /// Creates a `PubKeyHash` from the private key.
    pub fn from_privkey(private_key: &PrivateKey) -> Self {
        let pub_key = public_key_from_private(private_key);
        Self::from_pubkey(&pub_key)
    }
}

impl Serialize for PubKeyHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.as_hex())
    }
}

impl<'de> Deserialize<'de> for PubKeyHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        String::deserialize(deserializer).and_then(|string| {
            PubKeyHash::from_hex(&string).map_err(|err| Error::custom(err.to_string()))
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let pubkey_hash =
            PubKeyHash::from_hex("0xd8d5fb6a6caef06aa3dc2abdcdc240987e5330fe").unwrap();
        assert_eq!(
            pubkey_hash.as_hex(),
            "0xd8d5fb6a6caef06aa3dc2abdcdc240987e5330fe"
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            PubKeyHash::from_hex("d8d5fb6a6caef06aa3dc2abdcdc240987e5330fe"),
            Err(PubKeyHashError::MissingPrefix)
        );
        assert_eq!(
            PubKeyHash::from_hex("0x1234"),
            Err(PubKeyHashError::SizeMismatch)
        );
    }
}
