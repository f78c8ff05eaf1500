use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use zklink_crypto::franklin_crypto::{
    alt_babyjubjub::{edwards, AltJubjubBn256},
    eddsa::PublicKey,
};
use zklink_crypto::params::JUBJUB_PARAMS;
use zklink_crypto::primitives::pub_key_hash_bytes;
use zklink_crypto::Engine;

use crate::account::PubKeyHash;

#[derive(Clone)]
pub struct PackedPublicKey(pub PublicKey<Engine>);

impl PackedPublicKey {
    pub fn serialize_packed(&self) -> std::io::Result<Vec<u8>> {
        let mut packed_point = [0u8; 32];
        (self.0).0.write(packed_point.as_mut())?;
        Ok(packed_point.to_vec())
    }

    pub fn deserialize_packed(bytes: &[u8]) -> Result<Self, DeserializeError> {
        if bytes.len() != 32 {
            return Err(DeserializeError::IncorrectPublicKeyLength);
        }
        Ok(PackedPublicKey(PublicKey::<Engine>(
            edwards::Point::read(bytes, &JUBJUB_PARAMS as &AltJubjubBn256)
                .map_err(DeserializeError::RestoreCurvePoint)?,
        )))
    }

    /// The 20-byte account identifier derived from this public key.
    pub fn public_key_hash(&self) -> PubKeyHash {
        PubKeyHash::from_pubkey(&self.0)
    }
}

impl From<PublicKey<Engine>> for PackedPublicKey {
    fn from(public_key: PublicKey<Engine>) -> Self {
        Self(public_key)
    }
}

impl PartialEq for PackedPublicKey {
    fn eq(&self, other: &Self) -> bool {
        pub_key_hash_bytes(&self.0) == pub_key_hash_bytes(&other.0)
    }
}

#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("public key size mismatch")]
    IncorrectPublicKeyLength,
    #[error("failed to restore point: {0}")]
    RestoreCurvePoint(std::io::Error),
}

impl Serialize for PackedPublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let packed_point = self.serialize_packed().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&format!("0x{}", hex::encode(packed_point)))
    }
}

impl<'de> Deserialize<'de> for PackedPublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        let string = String::deserialize(deserializer)?;
        let bytes =
            hex::decode(string.strip_prefix("0x").unwrap_or(&string)).map_err(Error::custom)?;
        Self::deserialize_packed(&bytes).map_err(Error::custom)
    }
}
