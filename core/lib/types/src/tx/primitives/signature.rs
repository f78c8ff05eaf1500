use serde::{Deserialize, Serialize};
use thiserror::Error;

use zklink_crypto::franklin_crypto::{
    eddsa::{PrivateKey, PublicKey, Seed},
    jubjub::FixedGenerators,
};
use zklink_crypto::params::{JUBJUB_PARAMS, RESCUE_PARAMS};
use zklink_crypto::primitives::rescue_hash_tx_msg;
use zklink_crypto::{public_key_from_private, Engine};

use crate::account::PubKeyHash;
use crate::tx::{PackedPublicKey, PackedSignature};

/// zkLink transaction signature.
///
/// Represents a MuSig Rescue signature for the message, together with the
/// public key it verifies under.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZkLinkSignature {
    pub pub_key: PackedPublicKey,
    pub signature: PackedSignature,
}

#[derive(Debug, Error)]
#[error("zkLink signature should be 96 bytes of hex: {0}")]
pub struct SignatureDecodeError(String);

impl ZkLinkSignature {
    /// Signs the message via the provided private key.
    ///
    /// The nonce seed is derived deterministically from the key and the
    /// message, so signing identical input twice produces identical bytes.
    pub fn sign_musig(pk: &PrivateKey<Engine>, msg: &[u8]) -> Self {
        let hashed_msg = rescue_hash_tx_msg(msg);
        let seed = Seed::deterministic_seed(pk, &hashed_msg);
        let signature = pk.musig_rescue_sign(
            &hashed_msg,
            &seed,
            FixedGenerators::SpendingKeyGenerator,
            &RESCUE_PARAMS,
            &JUBJUB_PARAMS,
        );

        Self {
            pub_key: PackedPublicKey(public_key_from_private(pk)),
            signature: PackedSignature(signature),
        }
    }

    /// Restores the public key from the signature given the initial message.
    /// Returns `None` if the (signature, message) pair does not verify.
    pub fn verify_musig(&self, msg: &[u8]) -> Option<PublicKey<Engine>> {
        let hashed_msg = rescue_hash_tx_msg(msg);
        let valid = self.pub_key.0.verify_musig_rescue(
            &hashed_msg,
            &self.signature.0,
            FixedGenerators::SpendingKeyGenerator,
            &RESCUE_PARAMS,
            &JUBJUB_PARAMS,
        );
        if valid {
            Some(self.pub_key.0.clone())
        } else {
            None
        }
    }

    /// The hash of the public key this signature verifies under.
    pub fn public_key_hash(&self) -> PubKeyHash {
        self.pub_key.public_key_hash()
    }

    /// Serializes the signature to the packed representation.
    /// [0..32] - packed pubkey of the signer.
    /// [32..96] - packed r,s of the signature.
    pub fn serialize_packed(&self) -> std::io::Result<Vec<u8>> {
        let mut bytes = self.pub_key.serialize_packed()?;
        bytes.extend(self.signature.serialize_packed()?);
        Ok(bytes)
    }

    /// Deserializes the signature from the packed bytes representation.
    pub fn deserialize_from_packed_bytes(bytes: &[u8]) -> Result<Self, SignatureDecodeError> {
        if bytes.len() != 32 + 64 {
            return Err(SignatureDecodeError("length mismatch".into()));
        }
        Ok(Self {
            pub_key: PackedPublicKey::deserialize_packed(&bytes[0..32])
                .map_err(|e| SignatureDecodeError(e.to_string()))?,
            signature: PackedSignature::deserialize_packed(&bytes[32..])
                .map_err(|e| SignatureDecodeError(e.to_string()))?,
        })
    }

    /// Decodes the signature from a hex string, with or without the `0x`
    /// prefix.
    pub fn from_hex(s: &str) -> Result<Self, SignatureDecodeError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| SignatureDecodeError(e.to_string()))?;
        Self::deserialize_from_packed_bytes(&bytes)
    }
}

impl Default for ZkLinkSignature {
    fn default() -> Self {
        Self {
            pub_key: PackedPublicKey::deserialize_packed(&[0; 32]).unwrap(),
            signature: PackedSignature::deserialize_packed(&[0; 64]).unwrap(),
        }
    }
}

impl std::fmt::Debug for ZkLinkSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        let hex_pk = hex::encode(self.pub_key.serialize_packed().unwrap());
        let hex_sign = hex::encode(self.signature.serialize_packed().unwrap());
        write!(f, "{{ pub_key: {}, sign: {} }}", hex_pk, hex_sign)
    }
}
