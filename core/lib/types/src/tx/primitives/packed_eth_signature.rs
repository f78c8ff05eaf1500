use parity_crypto::{
    publickey::{
        public_to_address, recover, sign, KeyPair, Message, Secret, Signature as ETHSignature,
    },
    Keccak256,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use zklink_basic_types::{Address, H256};

/// Struct used for working with Ethereum signatures created using eth_sign
/// (using geth, ethers.js, etc), serialized as a 65-byte `0x`-prefixed string.
///
/// Ethereum signed message produced by most clients contains v where
/// v = 27 + recovery_id(0,1,2,3), but for some clients v = recovery_id(0,1,2,3).
/// The library used for signature verification expects v = recovery_id.
///
/// That is why:
/// 1) when this structure is created by deserializing a message produced by a
/// user, 27 is subtracted from v if necessary;
/// 2) when this structure is serialized, 27 is added back to v.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedEthSignature(ETHSignature);

#[derive(Debug, Error)]
pub enum EthSignatureError {
    #[error("eth signature length should be 65 bytes")]
    LengthMismatch,
    #[error("invalid ethereum private key")]
    InvalidPrivateKey,
    #[error("signing failed: {0}")]
    Signing(String),
    #[error("signature recovery failed: {0}")]
    Recover(String),
}

impl PackedEthSignature {
    pub fn serialize_packed(&self) -> [u8; 65] {
        // adds 27 to v
        self.0.clone().into_electrum()
    }

    pub fn deserialize_packed(bytes: &[u8]) -> Result<Self, EthSignatureError> {
        if bytes.len() != 65 {
            return Err(EthSignatureError::LengthMismatch);
        }
        let mut bytes_array = [0u8; 65];
        bytes_array.copy_from_slice(bytes);

        if bytes_array[64] >= 27 {
            bytes_array[64] -= 27;
        }

        Ok(PackedEthSignature(ETHSignature::from(bytes_array)))
    }

    /// Decodes the signature from a `0x`-prefixed hex string.
    pub fn from_hex(s: &str) -> Result<Self, EthSignatureError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|_| EthSignatureError::LengthMismatch)?;
        Self::deserialize_packed(&bytes)
    }

    pub fn as_hex(&self) -> String {
        format!("0x{}", hex::encode(self.serialize_packed()))
    }

    /// Signs message using ethereum private key, results are identical to
    /// signature created using `geth`, `ethers.js`, etc. No hashing and
    /// prefixes required.
    pub fn sign(private_key: &H256, msg: &[u8]) -> Result<PackedEthSignature, EthSignatureError> {
        let secret_key = Secret::copy_from_slice(private_key.as_bytes())
            .ok_or(EthSignatureError::InvalidPrivateKey)?;
        let signed_bytes = Self::message_to_signed_bytes(msg);
        let signature = sign(&secret_key, &Message::from_slice(&signed_bytes))
            .map_err(|err| EthSignatureError::Signing(err.to_string()))?;
        Ok(PackedEthSignature(signature))
    }

    fn message_to_signed_bytes(msg: &[u8]) -> [u8; 32] {
        let prefix = format!("\x19Ethereum Signed Message:\n{}", msg.len());
        let mut bytes = Vec::with_capacity(prefix.len() + msg.len());
        bytes.extend_from_slice(prefix.as_bytes());
        bytes.extend_from_slice(msg);
        bytes.keccak256()
    }

    /// Checks the signature and returns the Ethereum address of the signer.
    /// The message should be the same message that was passed to the
    /// `eth.sign` (or similar) method as argument. No hashing and prefixes
    /// required.
    pub fn signature_recover_signer(&self, msg: &[u8]) -> Result<Address, EthSignatureError> {
        let signed_bytes = Self::message_to_signed_bytes(msg);
        let public_key = recover(&self.0, &Message::from_slice(&signed_bytes))
            .map_err(|err| EthSignatureError::Recover(err.to_string()))?;
        Ok(Address::from_slice(
            public_to_address(&public_key).as_bytes(),
        ))
    }

    /// Get Ethereum address from private key.
    pub fn address_from_private_key(private_key: &H256) -> Result<Address, EthSignatureError> {
        let secret_key = Secret::copy_from_slice(private_key.as_bytes())
            .ok_or(EthSignatureError::InvalidPrivateKey)?;
        let key_pair =
            KeyPair::from_secret(secret_key).map_err(|_| EthSignatureError::InvalidPrivateKey)?;
        Ok(Address::from_slice(key_pair.address().as_bytes()))
    }
}

impl Serialize for PackedEthSignature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.as_hex())
    }
}

impl<'de> Deserialize<'de> for PackedEthSignature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        String::deserialize(deserializer).and_then(|string| {
            if !string.starts_with("0x") {
                return Err(Error::custom("packed eth signature should start with 0x"));
            }
            PackedEthSignature::from_hex(&string).map_err(|e| Error::custom(e.to_string()))
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn test_key() -> H256 {
        let bytes =
            hex::decode("be725250b123a39dab5b7579334d5888987c72a58f4508062545fe6e08ca94f4")
                .unwrap();
        H256::from_slice(&bytes)
    }

    #[test]
    fn sign_is_deterministic_and_recoverable() {
        let key = test_key();
        let address = PackedEthSignature::address_from_private_key(&key).unwrap();

        let msg = b"some arbitrary message";
        let first = PackedEthSignature::sign(&key, msg).unwrap();
        let second = PackedEthSignature::sign(&key, msg).unwrap();
        // RFC6979 deterministic nonces: identical input, identical signature.
        assert_eq!(first.serialize_packed().to_vec(), second.serialize_packed().to_vec());

        assert_eq!(first.signature_recover_signer(msg).unwrap(), address);
    }

    #[test]
    fn packed_serde_roundtrip() {
        let key = test_key();
        let signature = PackedEthSignature::sign(&key, b"roundtrip").unwrap();
        let packed = signature.serialize_packed();
        assert_eq!(packed.len(), 65);
        let restored = PackedEthSignature::deserialize_packed(&packed).unwrap();
        assert_eq!(signature, restored);

        let json = serde_json::to_string(&signature).unwrap();
        let restored: PackedEthSignature = serde_json::from_str(&json).unwrap();
        assert_eq!(signature, restored);
    }
}
