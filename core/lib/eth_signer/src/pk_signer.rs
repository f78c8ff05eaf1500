use crate::error::SignerError;

use zklink_basic_types::{Address, H256};
use zklink_types::tx::PackedEthSignature;

/// Signer that produces Ethereum-style ECDSA signatures from an in-memory
/// secp256k1 private key.
#[derive(Clone)]
pub struct PrivateKeySigner {
    private_key: H256,
}

impl std::fmt::Debug for PrivateKeySigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKeySigner")
    }
}

impl PrivateKeySigner {
    pub fn new(private_key: H256) -> Self {
        Self { private_key }
    }

    /// Parses a private key from its hex form, with or without the `0x`
    /// prefix.
    pub fn from_hex(s: &str) -> Result<Self, SignerError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|_| SignerError::InvalidPrivateKey)?;
        if bytes.len() != 32 {
            return Err(SignerError::InvalidPrivateKey);
        }
        Ok(Self::new(H256::from_slice(&bytes)))
    }

    /// Get Ethereum address that matches the private key.
    pub fn address(&self) -> Result<Address, SignerError> {
        PackedEthSignature::address_from_private_key(&self.private_key)
            .map_err(|_| SignerError::DefineAddress)
    }

    /// The sign method calculates an Ethereum specific signature with:
    /// sign(keccak256("\x19Ethereum Signed Message:\n" + len(message) + message)).
    pub fn sign_message(&self, message: &[u8]) -> Result<PackedEthSignature, SignerError> {
        PackedEthSignature::sign(&self.private_key, message)
            .map_err(|err| SignerError::SigningFailed(err.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sign_and_recover() {
        let signer = PrivateKeySigner::from_hex(
            "0xbe725250b123a39dab5b7579334d5888987c72a58f4508062545fe6e08ca94f4",
        )
        .unwrap();
        let address = signer.address().unwrap();

        let message = b"hello world";
        let signature = signer.sign_message(message).unwrap();
        let recovered = signature.signature_recover_signer(message).unwrap();
        assert_eq!(recovered, address);
    }

    #[test]
    fn rejects_malformed_key() {
        assert_eq!(
            PrivateKeySigner::from_hex("0x1234").unwrap_err(),
            SignerError::InvalidPrivateKey
        );
        assert_eq!(
            PrivateKeySigner::from_hex("not a key").unwrap_err(),
            SignerError::InvalidPrivateKey
        );
    }
}
