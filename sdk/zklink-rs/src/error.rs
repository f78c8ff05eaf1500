use thiserror::Error;

use zklink_crypto::error::KeyError;
use zklink_eth_signer::SignerError;
use zklink_types::ValidationError;

#[derive(Debug, Error)]
pub enum SigningError {
    #[error("ethereum private key is malformed")]
    MalformedPrivateKey,
    #[error(transparent)]
    EthSigner(#[from] SignerError),
    #[error("key derivation failed: {0}")]
    KeyDerivation(#[from] KeyError),
    #[error("transaction is invalid: {0}")]
    InvalidTransaction(#[from] ValidationError),
    #[error("supplied signature does not verify against the transaction")]
    MalformedSignatureOverride,
    #[error("recovered auth signer does not match the signer address")]
    WrongAuthSignature,
}
