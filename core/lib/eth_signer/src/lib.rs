//! Layer-1 signing contexts for the zkLink SDK.

pub mod error;
pub mod pk_signer;

pub use error::SignerError;
pub use pk_signer::PrivateKeySigner;

/// Tag selecting the L1 signature scheme a signer was constructed for.
///
/// ECDSA over secp256k1 with the Ethereum personal-message convention is the
/// only scheme currently supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum L1SignerType {
    Eth,
}
