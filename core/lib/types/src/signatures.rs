use serde::{Deserialize, Serialize};

use crate::tx::{PackedEthSignature, ZkLinkSignature, ZkLinkTx};

/// Representation of the signature secured by L1, generated via the Ethereum
/// private key corresponding to the account address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "signature")]
pub enum TxLayer1Signature {
    EthereumSignature(PackedEthSignature),
}

impl From<PackedEthSignature> for TxLayer1Signature {
    fn from(value: PackedEthSignature) -> Self {
        Self::EthereumSignature(value)
    }
}

/// The output of a signing operation: the signed transaction together with
/// the signatures produced for it. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxSignature {
    /// The transaction, with its L2 signature embedded where the variant
    /// carries one.
    pub tx: ZkLinkTx,
    /// L1 (ECDSA) signature, where the signing rule produces one.
    pub layer1_signature: Option<TxLayer1Signature>,
    /// L2 (musig rescue) signature, where the signing rule produces one.
    pub layer2_signature: Option<ZkLinkSignature>,
}
