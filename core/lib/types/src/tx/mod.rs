//! zkLink network L2 transactions.

mod change_pubkey;
mod forced_exit;
mod order_matching;
mod primitives;
mod transfer;
mod withdraw;
mod zklink_tx;

pub mod error;
pub mod prices;
pub mod validator;

use zklink_crypto::primitives::rescue_hash_bytes;

// Re-export transactions.
pub use self::{
    change_pubkey::{ChangePubKey, ChangePubKeyECDSAData, ChangePubKeyEthAuthData},
    forced_exit::ForcedExit,
    order_matching::{Order, OrderMatching},
    transfer::Transfer,
    withdraw::Withdraw,
    zklink_tx::{ZkLinkTx, ZkLinkTxType},
};

// Re-export primitives associated with transactions.
pub use self::primitives::{
    packed_eth_signature::{EthSignatureError, PackedEthSignature},
    packed_public_key::PackedPublicKey,
    packed_signature::PackedSignature,
    signature::ZkLinkSignature,
};

pub use self::error::ValidationError;
pub use self::prices::{ContractPrice, OraclePrices, SpotPriceInfo};

/// Canonical byte encoding of a value signed or hashed by the protocol.
///
/// The encoding is a pure function of the value: a fixed field order with
/// fixed-width big-endian integers, so identical values always produce
/// identical bytes.
pub trait GetBytes {
    fn get_bytes(&self) -> Vec<u8>;

    /// Byte length of the canonical encoding.
    fn bytes_len(&self) -> usize;

    /// Rescue hash of the canonical bytes, truncated to 31 bytes.
    fn rescue_hash(&self) -> Vec<u8> {
        rescue_hash_bytes(&self.get_bytes())
    }
}

impl<T: GetBytes> GetBytes for Vec<T> {
    fn get_bytes(&self) -> Vec<u8> {
        self.iter().flat_map(|item| item.get_bytes()).collect()
    }

    fn bytes_len(&self) -> usize {
        self.iter().map(|item| item.bytes_len()).sum()
    }
}
