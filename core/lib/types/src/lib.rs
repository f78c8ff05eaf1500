//! zkLink types: essential types for the zkLink network together with their
//! canonical byte encodings and signature primitives.

pub mod account;
pub mod helpers;
pub mod signatures;
pub mod tx;
pub mod tx_builder;
pub mod utils;

pub use zklink_basic_types::{
    AccountId, Address, ChainId, Nonce, PairId, SlotId, SubAccountId, TimeStamp, TokenId, TxHash,
    ZkLinkAddress, H160, H256, U256,
};

pub use crate::account::PubKeyHash;
pub use crate::signatures::{TxLayer1Signature, TxSignature};
pub use crate::tx::{
    ChangePubKey, ContractPrice, ForcedExit, GetBytes, Order, OrderMatching, OraclePrices,
    SpotPriceInfo, Transfer, ValidationError, Withdraw, ZkLinkTx, ZkLinkTxType,
};
pub use crate::tx_builder::{
    ChangePubKeyBuilder, ForcedExitBuilder, OrderMatchingBuilder, TransferBuilder, WithdrawBuilder,
};
