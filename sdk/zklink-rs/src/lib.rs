//! zkLink transaction-signing SDK.
//!
//! Build a transaction with one of the builders from [`zklink_types`], then
//! hand it to a [`Signer`] to obtain a [`zklink_types::TxSignature`] bundle
//! carrying the signed transaction and its signatures.

pub mod error;
pub mod signer;
pub mod utils;

pub use crate::error::SigningError;
pub use crate::signer::Signer;
pub use zklink_eth_signer::L1SignerType;

pub use zklink_types;
