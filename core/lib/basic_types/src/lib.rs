//! The declaration of the most primitive types used in the zkLink network.

use std::fmt;
use std::num::ParseIntError;
use std::ops::{Add, Deref, DerefMut, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use ethereum_types::{H160, H256, U128, U256};

pub type Address = H160;

#[macro_use]
mod macros;
pub mod error;
pub mod tx_hash;
pub mod zklink_address;

pub use tx_hash::TxHash;
pub use zklink_address::ZkLinkAddress;

basic_type!(
    /// Unique identifier of the chain in the zkLink network.
    ChainId,
    u8
);

basic_type!(
    /// Unique identifier of the account in the zkLink network.
    AccountId,
    u32
);

basic_type!(
    /// Unique identifier of the sub-account within one account.
    SubAccountId,
    u8
);

basic_type!(
    /// Unique identifier of the token in the zkLink network.
    TokenId,
    u32
);

basic_type!(
    /// Unique identifier of the order slot within one sub-account.
    SlotId,
    u32
);

basic_type!(
    /// Unique identifier of the contract token pair in the zkLink network.
    PairId,
    u16
);

basic_type!(
    /// zkLink account nonce.
    Nonce,
    u32
);

basic_type!(
    /// Unix timestamp carried by a transaction.
    TimeStamp,
    u32
);
