//! Protocol-wide constants: circuit geometry, packed-amount widths and the
//! curve/hash parameter singletons.

use lazy_static::lazy_static;

use crate::franklin_crypto::alt_babyjubjub::AltJubjubBn256;
use crate::franklin_crypto::rescue::bn256::Bn256RescueParams;
use zklink_basic_types::{AccountId, ChainId, Nonce, SlotId, SubAccountId, TokenId};

/// Maximum precision of token amounts.
pub const TOKEN_MAX_PRECISION: u8 = 18;

/// Depth of the sub-account tree for each account.
pub const SUB_ACCOUNT_TREE_DEPTH: usize = 5;
/// Depth of the balance subtree for each sub-account.
pub const BALANCE_SUB_TREE_DEPTH: usize = 16;
/// Depth of the order-slot subtree for each sub-account.
pub const ORDER_SUB_TREE_DEPTH: usize = 16;
/// Depth of the chain partition subtree of the global asset tree.
pub const CHAIN_SUB_TREE_DEPTH: usize = SUB_ACCOUNT_TREE_DEPTH;
/// Depth of the account subtree used by the current circuit.
pub const USED_ACCOUNT_SUBTREE_DEPTH: usize = 24;

pub fn max_account_id() -> AccountId {
    AccountId(u32::pow(2, USED_ACCOUNT_SUBTREE_DEPTH as u32) - 1)
}

pub fn max_sub_account_id() -> SubAccountId {
    SubAccountId(u8::pow(2, SUB_ACCOUNT_TREE_DEPTH as u32) - 1)
}

pub fn max_chain_id() -> ChainId {
    ChainId(u8::pow(2, CHAIN_SUB_TREE_DEPTH as u32) - 1)
}

pub fn max_token_id() -> TokenId {
    TokenId(u32::pow(2, BALANCE_SUB_TREE_DEPTH as u32) - 1)
}

pub fn max_slot_id() -> SlotId {
    SlotId(u32::pow(2, ORDER_SUB_TREE_DEPTH as u32) - 1)
}

pub fn max_nonce() -> Nonce {
    Nonce(u32::MAX)
}

pub fn max_order_nonce() -> Nonce {
    Nonce(u32::pow(2, ORDER_NONCE_BIT_WIDTH as u32) - 1)
}

/// The account storing the per-chain remainders of layer-1 contract assets.
/// Regular transactions must not touch it.
pub const GLOBAL_ASSET_ACCOUNT_ID: AccountId = AccountId(1);

/// Token ids reserved for the USD stable-token mapping.
pub const USD_TOKEN_ID: u32 = 1;
pub const USDX_TOKEN_ID_LOWER_BOUND: u32 = USD_TOKEN_ID + 1;
pub const USDX_TOKEN_ID_UPPER_BOUND: u32 = 16;

pub const TX_TYPE_BIT_WIDTH: usize = 8;
pub const CHAIN_ID_BIT_WIDTH: usize = 8;
pub const ACCOUNT_ID_BIT_WIDTH: usize = 32;
pub const SUB_ACCOUNT_ID_BIT_WIDTH: usize = 8;
pub const TOKEN_BIT_WIDTH: usize = 16;
pub const NONCE_BIT_WIDTH: usize = 32;
pub const SLOT_BIT_WIDTH: usize = 16;
pub const ORDER_NONCE_BIT_WIDTH: usize = 24;
pub const BALANCE_BIT_WIDTH: usize = 128;
pub const LAYER1_ADDR_BIT_WIDTH: usize = 256;
pub const SIMP_TIMESTAMP_BIT_WIDTH: usize = 4 * 8;
pub const FEE_RATIO_BIT_WIDTH: usize = 8;

/// Amount packing widths.
pub const AMOUNT_EXPONENT_BIT_WIDTH: usize = 5;
pub const AMOUNT_MANTISSA_BIT_WIDTH: usize = 35;
pub const AMOUNT_BIT_WIDTH: usize = AMOUNT_EXPONENT_BIT_WIDTH + AMOUNT_MANTISSA_BIT_WIDTH;

/// Fee packing widths, narrower than the amount ones.
pub const FEE_EXPONENT_BIT_WIDTH: usize = 5;
pub const FEE_MANTISSA_BIT_WIDTH: usize = 11;

/// Order price bounds; prices are carried as 120-bit integers with 18
/// implied decimals.
pub const PRICE_BIT_WIDTH: usize = 120;
pub const MIN_PRICE: u128 = 1;
pub const MAX_PRICE: u128 = 1_329_227_995_784_915_872_000_000_000_000_000_000;

/// Withdraw fee ratio is expressed in hundredths of a percent.
pub const WITHDRAW_FEE_RATIO_DENOMINATOR: u16 = 10000;

pub const NEW_PUBKEY_HASH_BYTES_LEN: usize = 20;
pub const NEW_PUBKEY_HASH_WIDTH: usize = NEW_PUBKEY_HASH_BYTES_LEN * 8;

/// Fr element encoding width.
pub const FR_BIT_WIDTH: usize = 254;

/// Messages are zero-padded to this bit length before the rescue pre-hash.
pub const PAD_MSG_BEFORE_HASH_BITS_LEN: usize = 736;

/// Fixed length of the (maker, taker, oracle-prices-hash) block hashed into
/// an order-matching transaction.
pub const ORDERS_BIT_WIDTH: usize = 1424;
pub const ORDERS_BYTES: usize = ORDERS_BIT_WIDTH / 8;

/// Number of perpetual-contract positions priced by the oracle list.
pub const USED_POSITION_NUMBER: usize = 16;
/// Number of margin tokens priced by the oracle list.
pub const MARGIN_TOKENS_NUMBER: usize = 3;

pub const CONTRACT_PRICE_BYTES: usize = 1 + PRICE_BIT_WIDTH / 8;
pub const MARGIN_PRICE_BYTES: usize = 2 + PRICE_BIT_WIDTH / 8;

lazy_static! {
    pub static ref JUBJUB_PARAMS: AltJubjubBn256 = AltJubjubBn256::new();
    pub static ref RESCUE_PARAMS: Bn256RescueParams = Bn256RescueParams::new_checked_2_into_1();
}
