//! Field-range checks shared by the transaction constructors.

use num::BigUint;

use zklink_basic_types::{AccountId, ChainId, Nonce, SlotId, SubAccountId, TokenId, ZkLinkAddress};
use zklink_crypto::params::{
    max_account_id, max_chain_id, max_nonce, max_order_nonce, max_slot_id, max_sub_account_id,
    max_token_id, GLOBAL_ASSET_ACCOUNT_ID, MARGIN_TOKENS_NUMBER, MAX_PRICE, MIN_PRICE,
    USDX_TOKEN_ID_LOWER_BOUND, USDX_TOKEN_ID_UPPER_BOUND, USED_POSITION_NUMBER,
    WITHDRAW_FEE_RATIO_DENOMINATOR,
};

use crate::helpers::{is_fee_amount_packable, is_token_amount_packable};
use crate::tx::error::ValidationError;
use crate::tx::prices::{ContractPrice, SpotPriceInfo};

/// - account id must not exceed the account tree capacity
/// - the global asset account cannot initiate transactions
pub fn account_validator(account_id: &AccountId) -> Result<(), ValidationError> {
    if *account_id > max_account_id() {
        return Err(ValidationError::WrongAccountId);
    }
    if *account_id == GLOBAL_ASSET_ACCOUNT_ID {
        return Err(ValidationError::GlobalAssetAccount);
    }
    Ok(())
}

pub fn sub_account_validator(sub_account_id: &SubAccountId) -> Result<(), ValidationError> {
    if *sub_account_id > max_sub_account_id() {
        return Err(ValidationError::WrongSubAccountId);
    }
    Ok(())
}

pub fn chain_id_validator(chain_id: &ChainId) -> Result<(), ValidationError> {
    if *chain_id > max_chain_id() {
        return Err(ValidationError::WrongChainId);
    }
    Ok(())
}

/// - token id must fit the balance subtree
/// - the stable-token mapping range is reserved
pub fn token_validator(token_id: &TokenId) -> Result<(), ValidationError> {
    if *token_id > max_token_id() {
        return Err(ValidationError::WrongToken);
    }
    if **token_id >= USDX_TOKEN_ID_LOWER_BOUND && **token_id <= USDX_TOKEN_ID_UPPER_BOUND {
        return Err(ValidationError::ReservedToken);
    }
    Ok(())
}

/// Layer-1 must be able to interpret the value without unpacking, so the only
/// bound is the balance width.
pub fn amount_unpackable(amount: &BigUint) -> Result<(), ValidationError> {
    if *amount > BigUint::from(u128::MAX) {
        return Err(ValidationError::WrongAmount);
    }
    Ok(())
}

/// The amount must survive a pack/unpack round trip unchanged.
pub fn amount_packable(amount: &BigUint) -> Result<(), ValidationError> {
    if !is_token_amount_packable(amount) {
        return Err(ValidationError::AmountNotPackable);
    }
    Ok(())
}

/// The fee must survive a pack/unpack round trip unchanged.
pub fn fee_packable(fee: &BigUint) -> Result<(), ValidationError> {
    if !is_fee_amount_packable(fee) {
        return Err(ValidationError::FeeNotPackable);
    }
    Ok(())
}

/// - the address must be a well-formed 20-byte value
/// - the zero and global-asset addresses are reserved
pub fn zklink_address_validator(address: &ZkLinkAddress) -> Result<(), ValidationError> {
    if !address.is_well_formed() {
        return Err(ValidationError::WrongToAddress);
    }
    if address.is_zero() || address.is_global_account_address() {
        return Err(ValidationError::WrongToAddress);
    }
    Ok(())
}

pub fn nonce_validator(nonce: &Nonce) -> Result<(), ValidationError> {
    if *nonce >= max_nonce() {
        return Err(ValidationError::WrongNonce);
    }
    Ok(())
}

/// Order nonces are carried in 24 bits of the canonical encoding.
pub fn order_nonce_validator(nonce: &Nonce) -> Result<(), ValidationError> {
    if *nonce >= max_order_nonce() {
        return Err(ValidationError::WrongOrderNonce);
    }
    Ok(())
}

pub fn slot_id_validator(slot_id: &SlotId) -> Result<(), ValidationError> {
    if *slot_id > max_slot_id() {
        return Err(ValidationError::WrongSlotId);
    }
    Ok(())
}

pub fn boolean_validator(flag: u8) -> Result<(), ValidationError> {
    if flag > 1 {
        return Err(ValidationError::WrongBooleanFlag);
    }
    Ok(())
}

/// Withdraw fee ratio is expressed in hundredths of a percent, at most 100%.
pub fn withdraw_fee_ratio_validator(ratio: u16) -> Result<(), ValidationError> {
    if ratio > WITHDRAW_FEE_RATIO_DENOMINATOR {
        return Err(ValidationError::WrongFeeRatio);
    }
    Ok(())
}

/// Order prices are strictly between the protocol bounds.
pub fn price_validator(price: &BigUint) -> Result<(), ValidationError> {
    if *price <= BigUint::from(MIN_PRICE) || *price >= BigUint::from(MAX_PRICE) {
        return Err(ValidationError::WrongPrice);
    }
    Ok(())
}

/// Oracle prices may be zero but must stay below the price width.
pub fn external_price_validator(price: &BigUint) -> Result<(), ValidationError> {
    if *price >= BigUint::from(MAX_PRICE) {
        return Err(ValidationError::WrongPrice);
    }
    Ok(())
}

/// The contract price list covers every position, ordered by pair id.
pub fn contract_prices_validator(prices: &[ContractPrice]) -> Result<(), ValidationError> {
    if prices.len() != USED_POSITION_NUMBER {
        return Err(ValidationError::WrongContractPrices);
    }
    for (info, pair_id) in prices.iter().zip(0..USED_POSITION_NUMBER) {
        if *info.pair_id != pair_id as u16 {
            return Err(ValidationError::WrongContractPrices);
        }
        external_price_validator(&info.market_price)?;
    }
    Ok(())
}

/// The margin price list covers every margin token.
pub fn margin_prices_validator(prices: &[SpotPriceInfo]) -> Result<(), ValidationError> {
    if prices.len() != MARGIN_TOKENS_NUMBER {
        return Err(ValidationError::WrongMarginPrices);
    }
    for info in prices.iter() {
        if *info.token_id > *max_token_id() {
            return Err(ValidationError::WrongMarginPrices);
        }
        external_price_validator(&info.price)?;
    }
    Ok(())
}
