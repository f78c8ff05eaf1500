use thiserror::Error;

/// A transaction field failed its range or format check.
///
/// Builders report the first failing field and produce no transaction value.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("account id out of range")]
    WrongAccountId,
    #[error("account id is the global asset account")]
    GlobalAssetAccount,
    #[error("sub-account id out of range")]
    WrongSubAccountId,
    #[error("chain id out of range")]
    WrongChainId,
    #[error("token id out of range")]
    WrongToken,
    #[error("token id is reserved")]
    ReservedToken,
    #[error("amount is not packable")]
    AmountNotPackable,
    #[error("amount out of range")]
    WrongAmount,
    #[error("fee is not packable")]
    FeeNotPackable,
    #[error("to address is invalid")]
    WrongToAddress,
    #[error("nonce has reached its maximum")]
    WrongNonce,
    #[error("order nonce has reached its maximum")]
    WrongOrderNonce,
    #[error("slot id out of range")]
    WrongSlotId,
    #[error("price out of range")]
    WrongPrice,
    #[error("boolean flag must be 0 or 1")]
    WrongBooleanFlag,
    #[error("withdraw fee ratio out of range")]
    WrongFeeRatio,
    #[error("order does not carry a valid signature")]
    UnsignedOrder,
    #[error("contract price list malformed")]
    WrongContractPrices,
    #[error("margin price list malformed")]
    WrongMarginPrices,
}
