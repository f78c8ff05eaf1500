//! Validating constructors for every transaction kind.
//!
//! A builder is a plain aggregation of the caller-supplied fields. Building
//! checks every field range and yields the immutable transaction value, or
//! the first validation failure; no transaction artifact exists on error.

use num::BigUint;

use zklink_basic_types::{
    AccountId, ChainId, Nonce, SubAccountId, TimeStamp, TokenId, ZkLinkAddress,
};

use crate::account::PubKeyHash;
use crate::tx::prices::{ContractPrice, OraclePrices, SpotPriceInfo};
use crate::tx::{
    ChangePubKey, ChangePubKeyECDSAData, ChangePubKeyEthAuthData, ForcedExit, Order, OrderMatching,
    PackedEthSignature, Transfer, ValidationError, Withdraw,
};

pub struct ChangePubKeyBuilder {
    pub chain_id: ChainId,
    pub account_id: AccountId,
    pub sub_account_id: SubAccountId,
    pub new_pubkey_hash: PubKeyHash,
    pub fee_token: TokenId,
    pub fee: BigUint,
    pub nonce: Nonce,
    /// A pre-existing L1 authorization; absent means on-chain authorization.
    pub eth_signature: Option<PackedEthSignature>,
    pub timestamp: TimeStamp,
}

impl ChangePubKeyBuilder {
    /// Creates a validated `ChangePubKey` transaction.
    pub fn build(self) -> Result<ChangePubKey, ValidationError> {
        let eth_auth_data = self
            .eth_signature
            .map(|eth_signature| {
                ChangePubKeyEthAuthData::ECDSA(ChangePubKeyECDSAData { eth_signature })
            })
            .unwrap_or(ChangePubKeyEthAuthData::Onchain);

        let tx = ChangePubKey {
            chain_id: self.chain_id,
            account_id: self.account_id,
            sub_account_id: self.sub_account_id,
            new_pk_hash: self.new_pubkey_hash,
            fee_token: self.fee_token,
            fee: self.fee,
            nonce: self.nonce,
            signature: Default::default(),
            eth_auth_data,
            ts: self.timestamp,
        };
        tx.check_correctness()?;
        Ok(tx)
    }
}

pub struct TransferBuilder {
    pub account_id: AccountId,
    pub to_address: ZkLinkAddress,
    pub from_sub_account_id: SubAccountId,
    pub to_sub_account_id: SubAccountId,
    pub token: TokenId,
    pub amount: BigUint,
    pub fee: BigUint,
    pub nonce: Nonce,
    pub timestamp: TimeStamp,
}

impl TransferBuilder {
    /// Creates a validated `Transfer` transaction.
    pub fn build(self) -> Result<Transfer, ValidationError> {
        let tx = Transfer {
            account_id: self.account_id,
            from_sub_account_id: self.from_sub_account_id,
            to_sub_account_id: self.to_sub_account_id,
            to: self.to_address,
            token: self.token,
            amount: self.amount,
            fee: self.fee,
            nonce: self.nonce,
            signature: Default::default(),
            ts: self.timestamp,
        };
        tx.check_correctness()?;
        Ok(tx)
    }
}

pub struct WithdrawBuilder {
    pub account_id: AccountId,
    pub sub_account_id: SubAccountId,
    pub to_chain_id: ChainId,
    pub to_address: ZkLinkAddress,
    pub l2_source_token: TokenId,
    pub l1_target_token: TokenId,
    pub amount: BigUint,
    pub fee: BigUint,
    pub nonce: Nonce,
    pub withdraw_to_l1: bool,
    pub withdraw_fee_ratio: u16,
    pub timestamp: TimeStamp,
}

impl WithdrawBuilder {
    /// Creates a validated `Withdraw` transaction.
    pub fn build(self) -> Result<Withdraw, ValidationError> {
        let tx = Withdraw {
            to_chain_id: self.to_chain_id,
            account_id: self.account_id,
            sub_account_id: self.sub_account_id,
            to: self.to_address,
            l2_source_token: self.l2_source_token,
            l1_target_token: self.l1_target_token,
            amount: self.amount,
            fee: self.fee,
            nonce: self.nonce,
            signature: Default::default(),
            withdraw_to_l1: u8::from(self.withdraw_to_l1),
            withdraw_fee_ratio: self.withdraw_fee_ratio,
            ts: self.timestamp,
        };
        tx.check_correctness()?;
        Ok(tx)
    }
}

pub struct ForcedExitBuilder {
    pub to_chain_id: ChainId,
    pub initiator_account_id: AccountId,
    pub initiator_sub_account_id: SubAccountId,
    pub target: ZkLinkAddress,
    pub target_sub_account_id: SubAccountId,
    pub l2_source_token: TokenId,
    pub l1_target_token: TokenId,
    pub initiator_nonce: Nonce,
    pub exit_amount: BigUint,
    pub withdraw_to_l1: bool,
    pub timestamp: TimeStamp,
}

impl ForcedExitBuilder {
    /// Creates a validated `ForcedExit` transaction.
    pub fn build(self) -> Result<ForcedExit, ValidationError> {
        let tx = ForcedExit {
            to_chain_id: self.to_chain_id,
            initiator_account_id: self.initiator_account_id,
            initiator_sub_account_id: self.initiator_sub_account_id,
            target_sub_account_id: self.target_sub_account_id,
            target: self.target,
            l2_source_token: self.l2_source_token,
            l1_target_token: self.l1_target_token,
            initiator_nonce: self.initiator_nonce,
            signature: Default::default(),
            exit_amount: self.exit_amount,
            withdraw_to_l1: u8::from(self.withdraw_to_l1),
            ts: self.timestamp,
        };
        tx.check_correctness()?;
        Ok(tx)
    }
}

pub struct OrderMatchingBuilder {
    pub account_id: AccountId,
    pub sub_account_id: SubAccountId,
    pub taker: Order,
    pub maker: Order,
    pub contract_prices: Vec<ContractPrice>,
    pub margin_prices: Vec<SpotPriceInfo>,
    pub fee: BigUint,
    pub fee_token: TokenId,
    pub expect_base_amount: BigUint,
    pub expect_quote_amount: BigUint,
}

impl OrderMatchingBuilder {
    /// Creates a validated `OrderMatching` transaction. Both orders must
    /// already carry valid signatures.
    pub fn build(self) -> Result<OrderMatching, ValidationError> {
        let tx = OrderMatching {
            account_id: self.account_id,
            taker: self.taker,
            maker: self.maker,
            oracle_prices: OraclePrices {
                contract_prices: self.contract_prices,
                margin_prices: self.margin_prices,
            },
            fee: self.fee,
            fee_token: self.fee_token,
            sub_account_id: self.sub_account_id,
            expect_base_amount: self.expect_base_amount,
            expect_quote_amount: self.expect_quote_amount,
            signature: Default::default(),
        };
        tx.check_correctness()?;
        Ok(tx)
    }
}
