use num::{BigUint, ToPrimitive};
use serde::{Deserialize, Serialize};

use zklink_basic_types::{
    AccountId, ChainId, Nonce, SubAccountId, TimeStamp, TokenId, ZkLinkAddress,
};
use zklink_crypto::params::TOKEN_MAX_PRECISION;
use zklink_utils::BigUintSerdeAsRadix10Str;

use crate::account::PubKeyHash;
use crate::helpers::pack_fee_amount;
use crate::tx::validator::*;
use crate::tx::{GetBytes, ValidationError, ZkLinkSignature};
use crate::utils::ethereum_sign_message_part;

/// `Withdraw` transaction performs a withdrawal of funds from a zkLink
/// account to an L1 account on the target chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdraw {
    /// Target chain of the withdrawal.
    pub to_chain_id: ChainId,
    /// zkLink network account ID of the transaction initiator.
    pub account_id: AccountId,
    /// The source sub-account of the withdrawn funds.
    pub sub_account_id: SubAccountId,
    /// Address of the L1 account to withdraw funds to.
    pub to: ZkLinkAddress,
    /// Source token on L2. Also represents the token in which fee will be
    /// paid.
    pub l2_source_token: TokenId,
    /// Target token on the L1 chain.
    pub l1_target_token: TokenId,
    /// Amount of funds to withdraw. Layer1 cannot unpack a packed value, so
    /// it is carried at full width.
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    pub amount: BigUint,
    /// Fee for the transaction; carried in packed form.
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    pub fee: BigUint,
    /// Current account nonce.
    pub nonce: Nonce,
    /// Transaction zkLink signature.
    #[serde(default)]
    pub signature: ZkLinkSignature,

    /// Whether the funds leave for layer 1.
    pub withdraw_to_l1: u8,
    /// Cross-chain fee deduction in hundredths of a percent. A non-zero
    /// ratio requests a fast withdrawal.
    pub withdraw_fee_ratio: u16,
    /// Used as request id.
    pub ts: TimeStamp,
}

impl Withdraw {
    /// Unique identifier of the transaction type in the zkLink network.
    pub const TX_TYPE: u8 = 0x03;

    pub fn is_fast_withdraw(&self) -> bool {
        self.withdraw_fee_ratio > 0
    }

    /// Verifies the transaction fields:
    ///
    /// - ids must be within their declared ranges;
    /// - `amount` must fit the 128-bit balance width;
    /// - `fee` must survive the packing round trip;
    /// - `to` must be a well-formed, non-reserved address;
    /// - flags and the fee ratio must be within their declared ranges.
    pub fn check_correctness(&self) -> Result<(), ValidationError> {
        chain_id_validator(&self.to_chain_id)?;
        account_validator(&self.account_id)?;
        sub_account_validator(&self.sub_account_id)?;
        zklink_address_validator(&self.to)?;
        token_validator(&self.l2_source_token)?;
        token_validator(&self.l1_target_token)?;
        amount_unpackable(&self.amount)?;
        fee_packable(&self.fee)?;
        nonce_validator(&self.nonce)?;
        boolean_validator(self.withdraw_to_l1)?;
        withdraw_fee_ratio_validator(self.withdraw_fee_ratio)
    }

    pub fn is_signature_valid(&self) -> bool {
        self.signature.verify_musig(&self.get_bytes()).is_some()
    }

    /// Restores the `PubKeyHash` from the transaction signature.
    pub fn verify_signature(&self) -> Option<PubKeyHash> {
        self.signature
            .verify_musig(&self.get_bytes())
            .map(|pub_key| PubKeyHash::from_pubkey(&pub_key))
    }

    /// Get the first part of the message we expect to be signed by the
    /// Ethereum account key. The only difference is the missing `nonce`,
    /// since it's added at the end of the transactions batch message.
    pub fn get_eth_sign_msg_part(&self, token_symbol: &str) -> String {
        ethereum_sign_message_part(
            "Withdraw",
            token_symbol,
            TOKEN_MAX_PRECISION,
            &self.amount,
            &self.fee,
            &self.to,
        )
    }

    /// Gets the message that should be signed by the Ethereum key of the
    /// account for 2-factor authentication.
    pub fn get_eth_sign_msg(&self, token_symbol: &str) -> String {
        let mut message = self.get_eth_sign_msg_part(token_symbol);
        if !message.is_empty() {
            message.push('\n');
        }
        message.push_str(format!("Nonce: {}", self.nonce).as_str());
        message
    }
}

impl GetBytes for Withdraw {
    /// Encodes the transaction data as the byte sequence according to the
    /// zkLink protocol.
    fn get_bytes(&self) -> Vec<u8> {
        let bytes_len = self.bytes_len();
        let mut out = Vec::with_capacity(bytes_len);
        out.extend_from_slice(&[Self::TX_TYPE]);
        out.extend_from_slice(&self.to_chain_id.to_be_bytes());
        out.extend_from_slice(&self.account_id.to_be_bytes());
        out.extend_from_slice(&self.sub_account_id.to_be_bytes());
        out.extend_from_slice(&self.to.to_fixed_bytes());
        out.extend_from_slice(&(*self.l2_source_token as u16).to_be_bytes());
        out.extend_from_slice(&(*self.l1_target_token as u16).to_be_bytes());
        out.extend_from_slice(
            &self
                .amount
                .to_u128()
                .expect("amount fits the balance width")
                .to_be_bytes(),
        );
        out.extend_from_slice(&pack_fee_amount(&self.fee).expect("fee is packable"));
        out.extend_from_slice(&self.nonce.to_be_bytes());
        out.push(self.withdraw_to_l1);
        out.extend_from_slice(&self.withdraw_fee_ratio.to_be_bytes());
        out.extend_from_slice(&self.ts.to_be_bytes());
        assert_eq!(out.len(), bytes_len);
        out
    }

    fn bytes_len(&self) -> usize {
        72
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tx_builder::WithdrawBuilder;
    use std::str::FromStr;

    fn test_builder() -> WithdrawBuilder {
        WithdrawBuilder {
            account_id: AccountId(10),
            sub_account_id: SubAccountId(1),
            to_chain_id: ChainId(1),
            to_address: ZkLinkAddress::from_str("0xAFAFf3aD1a0425D792432D9eCD1c3e26Ef2C42E9")
                .unwrap(),
            l2_source_token: TokenId(18),
            l1_target_token: TokenId(18),
            amount: BigUint::from(10000u32),
            fee: BigUint::from(3u32),
            nonce: Nonce(1),
            withdraw_to_l1: false,
            withdraw_fee_ratio: 0,
            timestamp: TimeStamp(1693472232),
        }
    }

    #[test]
    fn test_get_bytes() {
        let withdraw = test_builder().build().unwrap();
        let bytes = withdraw.get_bytes();
        let expected_bytes = [
            3, 1, 0, 0, 0, 10, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 175, 175, 243, 173, 26, 4,
            37, 215, 146, 67, 45, 158, 205, 28, 62, 38, 239, 44, 66, 233, 0, 18, 0, 18, 0, 0, 0, 0,
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 39, 16, 0, 96, 0, 0, 0, 1, 0, 0, 0, 100, 240, 85, 232,
        ];
        assert_eq!(bytes, expected_bytes);
    }

    #[test]
    fn fast_withdraw_flag_follows_ratio() {
        let mut builder = test_builder();
        builder.withdraw_fee_ratio = 50;
        let withdraw = builder.build().unwrap();
        assert!(withdraw.is_fast_withdraw());
        assert!(!test_builder().build().unwrap().is_fast_withdraw());
    }

    #[test]
    fn rejects_malformed_to_address() {
        let mut builder = test_builder();
        // 19 bytes cannot form a valid address.
        builder.to_address = vec![7u8; 19].into();
        assert_eq!(builder.build().unwrap_err(), ValidationError::WrongToAddress);
    }

    #[test]
    fn rejects_overlong_ratio() {
        let mut builder = test_builder();
        builder.withdraw_fee_ratio = 10001;
        assert_eq!(builder.build().unwrap_err(), ValidationError::WrongFeeRatio);
    }

    #[test]
    fn amount_is_not_packed() {
        // An amount with full 128-bit precision is accepted as is.
        let mut builder = test_builder();
        builder.amount = BigUint::from(123_456_789_123_456_789u64);
        let withdraw = builder.build().unwrap();
        let bytes = withdraw.get_bytes();
        let amount_block = &bytes[43..59];
        assert_eq!(
            amount_block,
            &123_456_789_123_456_789u128.to_be_bytes()[..]
        );
    }
}
