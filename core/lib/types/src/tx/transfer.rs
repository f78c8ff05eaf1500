use num::BigUint;
use serde::{Deserialize, Serialize};

use zklink_basic_types::{AccountId, Nonce, SubAccountId, TimeStamp, TokenId, ZkLinkAddress};
use zklink_crypto::params::TOKEN_MAX_PRECISION;
use zklink_utils::BigUintSerdeAsRadix10Str;

use crate::account::PubKeyHash;
use crate::helpers::{pack_fee_amount, pack_token_amount};
use crate::tx::validator::*;
use crate::tx::{GetBytes, ValidationError, ZkLinkSignature};
use crate::utils::ethereum_sign_message_part;

/// `Transfer` transaction performs a move of funds from one zkLink account to
/// another.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    /// zkLink network account ID of the transaction initiator.
    pub account_id: AccountId,
    /// Sub-account the funds are moved from.
    pub from_sub_account_id: SubAccountId,
    /// Sub-account the funds are moved to.
    pub to_sub_account_id: SubAccountId,
    /// Layer1 address of the account to transfer funds to.
    pub to: ZkLinkAddress,
    /// Type of token for transfer. Also represents the token in which fee
    /// will be paid.
    pub token: TokenId,
    /// Amount of funds to transfer; carried in packed form.
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

    /// Used as request id.
    pub ts: TimeStamp,
}

impl Transfer {
    /// Unique identifier of the transaction type in the zkLink network.
    pub const TX_TYPE: u8 = 0x04;

    /// Verifies the transaction fields:
    ///
    /// - `account_id`, sub-account ids, `token` and `nonce` must be within
    ///   their declared ranges;
    /// - `amount` and `fee` must survive the packing round trip;
    /// - `to` must be a well-formed, non-reserved address.
    pub fn check_correctness(&self) -> Result<(), ValidationError> {
        account_validator(&self.account_id)?;
        sub_account_validator(&self.from_sub_account_id)?;
        sub_account_validator(&self.to_sub_account_id)?;
        zklink_address_validator(&self.to)?;
        token_validator(&self.token)?;
        amount_packable(&self.amount)?;
        fee_packable(&self.fee)?;
        nonce_validator(&self.nonce)
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
            "Transfer",
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

impl GetBytes for Transfer {
    /// Encodes the transaction data as the byte sequence according to the
    /// zkLink protocol.
    fn get_bytes(&self) -> Vec<u8> {
        let bytes_len = self.bytes_len();
        let mut out = Vec::with_capacity(bytes_len);
        out.extend_from_slice(&[Self::TX_TYPE]);
        out.extend_from_slice(&self.account_id.to_be_bytes());
        out.extend_from_slice(&self.from_sub_account_id.to_be_bytes());
        out.extend_from_slice(&self.to.to_fixed_bytes());
        out.extend_from_slice(&self.to_sub_account_id.to_be_bytes());
        out.extend_from_slice(&(*self.token as u16).to_be_bytes());
        out.extend_from_slice(&pack_token_amount(&self.amount).expect("amount is packable"));
        out.extend_from_slice(&pack_fee_amount(&self.fee).expect("fee is packable"));
        out.extend_from_slice(&self.nonce.to_be_bytes());
        out.extend_from_slice(&self.ts.to_be_bytes());
        assert_eq!(out.len(), bytes_len);
        out
    }

    fn bytes_len(&self) -> usize {
        56
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tx_builder::TransferBuilder;
    use std::str::FromStr;

    fn test_builder() -> TransferBuilder {
        TransferBuilder {
            account_id: AccountId(10),
            to_address: ZkLinkAddress::from_str("0xAFAFf3aD1a0425D792432D9eCD1c3e26Ef2C42E9")
                .unwrap(),
            from_sub_account_id: SubAccountId(1),
            to_sub_account_id: SubAccountId(1),
            token: TokenId(18),
            amount: BigUint::from(10000u32),
            fee: BigUint::from(3u32),
            nonce: Nonce(1),
            timestamp: TimeStamp(1693472232),
        }
    }

    #[test]
    fn test_get_bytes() {
        let transfer = test_builder().build().unwrap();
        let bytes = transfer.get_bytes();
        let expected_bytes = [
            4, 0, 0, 0, 10, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 175, 175, 243, 173, 26, 4, 37,
            215, 146, 67, 45, 158, 205, 28, 62, 38, 239, 44, 66, 233, 1, 0, 18, 0, 0, 4, 226, 0, 0,
            96, 0, 0, 0, 1, 100, 240, 85, 232,
        ];
        assert_eq!(bytes, expected_bytes);
    }

    #[test]
    fn encoding_is_deterministic() {
        let first = test_builder().build().unwrap();
        let second = test_builder().build().unwrap();
        assert_eq!(first.get_bytes(), second.get_bytes());
    }

    #[test]
    fn rejects_unpackable_amount() {
        let mut builder = test_builder();
        builder.amount = BigUint::from(10001u32) * BigUint::from(10u64.pow(10));
        // 100010000000000 has too many significant digits for a 35-bit mantissa.
        builder.amount += 1u32;
        assert_eq!(
            builder.build().unwrap_err(),
            ValidationError::AmountNotPackable
        );
    }

    #[test]
    fn rejects_malformed_to_address() {
        let mut builder = test_builder();
        builder.to_address = vec![7u8; 19].into();
        assert_eq!(builder.build().unwrap_err(), ValidationError::WrongToAddress);
    }

    #[test]
    fn eth_sign_message() {
        let transfer = test_builder().build().unwrap();
        let message = transfer.get_eth_sign_msg("USDC");
        assert_eq!(
            message,
            "Transfer 0.00000000000001 USDC to: 0xafaff3ad1a0425d792432d9ecd1c3e26ef2c42e9\n\
             Fee: 0.000000000000000003 USDC\n\
             Nonce: 1"
        );
    }
}
