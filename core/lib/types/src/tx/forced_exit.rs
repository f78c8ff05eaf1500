use num::{BigUint, ToPrimitive};
use serde::{Deserialize, Serialize};

use zklink_basic_types::{
    AccountId, ChainId, Nonce, SubAccountId, TimeStamp, TokenId, ZkLinkAddress,
};
use zklink_utils::BigUintSerdeAsRadix10Str;

use crate::account::PubKeyHash;
use crate::tx::validator::*;
use crate::tx::{GetBytes, ValidationError, ZkLinkSignature};

/// `ForcedExit` transaction is used to withdraw funds from an unowned
/// account to its corresponding L1 address.
///
/// The caller pays the fee for the operation and has no control over the
/// address the funds are withdrawn to. The target account must have no
/// public key hash set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForcedExit {
    /// The chain receiving the withdrawn funds.
    pub to_chain_id: ChainId,
    /// zkLink network account ID of the transaction initiator.
    pub initiator_account_id: AccountId,
    /// Sub-account paying the initiator's fee.
    pub initiator_sub_account_id: SubAccountId,
    /// Current initiator account nonce.
    pub initiator_nonce: Nonce,
    /// L1 address of the account to withdraw funds from; also the address
    /// the funds are sent to.
    pub target: ZkLinkAddress,
    /// Source sub-account of the withdrawal.
    pub target_sub_account_id: SubAccountId,
    /// Source token on L2.
    pub l2_source_token: TokenId,
    /// Target token on the L1 chain.
    pub l1_target_token: TokenId,
    /// Amount to exit; carried at full width.
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    pub exit_amount: BigUint,
    /// Whether the funds leave for layer 1.
    pub withdraw_to_l1: u8,
    /// Transaction zkLink signature.
    #[serde(default)]
    pub signature: ZkLinkSignature,

    /// Used as request id.
    pub ts: TimeStamp,
}

impl ForcedExit {
    /// Unique identifier of the transaction type in the zkLink network.
    pub const TX_TYPE: u8 = 0x07;

    /// Verifies the transaction fields.
    pub fn check_correctness(&self) -> Result<(), ValidationError> {
        chain_id_validator(&self.to_chain_id)?;
        account_validator(&self.initiator_account_id)?;
        sub_account_validator(&self.initiator_sub_account_id)?;
        sub_account_validator(&self.target_sub_account_id)?;
        zklink_address_validator(&self.target)?;
        token_validator(&self.l2_source_token)?;
        token_validator(&self.l1_target_token)?;
        amount_unpackable(&self.exit_amount)?;
        boolean_validator(self.withdraw_to_l1)?;
        nonce_validator(&self.initiator_nonce)
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
}

impl GetBytes for ForcedExit {
    /// Encodes the transaction data as the byte sequence according to the
    /// zkLink protocol.
    fn get_bytes(&self) -> Vec<u8> {
        let bytes_len = self.bytes_len();
        let mut out = Vec::with_capacity(bytes_len);
        out.extend_from_slice(&[Self::TX_TYPE]);
        out.extend_from_slice(&self.to_chain_id.to_be_bytes());
        out.extend_from_slice(&self.initiator_account_id.to_be_bytes());
        out.extend_from_slice(&self.initiator_sub_account_id.to_be_bytes());
        out.extend_from_slice(&self.target.to_fixed_bytes());
        out.extend_from_slice(&self.target_sub_account_id.to_be_bytes());
        out.extend_from_slice(&(*self.l2_source_token as u16).to_be_bytes());
        out.extend_from_slice(&(*self.l1_target_token as u16).to_be_bytes());
        out.extend_from_slice(&self.initiator_nonce.to_be_bytes());
        out.extend_from_slice(
            &self
                .exit_amount
                .to_u128()
                .expect("exit amount fits the balance width")
                .to_be_bytes(),
        );
        out.push(self.withdraw_to_l1);
        out.extend_from_slice(&self.ts.to_be_bytes());
        assert_eq!(out.len(), bytes_len);
        out
    }

    fn bytes_len(&self) -> usize {
        69
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tx_builder::ForcedExitBuilder;
    use std::str::FromStr;

    fn test_builder() -> ForcedExitBuilder {
        ForcedExitBuilder {
            to_chain_id: ChainId(1),
            initiator_account_id: AccountId(10),
            initiator_sub_account_id: SubAccountId(1),
            target: ZkLinkAddress::from_str("0xAFAFf3aD1a0425D792432D9eCD1c3e26Ef2C42E9").unwrap(),
            target_sub_account_id: SubAccountId(1),
            l2_source_token: TokenId(18),
            l1_target_token: TokenId(18),
            initiator_nonce: Nonce(1),
            exit_amount: BigUint::from(10000u32),
            withdraw_to_l1: false,
            timestamp: TimeStamp(1693472232),
        }
    }

    #[test]
    fn test_get_bytes() {
        let forced_exit = test_builder().build().unwrap();
        let bytes = forced_exit.get_bytes();
        assert_eq!(bytes.len(), forced_exit.bytes_len());
        assert_eq!(bytes[0], ForcedExit::TX_TYPE);
        // nonce sits right after the token pair
        assert_eq!(&bytes[44..48], &[0, 0, 0, 1]);
        // exit amount is carried unpacked
        assert_eq!(&bytes[48..64], &10000u128.to_be_bytes());
    }

    #[test]
    fn rejects_oversized_amount() {
        let mut builder = test_builder();
        builder.exit_amount = BigUint::from(u128::MAX) + BigUint::from(1u32);
        assert_eq!(builder.build().unwrap_err(), ValidationError::WrongAmount);
    }
}
