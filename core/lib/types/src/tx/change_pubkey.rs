use num::BigUint;
use serde::{Deserialize, Serialize};

use zklink_basic_types::{AccountId, Address, ChainId, Nonce, SubAccountId, TimeStamp, TokenId};
use zklink_utils::BigUintSerdeAsRadix10Str;

use crate::account::PubKeyHash;
use crate::helpers::pack_fee_amount;
use crate::tx::validator::*;
use crate::tx::{GetBytes, PackedEthSignature, ValidationError, ZkLinkSignature};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePubKeyECDSAData {
    pub eth_signature: PackedEthSignature,
}

/// Data needed to check if the L1 address authorized the ChangePubKey
/// operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChangePubKeyEthAuthData {
    /// The authorization was submitted directly to the L1 contract.
    Onchain,
    /// The authorization is an ECDSA signature produced by the account's L1
    /// key.
    ECDSA(ChangePubKeyECDSAData),
}

impl Default for ChangePubKeyEthAuthData {
    fn default() -> Self {
        Self::Onchain
    }
}

impl ChangePubKeyEthAuthData {
    pub fn is_ecdsa(&self) -> bool {
        matches!(self, ChangePubKeyEthAuthData::ECDSA(..))
    }

    pub fn is_onchain(&self) -> bool {
        matches!(self, ChangePubKeyEthAuthData::Onchain)
    }

    /// Serializes the auth data into the witness bytes the L1 contract
    /// expects.
    pub fn get_eth_witness(&self) -> Vec<u8> {
        match self {
            ChangePubKeyEthAuthData::Onchain => Vec::new(),
            ChangePubKeyEthAuthData::ECDSA(ChangePubKeyECDSAData { eth_signature }) => {
                let mut bytes = Vec::new();
                bytes.push(0x00);
                bytes.extend_from_slice(&eth_signature.serialize_packed());
                bytes
            }
        }
    }
}

/// `ChangePubKey` transaction is used to set the owner's public key hash
/// associated with the account.
///
/// Without a public key hash set, the account is unable to execute any L2
/// transactions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePubKey {
    /// Chain whose L1 contract will verify the authorization.
    pub chain_id: ChainId,
    /// zkLink network account ID to apply the operation to.
    pub account_id: AccountId,
    /// zkLink network sub-account ID to apply the operation to.
    pub sub_account_id: SubAccountId,
    /// Public key hash to set.
    pub new_pk_hash: PubKeyHash,
    /// Token to be used for fee.
    pub fee_token: TokenId,
    /// Fee for the transaction; carried in packed form.
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    pub fee: BigUint,
    /// Current account nonce.
    pub nonce: Nonce,
    /// Transaction zkLink signature.
    #[serde(default)]
    pub signature: ZkLinkSignature,
    /// Data needed to check if the L1 address authorized the operation.
    pub eth_auth_data: ChangePubKeyEthAuthData,
    /// Used as request id.
    pub ts: TimeStamp,
}

impl ChangePubKey {
    /// Unique identifier of the transaction type in the zkLink network.
    pub const TX_TYPE: u8 = 0x06;

    pub fn is_onchain(&self) -> bool {
        self.eth_auth_data.is_onchain()
    }

    /// Verifies the transaction fields.
    pub fn check_correctness(&self) -> Result<(), ValidationError> {
        chain_id_validator(&self.chain_id)?;
        account_validator(&self.account_id)?;
        sub_account_validator(&self.sub_account_id)?;
        token_validator(&self.fee_token)?;
        fee_packable(&self.fee)?;
        nonce_validator(&self.nonce)
    }

    /// Provides the message to be signed with the Ethereum private key to
    /// prove control of the account's L1 address.
    ///
    /// Fee data is not included: it is covered by the zkLink signature
    /// instead, which keeps the L1 message at a fixed width.
    pub fn get_eth_signed_data(&self) -> Vec<u8> {
        const CHANGE_PUBKEY_SIGNATURE_LEN: usize = 28;
        let mut eth_signed_msg = Vec::with_capacity(CHANGE_PUBKEY_SIGNATURE_LEN);
        eth_signed_msg.extend_from_slice(&self.new_pk_hash.data);
        eth_signed_msg.extend_from_slice(&self.nonce.to_be_bytes());
        eth_signed_msg.extend_from_slice(&self.account_id.to_be_bytes());
        eth_signed_msg
    }

    /// Recovers the L1 address that signed the ECDSA authorization, if any.
    pub fn verify_eth_signature(&self) -> Option<Address> {
        if let ChangePubKeyEthAuthData::ECDSA(ChangePubKeyECDSAData { eth_signature }) =
            &self.eth_auth_data
        {
            return eth_signature
                .signature_recover_signer(&self.get_eth_signed_data())
                .ok();
        }
        None
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

impl GetBytes for ChangePubKey {
    /// Encodes the transaction data as the byte sequence according to the
    /// zkLink protocol.
    fn get_bytes(&self) -> Vec<u8> {
        let bytes_len = self.bytes_len();
        let mut out = Vec::with_capacity(bytes_len);
        out.extend_from_slice(&[Self::TX_TYPE]);
        out.extend_from_slice(&self.chain_id.to_be_bytes());
        out.extend_from_slice(&self.account_id.to_be_bytes());
        out.extend_from_slice(&self.sub_account_id.to_be_bytes());
        out.extend_from_slice(&self.new_pk_hash.data);
        out.extend_from_slice(&(*self.fee_token as u16).to_be_bytes());
        out.extend_from_slice(&pack_fee_amount(&self.fee).expect("fee is packable"));
        out.extend_from_slice(&self.nonce.to_be_bytes());
        out.extend_from_slice(&self.ts.to_be_bytes());
        assert_eq!(out.len(), bytes_len);
        out
    }

    fn bytes_len(&self) -> usize {
        39
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tx_builder::ChangePubKeyBuilder;

    fn test_builder() -> ChangePubKeyBuilder {
        ChangePubKeyBuilder {
            chain_id: ChainId(1),
            account_id: AccountId(1),
            sub_account_id: SubAccountId(1),
            new_pubkey_hash: PubKeyHash::from_hex("0xd8d5fb6a6caef06aa3dc2abdcdc240987e5330fe")
                .unwrap(),
            fee_token: TokenId(18),
            fee: BigUint::from(100u32),
            nonce: Nonce(1),
            eth_signature: None,
            timestamp: TimeStamp(1693472232),
        }
    }

    #[test]
    fn test_get_bytes_onchain() {
        let change_pubkey = test_builder().build().unwrap();
        assert!(change_pubkey.is_onchain());
        let bytes = change_pubkey.get_bytes();
        let expected_bytes = [
            6, 1, 0, 0, 0, 1, 1, 216, 213, 251, 106, 108, 174, 240, 106, 163, 220, 42, 189, 205,
            194, 64, 152, 126, 83, 48, 254, 0, 18, 12, 128, 0, 0, 0, 1, 100, 240, 85, 232,
        ];
        assert_eq!(bytes, expected_bytes);
    }

    #[test]
    fn eth_signed_data_layout() {
        let change_pubkey = test_builder().build().unwrap();
        let message = change_pubkey.get_eth_signed_data();
        assert_eq!(message.len(), 28);
        assert_eq!(&message[..20], &change_pubkey.new_pk_hash.data);
        assert_eq!(&message[20..24], &change_pubkey.nonce.to_be_bytes());
        assert_eq!(&message[24..], &change_pubkey.account_id.to_be_bytes());
    }

    #[test]
    fn onchain_witness_is_empty() {
        let change_pubkey = test_builder().build().unwrap();
        assert!(change_pubkey.eth_auth_data.get_eth_witness().is_empty());
    }
}
