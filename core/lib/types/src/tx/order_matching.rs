use num::{BigUint, One, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use zklink_basic_types::{AccountId, Nonce, SlotId, SubAccountId, TokenId};
use zklink_crypto::params::{ORDERS_BYTES, PRICE_BIT_WIDTH};
use zklink_crypto::primitives::rescue_hash_orders;
use zklink_crypto::PrivateKey;
use zklink_utils::BigUintSerdeAsRadix10Str;

use crate::account::PubKeyHash;
use crate::helpers::{pack_fee_amount, pack_token_amount, pad_front};
use crate::tx::prices::OraclePrices;
use crate::tx::validator::*;
use crate::tx::{GetBytes, ValidationError, ZkLinkSignature};

/// A signed limit order, nested inside an `OrderMatching` transaction.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub account_id: AccountId,
    pub sub_account_id: SubAccountId,
    /// The order slot occupied within the sub-account.
    pub slot_id: SlotId,
    /// Order nonce; carried in 24 bits of the canonical encoding.
    pub nonce: Nonce,
    pub base_token_id: TokenId,
    pub quote_token_id: TokenId,
    /// The amount of base token to buy or sell; carried in packed form.
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    pub amount: BigUint,
    /// Price of one base token unit in quote token, at full precision.
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    pub price: BigUint,
    /// Order side, 0: buy, 1: sell.
    pub is_sell: u8,
    /// Subsidised orders only charge the maker rate.
    pub has_subsidy: u8,
    /// index 0 => maker_fee, index 1 => taker_fee, 100 means 1%.
    pub fee_rates: [u8; 2],
    #[serde(default)]
    pub signature: ZkLinkSignature,
}

impl Order {
    /// Tag of the order message inside the signed matching payload.
    pub const MSG_TYPE: u8 = 0xff;

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        account_id: AccountId,
        sub_account_id: SubAccountId,
        slot_id: SlotId,
        nonce: Nonce,
        base_token_id: TokenId,
        quote_token_id: TokenId,
        amount: BigUint,
        price: BigUint,
        is_sell: bool,
        has_subsidy: bool,
        maker_fee_rate: u8,
        taker_fee_rate: u8,
        signature: Option<ZkLinkSignature>,
    ) -> Self {
        Self {
            account_id,
            sub_account_id,
            slot_id,
            nonce,
            base_token_id,
            quote_token_id,
            amount,
            price,
            is_sell: u8::from(is_sell),
            has_subsidy: u8::from(has_subsidy),
            fee_rates: [maker_fee_rate, taker_fee_rate],
            signature: signature.unwrap_or_default(),
        }
    }

    /// Verifies the order fields.
    pub fn check_correctness(&self) -> Result<(), ValidationError> {
        account_validator(&self.account_id)?;
        sub_account_validator(&self.sub_account_id)?;
        slot_id_validator(&self.slot_id)?;
        order_nonce_validator(&self.nonce)?;
        token_validator(&self.base_token_id)?;
        token_validator(&self.quote_token_id)?;
        amount_packable(&self.amount)?;
        price_validator(&self.price)?;
        boolean_validator(self.is_sell)?;
        boolean_validator(self.has_subsidy)
    }

    /// Returns a copy of this order carrying a fresh signature over its
    /// canonical bytes. The original value is left untouched.
    pub fn create_signed_order(&self, private_key: &PrivateKey) -> Order {
        let mut order = self.clone();
        order.signature = ZkLinkSignature::sign_musig(private_key, &order.get_bytes());
        order
    }

    pub fn is_signature_valid(&self) -> bool {
        self.signature.verify_musig(&self.get_bytes()).is_some()
    }

    /// Restores the `PubKeyHash` from the order signature.
    pub fn verify_signature(&self) -> Option<PubKeyHash> {
        self.signature
            .verify_musig(&self.get_bytes())
            .map(|pub_key| PubKeyHash::from_pubkey(&pub_key))
    }
}

impl GetBytes for Order {
    fn get_bytes(&self) -> Vec<u8> {
        let bytes_len = self.bytes_len();
        let mut out = Vec::with_capacity(bytes_len);
        out.extend_from_slice(&[Self::MSG_TYPE]);
        out.extend_from_slice(&self.account_id.to_be_bytes());
        out.extend_from_slice(&self.sub_account_id.to_be_bytes());
        out.extend_from_slice(&(*self.slot_id as u16).to_be_bytes());
        out.extend_from_slice(&self.nonce.to_be_bytes()[1..]);
        out.extend_from_slice(&(*self.base_token_id as u16).to_be_bytes());
        out.extend_from_slice(&(*self.quote_token_id as u16).to_be_bytes());
        out.extend_from_slice(&pad_front(&self.price.to_bytes_be(), PRICE_BIT_WIDTH / 8));
        out.extend_from_slice(&self.is_sell.to_be_bytes());
        out.extend(self.fee_rates);
        out.extend_from_slice(&self.has_subsidy.to_be_bytes());
        out.extend_from_slice(&pack_token_amount(&self.amount).expect("amount is packable"));
        assert_eq!(out.len(), bytes_len);
        out
    }

    fn bytes_len(&self) -> usize {
        38
    }
}

/// `OrderMatching` transaction settles a taker/maker pair of previously
/// signed limit orders.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderMatching {
    /// zkLink network account ID of the transaction initiator.
    pub account_id: AccountId,
    pub sub_account_id: SubAccountId,
    /// Full content of the taker and maker orders.
    pub taker: Order,
    pub maker: Order,

    /// Mark prices for all contract pairs and margin tokens, required for
    /// cross-margin risk calculation.
    pub oracle_prices: OraclePrices,

    /// Fee for the transaction; carried in packed form.
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    pub fee: BigUint,
    pub fee_token: TokenId,

    /// The maximum base (quote) token amount the submitter expects to trade.
    /// Zero values leave the trade bounded only by the orders themselves.
    /// These are differences of packable amounts and may not be packable
    /// themselves, so they are carried at full width.
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    pub expect_base_amount: BigUint,
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    pub expect_quote_amount: BigUint,

    #[serde(default)]
    pub signature: ZkLinkSignature,
}

impl OrderMatching {
    /// Unique identifier of the transaction type in the zkLink network.
    pub const TX_TYPE: u8 = 0x08;

    /// Verifies the transaction and both embedded orders. Orders must
    /// already carry valid signatures: matching never re-signs them.
    pub fn check_correctness(&self) -> Result<(), ValidationError> {
        account_validator(&self.account_id)?;
        sub_account_validator(&self.sub_account_id)?;
        token_validator(&self.fee_token)?;
        fee_packable(&self.fee)?;
        amount_unpackable(&self.expect_base_amount)?;
        amount_unpackable(&self.expect_quote_amount)?;
        self.taker.check_correctness()?;
        self.maker.check_correctness()?;
        if !self.taker.is_signature_valid() || !self.maker.is_signature_valid() {
            return Err(ValidationError::UnsignedOrder);
        }
        contract_prices_validator(&self.oracle_prices.contract_prices)?;
        margin_prices_validator(&self.oracle_prices.margin_prices)
    }

    /// Returns the expected exchange amount of the maker.
    pub fn maker_expect_amount(&self) -> &BigUint {
        if self.maker.is_sell.is_one() {
            &self.expect_base_amount
        } else {
            &self.expect_quote_amount
        }
    }

    /// Returns the expected exchange amount of the taker.
    pub fn taker_expect_amount(&self) -> &BigUint {
        if self.taker.is_sell.is_one() {
            &self.expect_base_amount
        } else {
            &self.expect_quote_amount
        }
    }

    /// In expect mode the trade is bounded by the submitter's expected
    /// amounts rather than by the orders' maximum fill.
    pub fn is_expect_mode(&self) -> bool {
        !self.expect_base_amount.is_zero() && !self.expect_quote_amount.is_zero()
    }

    pub fn is_signature_valid(&self) -> bool {
        self.signature.verify_musig(&self.get_bytes()).is_some()
    }
}

impl GetBytes for OrderMatching {
    fn get_bytes(&self) -> Vec<u8> {
        let mut orders_bytes = Vec::with_capacity(ORDERS_BYTES);
        orders_bytes.extend(self.maker.get_bytes());
        orders_bytes.extend(self.taker.get_bytes());
        orders_bytes.extend(self.oracle_prices.rescue_hash());
        orders_bytes.resize(ORDERS_BYTES, 0);

        let bytes_len = self.bytes_len();
        let mut out = Vec::with_capacity(bytes_len);
        out.push(Self::TX_TYPE);
        out.extend_from_slice(&self.account_id.to_be_bytes());
        out.extend_from_slice(&self.sub_account_id.to_be_bytes());
        out.extend(rescue_hash_orders(&orders_bytes));
        out.extend_from_slice(&(*self.fee_token as u16).to_be_bytes());
        out.extend_from_slice(&pack_fee_amount(&self.fee).expect("fee is packable"));
        out.extend_from_slice(
            &self
                .expect_base_amount
                .to_u128()
                .expect("expect base amount fits the balance width")
                .to_be_bytes(),
        );
        out.extend_from_slice(
            &self
                .expect_quote_amount
                .to_u128()
                .expect("expect quote amount fits the balance width")
                .to_be_bytes(),
        );
        assert_eq!(out.len(), bytes_len);
        out
    }

    fn bytes_len(&self) -> usize {
        73
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use zklink_crypto::private_key_from_seed;

    fn test_order(account: u32, is_sell: bool) -> Order {
        Order::new(
            AccountId(account),
            SubAccountId(1),
            SlotId(3),
            Nonce(1),
            TokenId(18),
            TokenId(145),
            BigUint::from(323289u32),
            BigUint::from(135u32),
            is_sell,
            false,
            2,
            5,
            None,
        )
    }

    #[test]
    fn order_encoding_layout() {
        let order = test_order(1, true);
        let bytes = order.get_bytes();
        assert_eq!(bytes.len(), order.bytes_len());
        assert_eq!(bytes[0], Order::MSG_TYPE);
        // the nonce occupies three bytes
        assert_eq!(&bytes[8..11], &[0, 0, 1]);
        // price is front-padded to 15 bytes
        assert_eq!(bytes[11 + 4..11 + 4 + 14], [0u8; 14]);
    }

    #[test]
    fn signed_order_does_not_mutate_original() {
        let pk = private_key_from_seed(&[1u8; 32]).unwrap();
        let order = test_order(1, true);
        let signed = order.create_signed_order(&pk);
        assert!(!order.is_signature_valid());
        assert!(signed.is_signature_valid());
        assert_eq!(order.get_bytes(), signed.get_bytes());
    }

    #[test]
    fn matching_requires_signed_orders() {
        let matching = OrderMatching {
            account_id: AccountId(3),
            sub_account_id: SubAccountId(1),
            taker: test_order(1, true),
            maker: test_order(2, false),
            oracle_prices: OraclePrices::default(),
            fee: BigUint::from(1000u32),
            fee_token: TokenId(18),
            expect_base_amount: BigUint::zero(),
            expect_quote_amount: BigUint::zero(),
            signature: Default::default(),
        };
        assert_eq!(
            matching.check_correctness().unwrap_err(),
            ValidationError::UnsignedOrder
        );
    }

    #[test]
    fn matching_encoding_width() {
        let pk = private_key_from_seed(&[2u8; 32]).unwrap();
        let matching = OrderMatching {
            account_id: AccountId(3),
            sub_account_id: SubAccountId(1),
            taker: test_order(1, true).create_signed_order(&pk),
            maker: test_order(2, false).create_signed_order(&pk),
            oracle_prices: OraclePrices::default(),
            fee: BigUint::from(1000u32),
            fee_token: TokenId(18),
            expect_base_amount: BigUint::from(808077878u64),
            expect_quote_amount: BigUint::from(5479779u64),
            signature: Default::default(),
        };
        assert!(matching.check_correctness().is_ok());
        let bytes = matching.get_bytes();
        assert_eq!(bytes.len(), matching.bytes_len());
        assert_eq!(bytes[0], OrderMatching::TX_TYPE);
    }
}
