use num::BigUint;
use serde::{Deserialize, Serialize};

use zklink_basic_types::{PairId, TokenId};
use zklink_crypto::params::{
    CONTRACT_PRICE_BYTES, MARGIN_PRICE_BYTES, MARGIN_TOKENS_NUMBER, PRICE_BIT_WIDTH,
    USED_POSITION_NUMBER,
};
use zklink_utils::BigUintSerdeAsRadix10Str;

use crate::helpers::pad_front;
use crate::tx::GetBytes;

/// The current price of one perpetual contract pair, as reported by the
/// oracle. Used for cross-margin risk calculation.
#[derive(Default, Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContractPrice {
    pub pair_id: PairId,
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    pub market_price: BigUint,
}

impl GetBytes for ContractPrice {
    fn get_bytes(&self) -> Vec<u8> {
        let bytes_len = self.bytes_len();
        let mut out = Vec::with_capacity(bytes_len);
        out.extend((*self.pair_id as u8).to_be_bytes());
        out.extend(pad_front(
            &self.market_price.to_bytes_be(),
            PRICE_BIT_WIDTH / 8,
        ));
        assert_eq!(out.len(), bytes_len);
        out
    }

    fn bytes_len(&self) -> usize {
        CONTRACT_PRICE_BYTES
    }
}

/// The current spot price of one margin token, as reported by the oracle.
#[derive(Default, Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpotPriceInfo {
    pub token_id: TokenId,
    #[serde(with = "BigUintSerdeAsRadix10Str")]
    pub price: BigUint,
}

impl GetBytes for SpotPriceInfo {
    fn get_bytes(&self) -> Vec<u8> {
        let bytes_len = self.bytes_len();
        let mut out = Vec::with_capacity(bytes_len);
        out.extend((*self.token_id as u16).to_be_bytes());
        out.extend(pad_front(&self.price.to_bytes_be(), PRICE_BIT_WIDTH / 8));
        assert_eq!(out.len(), bytes_len);
        out
    }

    fn bytes_len(&self) -> usize {
        MARGIN_PRICE_BYTES
    }
}

/// Mark prices for all contract pairs and margin tokens, folded into the
/// signed bytes of the transactions that need them.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OraclePrices {
    /// The current prices of all contract pairs, ordered by pair id.
    pub contract_prices: Vec<ContractPrice>,
    /// The current prices of all margin tokens.
    pub margin_prices: Vec<SpotPriceInfo>,
}

impl Default for OraclePrices {
    fn default() -> Self {
        Self {
            contract_prices: (0..USED_POSITION_NUMBER)
                .map(|pair_id| ContractPrice {
                    pair_id: PairId(pair_id as u16),
                    ..Default::default()
                })
                .collect(),
            margin_prices: (0..MARGIN_TOKENS_NUMBER)
                .map(|_| SpotPriceInfo::default())
                .collect(),
        }
    }
}

impl OraclePrices {
    pub fn get_contract_price(&self, pair_id: PairId) -> &BigUint {
        &self.contract_prices[*pair_id as usize].market_price
    }

    pub fn get_spot_price(&self, token_id: TokenId) -> Option<&BigUint> {
        self.margin_prices
            .iter()
            .find(|info| info.token_id == token_id)
            .map(|info| &info.price)
    }
}

impl GetBytes for OraclePrices {
    fn get_bytes(&self) -> Vec<u8> {
        let bytes_len = self.bytes_len();
        let mut out = Vec::with_capacity(bytes_len);
        out.extend(self.contract_prices.rescue_hash());
        out.extend(self.margin_prices.rescue_hash());
        assert_eq!(out.len(), bytes_len);
        out
    }

    fn bytes_len(&self) -> usize {
        62
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_price_lists_have_protocol_geometry() {
        let prices = OraclePrices::default();
        assert_eq!(prices.contract_prices.len(), USED_POSITION_NUMBER);
        assert_eq!(prices.margin_prices.len(), MARGIN_TOKENS_NUMBER);
        for (i, price) in prices.contract_prices.iter().enumerate() {
            assert_eq!(*price.pair_id, i as u16);
        }
    }

    #[test]
    fn encoding_widths() {
        let contract = ContractPrice {
            pair_id: PairId(3),
            market_price: BigUint::from(1_000_000u64),
        };
        assert_eq!(contract.get_bytes().len(), CONTRACT_PRICE_BYTES);

        let spot = SpotPriceInfo {
            token_id: TokenId(18),
            price: BigUint::from(42u32),
        };
        assert_eq!(spot.get_bytes().len(), MARGIN_PRICE_BYTES);

        // Two 31-byte rescue digests.
        assert_eq!(OraclePrices::default().get_bytes().len(), 62);
    }

    #[test]
    fn oracle_prices_hash_is_deterministic() {
        let first = OraclePrices::default().get_bytes();
        let second = OraclePrices::default().get_bytes();
        assert_eq!(first, second);
    }
}
