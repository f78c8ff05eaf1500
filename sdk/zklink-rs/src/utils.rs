// Public re-exports of the packing helpers callers need to pre-round
// amounts before building transactions.
pub use zklink_types::helpers::{
    closest_packable_fee_amount, closest_packable_token_amount, is_fee_amount_packable,
    is_token_amount_packable,
};

#[cfg(test)]
mod test {
    use super::*;
    use num::BigUint;
    use std::str::FromStr;

    #[test]
    fn closest_packable_rounds_down() {
        let amount = BigUint::from_str("1234567899808787").unwrap();
        let closest = closest_packable_token_amount(&amount).unwrap();
        assert_eq!(closest, BigUint::from_str("1234567899800000").unwrap());
        assert!(is_token_amount_packable(&closest));
    }
}
