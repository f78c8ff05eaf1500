//! Amount and fee packing used by the canonical transaction encodings.

use num::{BigUint, FromPrimitive};

use zklink_crypto::error::RangeError;
use zklink_crypto::params;
use zklink_crypto::primitives::FloatConversions;

/// The largest token amount that survives a pack/unpack round trip with full
/// mantissa precision while staying representable as `u128`.
pub const MAX_PACKABLE_TOKEN_AMOUNT: u128 = 34_359_738_367_000_000_000_000_000_000_000_000_000;
/// The fee counterpart of [`MAX_PACKABLE_TOKEN_AMOUNT`].
pub const MAX_PACKABLE_FEE_AMOUNT: u128 = 20_470_000_000_000_000_000_000_000_000_000_000;

/// Transforms the token amount into packed form.
/// If the provided token amount is not packable, it is rounded down to the
/// closest amount that fits in packed form. As a result, some precision will
/// be lost.
pub fn pack_token_amount(amount: &BigUint) -> Result<Vec<u8>, RangeError> {
    FloatConversions::pack(
        amount,
        params::AMOUNT_EXPONENT_BIT_WIDTH,
        params::AMOUNT_MANTISSA_BIT_WIDTH,
    )
}

/// Transforms the fee amount into the packed form.
/// As the packed form for the fee is smaller than the one for the token
/// amount, the same value may be packable as a token amount, but not packable
/// as a fee.
/// If the provided fee amount is not packable, it is rounded down to the
/// closest amount that fits in packed form. As a result, some precision will
/// be lost.
pub fn pack_fee_amount(amount: &BigUint) -> Result<Vec<u8>, RangeError> {
    FloatConversions::pack(
        amount,
        params::FEE_EXPONENT_BIT_WIDTH,
        params::FEE_MANTISSA_BIT_WIDTH,
    )
}

/// Checks whether the token amount can be packed (and thus used in the
/// transaction).
pub fn is_token_amount_packable(amount: &BigUint) -> bool {
    if *amount > BigUint::from(MAX_PACKABLE_TOKEN_AMOUNT) {
        return false;
    }
    let packed = match pack_token_amount(amount) {
        Ok(packed) => packed,
        Err(RangeError) => return false,
    };
    Some(amount.clone()) == unpack_token_amount(&packed)
}

/// Checks whether the fee amount can be packed (and thus used in the
/// transaction).
pub fn is_fee_amount_packable(amount: &BigUint) -> bool {
    if *amount > BigUint::from(MAX_PACKABLE_FEE_AMOUNT) {
        return false;
    }
    let packed = match pack_fee_amount(amount) {
        Ok(packed) => packed,
        Err(RangeError) => return false,
    };
    Some(amount.clone()) == unpack_fee_amount(&packed)
}

/// Attempts to unpack the token amount.
pub fn unpack_token_amount(data: &[u8]) -> Option<BigUint> {
    FloatConversions::unpack(
        data,
        params::AMOUNT_EXPONENT_BIT_WIDTH,
        params::AMOUNT_MANTISSA_BIT_WIDTH,
    )
    .and_then(BigUint::from_u128)
}

/// Attempts to unpack the fee amount.
pub fn unpack_fee_amount(data: &[u8]) -> Option<BigUint> {
    FloatConversions::unpack(
        data,
        params::FEE_EXPONENT_BIT_WIDTH,
        params::FEE_MANTISSA_BIT_WIDTH,
    )
    .and_then(BigUint::from_u128)
}

/// Returns the closest possible packable token amount.
/// The returned amount is always less or equal to the provided amount.
pub fn closest_packable_token_amount(amount: &BigUint) -> Result<BigUint, RangeError> {
    let packed = pack_token_amount(amount)?;
    Ok(unpack_token_amount(&packed).expect("token amount repacking"))
}

/// Returns the closest possible packable fee amount.
/// The returned amount is always less or equal to the provided amount.
pub fn closest_packable_fee_amount(amount: &BigUint) -> Result<BigUint, RangeError> {
    let packed = pack_fee_amount(amount)?;
    Ok(unpack_fee_amount(&packed).expect("fee repacking"))
}

/// Pads a byte sequence to the given length with leading zeroes.
pub fn pad_front(bytes: &[u8], size: usize) -> Vec<u8> {
    assert!(size >= bytes.len());
    let mut result = vec![0u8; size];
    result[size - bytes.len()..].copy_from_slice(bytes);
    result
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_roundtrip() {
        let one = BigUint::from_u32(1).unwrap();
        {
            let round_trip_one = unpack_token_amount(&pack_token_amount(&one).unwrap());
            assert_eq!(Some(one.clone()), round_trip_one);
        }
        {
            let round_trip_one = unpack_fee_amount(&pack_fee_amount(&one).unwrap());
            assert_eq!(Some(one), round_trip_one);
        }
    }

    #[test]
    fn detect_unpackable() {
        let max_mantissa_token =
            BigUint::from_u128((1u128 << params::AMOUNT_MANTISSA_BIT_WIDTH) - 1).unwrap();
        let max_mantissa_fee =
            BigUint::from_u128((1u128 << params::FEE_MANTISSA_BIT_WIDTH) - 1).unwrap();
        assert!(is_token_amount_packable(&max_mantissa_token));
        assert!(is_fee_amount_packable(&max_mantissa_fee));
        assert!(!is_token_amount_packable(
            &(max_mantissa_token + BigUint::from(1u32))
        ));
        assert!(!is_fee_amount_packable(
            &(max_mantissa_fee + BigUint::from(1u32))
        ));
    }

    #[test]
    fn detect_packable_caps() {
        assert!(is_token_amount_packable(&BigUint::from(
            MAX_PACKABLE_TOKEN_AMOUNT
        )));
        assert!(!is_token_amount_packable(
            &(BigUint::from(MAX_PACKABLE_TOKEN_AMOUNT) + BigUint::from(1u32))
        ));
        assert!(is_fee_amount_packable(&BigUint::from(
            MAX_PACKABLE_FEE_AMOUNT
        )));
        assert!(!is_fee_amount_packable(
            &(BigUint::from(MAX_PACKABLE_FEE_AMOUNT) + BigUint::from(1u32))
        ));
    }

    #[test]
    fn pack_to_closest_packable() {
        let fee = BigUint::from(1_234_123_424u32);
        assert!(
            !is_fee_amount_packable(&fee),
            "fee should not be packable for this test"
        );
        let closest_packable_fee = closest_packable_fee_amount(&fee).unwrap();
        assert!(
            is_fee_amount_packable(&closest_packable_fee),
            "repacked fee should be packable"
        );
        assert_ne!(
            closest_packable_fee,
            BigUint::from(0u32),
            "repacked fee should not be 0"
        );
        assert!(
            closest_packable_fee < fee,
            "packable fee should be less than the original"
        );

        let token = BigUint::from(123_456_789_123_456_789u64);
        assert!(
            !is_token_amount_packable(&token),
            "token should not be packable for this test"
        );
        let closest_packable_token = closest_packable_token_amount(&token).unwrap();
        assert!(
            is_token_amount_packable(&closest_packable_token),
            "repacked token amount should be packable"
        );
        assert!(
            closest_packable_token < token,
            "packable token should be less than the original"
        );
    }

    #[test]
    fn closest_packable_known_value() {
        // Regression vector: the packed widths dictate exactly this rounding.
        let amount = BigUint::from_str("1234567899808787").unwrap();
        let closest = closest_packable_token_amount(&amount).unwrap();
        assert_eq!(closest, BigUint::from_str("1234567899800000").unwrap());
        assert!(closest <= amount);
        assert!(is_token_amount_packable(&closest));
    }

    #[test]
    fn closest_packable_never_rounds_up() {
        for raw in [1u128, 999, 1_000, 123_456_789, 34_359_738_368, u64::MAX as u128] {
            let amount = BigUint::from(raw);
            let closest = closest_packable_token_amount(&amount).unwrap();
            assert!(closest <= amount);
            // Repacking an already-packable value is the identity.
            assert_eq!(closest_packable_token_amount(&closest).unwrap(), closest);
        }
    }

    #[test]
    fn closest_packable_out_of_range() {
        let too_big = BigUint::from(u128::MAX) + BigUint::from(1u32);
        assert_eq!(closest_packable_token_amount(&too_big), Err(RangeError));
        assert_eq!(closest_packable_fee_amount(&too_big), Err(RangeError));
    }
}
