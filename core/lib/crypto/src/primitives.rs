// Built-in deps
use std::convert::TryInto;
// External deps
use num::{BigUint, ToPrimitive};
// Workspace deps
use crate::error::RangeError;
use crate::franklin_crypto::bellman::pairing::ff::{PrimeField, PrimeFieldRepr};
use crate::franklin_crypto::circuit::multipack;
use crate::franklin_crypto::rescue::rescue_hash;
use crate::params;
use crate::{Engine, Fr, PublicKey};

// Resulting iterator is little endian: lowest bit first

#[derive(Debug)]
pub struct BitIteratorLe<E> {
    t: E,
    n: usize,
    len: usize,
}

impl<E: AsRef<[u64]>> BitIteratorLe<E> {
    pub fn new(t: E) -> Self {
        let len = t.as_ref().len() * 64;

        BitIteratorLe { t, n: 0, len }
    }
}

impl<E: AsRef<[u64]>> Iterator for BitIteratorLe<E> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.n == self.len {
            None
        } else {
            let part = self.n / 64;
            let bit = self.n - (64 * part);
            self.n += 1;

            Some(self.t.as_ref()[part] & (1 << bit) > 0)
        }
    }
}

pub trait GetBitsFixed {
    /// Get exactly `n` bits from the value in little endian order.
    /// If `n` is larger than the value bit length, it is padded with `false`
    /// for the result to exactly match `n`.
    fn get_bits_le_fixed(&self, n: usize) -> Vec<bool>;
}

impl<Fe: PrimeField> GetBitsFixed for Fe {
    fn get_bits_le_fixed(&self, n: usize) -> Vec<bool> {
        let mut r: Vec<bool> = Vec::with_capacity(n);
        r.extend(BitIteratorLe::new(self.into_repr()).take(n));
        let len = r.len();
        r.extend((len..n).map(|_| false));
        r
    }
}

pub struct BitConvert;

impl BitConvert {
    /// Converts a set of bits to a set of bytes, first bit of each chunk
    /// becoming the lowest bit of the byte.
    #[allow(clippy::wrong_self_convention)]
    pub fn into_bytes(bits: Vec<bool>) -> Vec<u8> {
        assert_eq!(bits.len() % 8, 0);
        let mut message_bytes: Vec<u8> = vec![];

        let byte_chunks = bits.chunks(8);
        for byte_chunk in byte_chunks {
            let mut byte = 0u8;
            for (i, bit) in byte_chunk.iter().enumerate() {
                if *bit {
                    byte |= 1 << i;
                }
            }
            message_bytes.push(byte);
        }

        message_bytes
    }

    /// Converts a set of bits to a set of bytes with the bit order reversed
    /// inside each byte.
    #[allow(clippy::wrong_self_convention)]
    pub fn into_bytes_ordered(bits: Vec<bool>) -> Vec<u8> {
        assert_eq!(bits.len() % 8, 0);
        let mut message_bytes: Vec<u8> = vec![];

        let byte_chunks = bits.chunks(8);
        for byte_chunk in byte_chunks {
            let mut byte = 0u8;
            for (i, bit) in byte_chunk.iter().rev().enumerate() {
                if *bit {
                    byte |= 1 << i;
                }
            }
            message_bytes.push(byte);
        }

        message_bytes
    }

    /// Converts a set of big endian bytes to a set of bits.
    pub fn from_be_bytes(bytes: &[u8]) -> Vec<bool> {
        let mut bits = vec![];
        for byte in bytes {
            let mut temp = *byte;
            for _ in 0..8 {
                bits.push(temp & 0x80 == 0x80);
                temp <<= 1;
            }
        }
        bits
    }
}

/// Convert Uint to the floating-point representation and vice versa.
pub struct FloatConversions;

impl FloatConversions {
    /// Packs a BigUint to a floating-point number with an exponent base of 10.
    /// Accuracy may be lost: the result is the largest representable value
    /// that does not exceed the input.
    pub fn pack(
        number: &BigUint,
        exponent_len: usize,
        mantissa_len: usize,
    ) -> Result<Vec<u8>, RangeError> {
        let uint = number.to_u128().ok_or(RangeError)?;

        let mut vec = Self::to_float(uint, exponent_len, mantissa_len, 10)?;
        vec.reverse();
        Ok(BitConvert::into_bytes_ordered(vec))
    }

    /// Unpacks a floating point number with the given parameters.
    /// Returns `None` for numbers greater than 2 ^ 128.
    pub fn unpack(data: &[u8], exponent_len: usize, mantissa_len: usize) -> Option<u128> {
        if exponent_len + mantissa_len != data.len() * 8 {
            return None;
        }

        let bits = BitConvert::from_be_bytes(data);

        let mut mantissa = 0u128;
        for (i, bit) in bits[0..mantissa_len].iter().rev().enumerate() {
            if *bit {
                mantissa = mantissa.checked_add(1u128 << i)?;
            }
        }

        let mut exponent_pow = 0u32;
        for (i, bit) in bits[mantissa_len..(mantissa_len + exponent_len)]
            .iter()
            .rev()
            .enumerate()
        {
            if *bit {
                exponent_pow = exponent_pow.checked_add(1u32 << i)?;
            }
        }

        let exponent = 10u128.checked_pow(exponent_pow)?;

        mantissa.checked_mul(exponent)
    }

    /// Packs a u128 to a floating-point number with the given parameters.
    /// The mantissa is rounded down, so the encoded value never exceeds the
    /// input.
    pub fn to_float(
        integer: u128,
        exponent_length: usize,
        mantissa_length: usize,
        exponent_base: u32,
    ) -> Result<Vec<bool>, RangeError> {
        let exponent_base = u128::from(exponent_base);

        let mut max_exponent = 1u128;
        let max_power = (1 << exponent_length) - 1;

        for _ in 0..max_power {
            max_exponent = max_exponent.saturating_mul(exponent_base);
        }

        let max_mantissa = (1u128 << mantissa_length) - 1;

        if integer > max_mantissa.saturating_mul(max_exponent) {
            return Err(RangeError);
        }

        let mut exponent: usize = 0;
        let mantissa = if integer > max_mantissa {
            // always try best precision
            let exponent_guess = integer / max_mantissa;
            let mut exponent_temp = exponent_guess;

            loop {
                if exponent_temp < exponent_base {
                    break;
                }
                exponent_temp /= exponent_base;
                exponent += 1;
            }

            exponent_temp = 1u128;
            for _ in 0..exponent {
                exponent_temp *= exponent_base;
            }

            if exponent_temp * max_mantissa < integer {
                exponent += 1;
                exponent_temp *= exponent_base;
            }

            integer / exponent_temp
        } else {
            integer
        };

        // encode into bits. First bits of mantissa in LE order

        let mut encoding = Vec::with_capacity(exponent_length + mantissa_length);

        for i in 0..exponent_length {
            if exponent & (1 << i) != 0 {
                encoding.push(true);
            } else {
                encoding.push(false);
            }
        }

        for i in 0..mantissa_length {
            if mantissa & (1 << i) != 0 {
                encoding.push(true);
            } else {
                encoding.push(false);
            }
        }

        debug_assert_eq!(encoding.len(), exponent_length + mantissa_length);
        Ok(encoding)
    }
}

fn rescue_hash_fr(input: Vec<bool>) -> Fr {
    let packed = multipack::compute_multipacking::<Engine>(&input);
    let sponge_output = rescue_hash::<Engine>(&params::RESCUE_PARAMS, &packed);
    assert_eq!(sponge_output.len(), 1, "rescue hash problem");
    sponge_output[0]
}

pub fn rescue_hash_elements(input: &[Fr]) -> Fr {
    let sponge_output = rescue_hash::<Engine>(&params::RESCUE_PARAMS, input);
    assert_eq!(sponge_output.len(), 1, "rescue hash problem");
    sponge_output[0]
}

/// Rescue pre-hash of a message to be signed: the message bits are zero
/// padded to the fixed signing width, hashed, and the resulting field element
/// serialized to 32 bytes.
pub fn rescue_hash_tx_msg(msg: &[u8]) -> Vec<u8> {
    let mut msg_bits = BitConvert::from_be_bytes(msg);
    assert!(msg_bits.len() <= params::PAD_MSG_BEFORE_HASH_BITS_LEN);
    msg_bits.resize(params::PAD_MSG_BEFORE_HASH_BITS_LEN, false);
    let hash_fr = rescue_hash_fr(msg_bits);
    let hash_bits = hash_fr.get_bits_le_fixed(256);
    BitConvert::into_bytes(hash_bits)
}

/// Rescue hash of an arbitrary byte string into a 31-byte digest, used to
/// fold order and oracle-price data into a fixed-width field of the signed
/// transaction bytes.
pub fn rescue_hash_bytes(msg: &[u8]) -> Vec<u8> {
    let msg_bits = BitConvert::from_be_bytes(msg);
    let hash_fr = rescue_hash_fr(msg_bits);
    let hash_bits = hash_fr.get_bits_le_fixed(248);
    BitConvert::into_bytes_ordered(hash_bits)
}

/// Rescue hash of the fixed-width (maker, taker, oracle-prices-hash) block.
pub fn rescue_hash_orders(msg: &[u8]) -> Vec<u8> {
    assert_eq!(msg.len(), params::ORDERS_BYTES);
    rescue_hash_bytes(msg)
}

/// Computes the 20-byte public key hash: the rescue hash of the public key
/// point coordinates, truncated to the low 160 bits.
pub fn pub_key_hash_bytes(pub_key: &PublicKey) -> Vec<u8> {
    let (pub_x, pub_y) = pub_key.0.into_xy();
    let hash_fr = rescue_hash_elements(&[pub_x, pub_y]);
    let hash_bits = hash_fr.get_bits_le_fixed(params::NEW_PUBKEY_HASH_WIDTH);
    let mut bytes = BitConvert::into_bytes(hash_bits);
    bytes.reverse();
    bytes
}

pub trait FromBytes: Sized {
    /// Converts a sequence of bytes to a number.
    fn from_bytes(bytes: &[u8]) -> Option<Self>;
}

macro_rules! impl_from_bytes_for_primitive {
    ($Type:ty) => {
        impl FromBytes for $Type {
            fn from_bytes(bytes: &[u8]) -> Option<Self> {
                const COUNT: usize = std::mem::size_of::<$Type>();
                if bytes.len() > COUNT {
                    return None;
                }
                let mut padded = [0u8; COUNT];
                padded[COUNT - bytes.len()..].copy_from_slice(bytes);
                Some(Self::from_be_bytes(padded[..].try_into().ok()?))
            }
        }
    };
}

impl_from_bytes_for_primitive!(u16);
impl_from_bytes_for_primitive!(u32);
impl_from_bytes_for_primitive!(u128);

#[cfg(test)]
mod test {
    use super::*;
    use num::FromPrimitive;

    #[test]
    fn test_bits_conversions() {
        let mut bits = vec![];

        bits.extend(vec![true, false, false, true, true, false, true, false]);
        bits.extend(vec![false, false, true, true, false, true, true, false]);
        bits.extend(vec![false, false, false, false, false, false, false, true]);

        let bytes = BitConvert::into_bytes(bits.clone());
        assert_eq!(bytes, vec![89, 108, 128]);

        let bytes = BitConvert::into_bytes_ordered(bits.clone());
        assert_eq!(bytes, vec![154, 54, 1]);

        assert_eq!(BitConvert::from_be_bytes(&[154, 54, 1]), bits);
    }

    #[test]
    fn test_float_conversions() {
        let (number, exponent_len, mantissa_len, exponent_base): (u128, usize, usize, u32) =
            (0xDEADBEAF, 5, 35, 10);

        let packed_number =
            FloatConversions::pack(&BigUint::from(number), exponent_len, mantissa_len).unwrap();
        let unpacked_number = FloatConversions::unpack(&packed_number, exponent_len, mantissa_len);
        let convert_number =
            FloatConversions::to_float(number, exponent_len, mantissa_len, exponent_base);

        assert_eq!(unpacked_number, Some(number));
        assert_eq!(packed_number, vec![27, 213, 183, 213, 224]);
        assert_eq!(
            convert_number.ok(),
            Some(vec![
                false, false, false, false, false, true, true, true, true, false, true, false,
                true, false, true, true, true, true, true, false, true, true, false, true, true,
                false, true, false, true, false, true, true, true, true, false, true, true, false,
                false, false
            ])
        );
    }

    #[test]
    fn test_float_conversion_range() {
        // Fee widths: 11-bit mantissa, 5-bit exponent.
        let max_exponent = (0..31).fold(BigUint::from(1u32), |acc, _| acc * 10u32);
        let max_packable = BigUint::from((1u128 << 11) - 1) * max_exponent;
        assert!(FloatConversions::pack(&max_packable, 5, 11).is_ok());
        assert_eq!(
            FloatConversions::pack(&(&max_packable + &max_packable), 5, 11),
            Err(RangeError)
        );
        // Values beyond u128 cannot be packed at all.
        let too_big = BigUint::from(u128::MAX) + 1u32;
        assert_eq!(FloatConversions::pack(&too_big, 5, 35), Err(RangeError));
    }

    #[test]
    fn test_rescue_hash_tx_msg() {
        let msg = [1u8, 2u8, 3u8, 4u8];
        let hash = rescue_hash_tx_msg(&msg);

        assert_eq!(
            hash,
            vec![
                249, 154, 208, 123, 96, 89, 132, 235, 231, 63, 56, 200, 153, 131, 27, 183, 128, 71,
                26, 245, 208, 120, 49, 246, 233, 72, 230, 84, 66, 150, 170, 27
            ]
        );
    }

    #[test]
    fn test_rescue_hash_orders() {
        let msg = [1u8; 178];
        let hash = rescue_hash_orders(&msg);
        assert_eq!(
            hash,
            vec![
                165, 52, 198, 24, 171, 190, 215, 122, 29, 12, 31, 190, 98, 145, 72, 245, 89, 202,
                199, 73, 239, 213, 234, 218, 74, 182, 95, 119, 141, 75, 253
            ]
        );
    }

    #[test]
    fn test_uint_from_bytes() {
        let bytes = vec![1; 1];
        let number: u32 = FromBytes::from_bytes(&bytes).unwrap();
        assert_eq!(number, 1);

        let bytes = [1u8, 2u8, 3u8, 4u8];
        let number: u32 = FromBytes::from_bytes(&bytes).unwrap();
        assert_eq!(number, 0x01020304);

        let bytes = [1u8, 2u8, 3u8, 4u8, 5u8];
        let number: u128 = FromBytes::from_bytes(&bytes).unwrap();
        assert_eq!(number, 0x0102030405);
    }

    #[test]
    fn test_bit_iterator_le() {
        let test_vector = [0xa953_d79b_83f6_ab59, 0x6dea_2059_e200_bd39];
        let out: Vec<bool> = BitIteratorLe::new(&test_vector).collect();
        let reference: Vec<bool> = (0..128)
            .map(|i| (test_vector[i / 64] >> (i % 64)) & 1 == 1)
            .collect();
        assert_eq!(reference, out);
    }

    #[test]
    fn unpack_rejects_width_mismatch() {
        assert_eq!(FloatConversions::unpack(&[0u8; 4], 5, 35), None);
        let big = BigUint::from_u64(1_000_000).unwrap();
        let packed = FloatConversions::pack(&big, 5, 35).unwrap();
        assert_eq!(packed.len(), 5);
    }
}
