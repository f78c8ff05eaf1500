use thiserror::Error;

/// The value cannot be represented in the mantissa/exponent packed form,
/// even after rounding down.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("value exceeds the packed representation range")]
pub struct RangeError;

#[derive(Debug, Error, PartialEq)]
pub enum KeyError {
    #[error("seed is too short, at least 32 bytes required")]
    SeedTooShort,
    #[error("couldn't read private key repr")]
    MalformedKey,
}
