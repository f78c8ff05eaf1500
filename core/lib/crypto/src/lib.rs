//! Cryptographic primitives of the zkLink network: curve and hash parameter
//! singletons, the eddsa key pair used by the L2 scheme, and the bit-level
//! packing helpers shared by the canonical transaction encodings.

pub use franklin_crypto;
pub use franklin_crypto::bellman;

use franklin_crypto::alt_babyjubjub::fs::FsRepr;
use franklin_crypto::bellman::pairing::bn256;
use franklin_crypto::bellman::pairing::ff::PrimeField;
use franklin_crypto::bellman::PrimeFieldRepr;
use franklin_crypto::{
    eddsa::{PrivateKey as PrivateKeyImport, PublicKey as PublicKeyImport},
    jubjub::{FixedGenerators, JubjubEngine},
};
use sha2::{Digest, Sha256};

use crate::error::KeyError;

pub mod error;
pub mod params;
pub mod primitives;

pub type Engine = bn256::Bn256;
pub type Fr = bn256::Fr;
pub type Fs = <Engine as JubjubEngine>::Fs;

pub type PrivateKey = PrivateKeyImport<Engine>;
pub type PublicKey = PublicKeyImport<Engine>;

pub fn priv_key_from_fs(fs: Fs) -> PrivateKey {
    PrivateKeyImport(fs)
}

/// Derives public key from private.
pub fn public_key_from_private(pk: &PrivateKey) -> PublicKey {
    PublicKey::from_private(
        pk,
        FixedGenerators::SpendingKeyGenerator,
        &params::JUBJUB_PARAMS,
    )
}

/// Generates a new `PrivateKey` from seed using a deterministic algorithm:
/// the seed is hashed via `sha256`, and the output is treated as a `PrivateKey`.
/// If the obtained value doesn't encode a valid field element, hashing is
/// applied repeatedly to the previous output until it does.
pub fn private_key_from_seed(seed: &[u8]) -> Result<PrivateKey, KeyError> {
    if seed.len() < 32 {
        return Err(KeyError::SeedTooShort);
    }

    let sha256_bytes = |input: &[u8]| -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(input);
        hasher.finalize().to_vec()
    };

    let mut effective_seed = sha256_bytes(seed);

    loop {
        let raw_priv_key = sha256_bytes(&effective_seed);
        let mut fs_repr = FsRepr::default();
        fs_repr
            .read_be(&raw_priv_key[..])
            .map_err(|_| KeyError::MalformedKey)?;
        match Fs::from_repr(fs_repr) {
            Ok(fs) => return Ok(priv_key_from_fs(fs)),
            Err(_) => {
                effective_seed = raw_priv_key;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn private_key_from_seed_is_deterministic() {
        let seed = [42u8; 32];
        let key_a = private_key_from_seed(&seed).unwrap();
        let key_b = private_key_from_seed(&seed).unwrap();
        assert_eq!(key_a.0, key_b.0);

        let other = private_key_from_seed(&[43u8; 32]).unwrap();
        assert_ne!(key_a.0, other.0);
    }

    #[test]
    fn private_key_from_seed_rejects_short_seed() {
        assert_eq!(
            private_key_from_seed(&[1u8; 31]).unwrap_err(),
            KeyError::SeedTooShort
        );
    }
}
