use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use zklink_crypto::franklin_crypto::{
    alt_babyjubjub::{
        fs::FsRepr,
        JubjubEngine, {edwards, AltJubjubBn256},
    },
    bellman::pairing::ff::{PrimeField, PrimeFieldRepr},
    eddsa::Signature,
};
use zklink_crypto::params::JUBJUB_PARAMS;
use zklink_crypto::Engine;

#[derive(Clone)]
pub struct PackedSignature(pub Signature<Engine>);

impl PackedSignature {
    pub fn serialize_packed(&self) -> std::io::Result<Vec<u8>> {
        let mut packed_signature = [0u8; 64];
        let (r_bar, s_bar) = packed_signature.as_mut().split_at_mut(32);

        (self.0).r.write(r_bar)?;
        (self.0).s.into_repr().write_le(s_bar)?;

        Ok(packed_signature.to_vec())
    }

    pub fn deserialize_packed(bytes: &[u8]) -> Result<Self, DeserializeError> {
        if bytes.len() != 64 {
            return Err(DeserializeError::IncorrectSignatureLength);
        }
        let (r_bar, s_bar) = bytes.split_at(32);

        let r = edwards::Point::read(r_bar, &JUBJUB_PARAMS as &AltJubjubBn256)
            .map_err(DeserializeError::CannotRestoreRPoint)?;

        let mut s_repr = FsRepr::default();
        s_repr
            .read_le(s_bar)
            .map_err(DeserializeError::CannotReadS)?;

        let s = <Engine as JubjubEngine>::Fs::from_repr(s_repr)
            .map_err(|_| DeserializeError::CannotRestoreS)?;

        Ok(Self(Signature { r, s }))
    }
}

#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("signature size mismatch")]
    IncorrectSignatureLength,
    #[error("failed to restore R point: {0}")]
    CannotRestoreRPoint(std::io::Error),
    #[error("cannot read S scalar: {0}")]
    CannotReadS(std::io::Error),
    #[error("cannot restore S scalar")]
    CannotRestoreS,
}

impl Serialize for PackedSignature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let packed_signature = self.serialize_packed().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&format!("0x{}", hex::encode(&packed_signature)))
    }
}

impl<'de> Deserialize<'de> for PackedSignature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        let string = String::deserialize(deserializer)?;
        let bytes =
            hex::decode(string.strip_prefix("0x").unwrap_or(&string)).map_err(Error::custom)?;
        Self::deserialize_packed(&bytes).map_err(Error::custom)
    }
}
