pub mod packed_eth_signature;
pub mod packed_public_key;
pub mod packed_signature;
pub mod signature;
