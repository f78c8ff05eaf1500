// Built-in imports
use std::fmt;
// Workspace uses
use zklink_crypto::{private_key_from_seed, PrivateKey};
use zklink_eth_signer::{L1SignerType, PrivateKeySigner};
use zklink_types::tx::{
    ChangePubKey, ChangePubKeyECDSAData, ChangePubKeyEthAuthData, ForcedExit, GetBytes, Order,
    OrderMatching, PackedEthSignature, Transfer, Withdraw, ZkLinkSignature,
};
use zklink_types::{Address, PubKeyHash, TxSignature, H256};

use crate::error::SigningError;

/// Holds the signing contexts of both signature schemes, derived from one
/// Ethereum private key:
///
/// * the L1 context signs Ethereum personal messages with ECDSA over
///   secp256k1;
/// * the L2 context signs canonical transaction bytes with musig rescue; its
///   eddsa key is obtained by signing a fixed seed message with the L1 key,
///   so one secret deterministically yields both schemes.
///
/// Signing never mutates the supplied transaction and advances no internal
/// state, so a `Signer` can be shared freely between threads.
pub struct Signer {
    pub pubkey_hash: PubKeyHash,
    pub address: Address,
    private_key: PrivateKey,
    eth_signer: PrivateKeySigner,
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("pubkey_hash", &self.pubkey_hash)
            .field("address", &self.address)
            .finish()
    }
}

impl Signer {
    /// The fixed message whose L1 signature seeds the L2 key derivation.
    const SIGN_MESSAGE: &'static str =
        "Sign this message to create a key to interact with zkLink's layer2 services.\nNOTE: This application is powered by zkLink protocol.\n\nOnly sign this message for a trusted client!";

    /// Creates a signer from a hex-encoded private key and the L1 scheme tag.
    pub fn new(private_key: &str, signer_type: L1SignerType) -> Result<Self, SigningError> {
        let L1SignerType::Eth = signer_type;

        let raw = hex::decode(private_key.strip_prefix("0x").unwrap_or(private_key))
            .map_err(|_| SigningError::MalformedPrivateKey)?;
        if raw.len() != 32 {
            return Err(SigningError::MalformedPrivateKey);
        }
        let eth_private_key = H256::from_slice(&raw);
        let eth_signer = PrivateKeySigner::new(eth_private_key);
        let address = eth_signer.address()?;

        let seed = eth_signer
            .sign_message(Self::SIGN_MESSAGE.as_bytes())?
            .serialize_packed();
        let private_key = private_key_from_seed(&seed)?;
        let pubkey_hash = PubKeyHash::from_privkey(&private_key);

        Ok(Self {
            pubkey_hash,
            address,
            private_key,
            eth_signer,
        })
    }

    pub fn pubkey_hash(&self) -> &PubKeyHash {
        &self.pubkey_hash
    }

    /// Produces the L1 ECDSA authorization for a key change.
    ///
    /// The authorization model of this transaction is proof of L1 key
    /// ownership, so the resulting bundle carries the L1 signature only.
    pub fn sign_change_pubkey_with_eth_ecdsa_auth(
        &self,
        tx: &ChangePubKey,
    ) -> Result<TxSignature, SigningError> {
        tx.check_correctness()?;
        let mut tx = tx.clone();

        let eth_signature = self.eth_signer.sign_message(&tx.get_eth_signed_data())?;
        tx.eth_auth_data = ChangePubKeyEthAuthData::ECDSA(ChangePubKeyECDSAData {
            eth_signature: eth_signature.clone(),
        });
        if tx.verify_eth_signature() != Some(self.address) {
            return Err(SigningError::WrongAuthSignature);
        }

        Ok(TxSignature {
            tx: tx.into(),
            layer1_signature: Some(eth_signature.into()),
            layer2_signature: None,
        })
    }

    /// Signs a transfer with the L2 scheme and confirms it with an L1
    /// signature over the human-readable message.
    ///
    /// A supplied signature is used instead of deriving a fresh one, which
    /// supports externally-signed flows such as hardware wallets. An L2
    /// override must verify against the canonical transaction bytes.
    pub fn sign_transfer(
        &self,
        tx: &Transfer,
        token_symbol: &str,
        eth_signature: Option<PackedEthSignature>,
        zklink_signature: Option<ZkLinkSignature>,
    ) -> Result<TxSignature, SigningError> {
        tx.check_correctness()?;
        let mut tx = tx.clone();

        let signature = self.zklink_signature_for(&tx.get_bytes(), zklink_signature)?;
        tx.signature = signature.clone();

        let eth_signature = match eth_signature {
            Some(signature) => signature,
            None => {
                let message = tx.get_eth_sign_msg(token_symbol);
                self.eth_signer.sign_message(message.as_bytes())?
            }
        };

        Ok(TxSignature {
            tx: tx.into(),
            layer1_signature: Some(eth_signature.into()),
            layer2_signature: Some(signature),
        })
    }

    /// Signs a withdrawal; same signature rules as [`Self::sign_transfer`].
    pub fn sign_withdraw(
        &self,
        tx: &Withdraw,
        l2_source_token_symbol: &str,
        eth_signature: Option<PackedEthSignature>,
        zklink_signature: Option<ZkLinkSignature>,
    ) -> Result<TxSignature, SigningError> {
        tx.check_correctness()?;
        let mut tx = tx.clone();

        let signature = self.zklink_signature_for(&tx.get_bytes(), zklink_signature)?;
        tx.signature = signature.clone();

        let eth_signature = match eth_signature {
            Some(signature) => signature,
            None => {
                let message = tx.get_eth_sign_msg(l2_source_token_symbol);
                self.eth_signer.sign_message(message.as_bytes())?
            }
        };

        Ok(TxSignature {
            tx: tx.into(),
            layer1_signature: Some(eth_signature.into()),
            layer2_signature: Some(signature),
        })
    }

    /// Signs a forced exit with the L2 scheme.
    pub fn sign_forced_exit(&self, tx: &ForcedExit) -> Result<TxSignature, SigningError> {
        tx.check_correctness()?;
        let mut tx = tx.clone();

        let signature = ZkLinkSignature::sign_musig(&self.private_key, &tx.get_bytes());
        tx.signature = signature.clone();

        Ok(TxSignature {
            tx: tx.into(),
            layer1_signature: None,
            layer2_signature: Some(signature),
        })
    }

    /// Signs an order-matching transaction with the L2 scheme. The embedded
    /// taker and maker orders keep the signatures they were built with.
    pub fn sign_order_matching(&self, tx: &OrderMatching) -> Result<TxSignature, SigningError> {
        tx.check_correctness()?;
        let mut tx = tx.clone();

        let signature = ZkLinkSignature::sign_musig(&self.private_key, &tx.get_bytes());
        tx.signature = signature.clone();

        Ok(TxSignature {
            tx: tx.into(),
            layer1_signature: None,
            layer2_signature: Some(signature),
        })
    }

    /// Returns a signed copy of the order; the input order is not mutated.
    pub fn create_signed_order(&self, order: &Order) -> Result<Order, SigningError> {
        order.check_correctness()?;
        Ok(order.create_signed_order(&self.private_key))
    }

    fn zklink_signature_for(
        &self,
        bytes: &[u8],
        supplied: Option<ZkLinkSignature>,
    ) -> Result<ZkLinkSignature, SigningError> {
        match supplied {
            Some(signature) => {
                if signature.verify_musig(bytes).is_none() {
                    return Err(SigningError::MalformedSignatureOverride);
                }
                Ok(signature)
            }
            None => Ok(ZkLinkSignature::sign_musig(&self.private_key, bytes)),
        }
    }
}
