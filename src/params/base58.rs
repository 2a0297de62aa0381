//! Base58 address prefixes
//!
//! Each network prepends a role-specific prefix before base58-check
//! encoding, which fixes the leading characters of addresses and keys.

use serde::Serialize;
use thiserror::Error;

/// Address decoding errors
#[derive(Debug, Error)]
pub enum AddressError {
    #[error("Invalid base58 data: {0}")]
    Encoding(#[from] bs58::decode::Error),
    #[error("Prefix does not match {0:?}")]
    PrefixMismatch(Base58Type),
}

/// Role a prefix is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
    /// BIP44 coin type
    ExtCoinType,
}

impl Base58Type {
    pub const ALL: [Base58Type; 6] = [
        Base58Type::PubkeyAddress,
        Base58Type::ScriptAddress,
        Base58Type::SecretKey,
        Base58Type::ExtPublicKey,
        Base58Type::ExtSecretKey,
        Base58Type::ExtCoinType,
    ];
}

/// Per-network prefix bytes, one entry per [`Base58Type`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Base58Prefixes {
    pub pubkey_address: Vec<u8>,
    pub script_address: Vec<u8>,
    pub secret_key: Vec<u8>,
    pub ext_public_key: Vec<u8>,
    pub ext_secret_key: Vec<u8>,
    pub ext_coin_type: Vec<u8>,
}

impl Base58Prefixes {
    pub fn get(&self, role: Base58Type) -> &[u8] {
        match role {
            Base58Type::PubkeyAddress => &self.pubkey_address,
            Base58Type::ScriptAddress => &self.script_address,
            Base58Type::SecretKey => &self.secret_key,
            Base58Type::ExtPublicKey => &self.ext_public_key,
            Base58Type::ExtSecretKey => &self.ext_secret_key,
            Base58Type::ExtCoinType => &self.ext_coin_type,
        }
    }

    /// Prefix `payload` for `role` and base58-check encode it
    pub fn encode_check(&self, role: Base58Type, payload: &[u8]) -> String {
        let mut data = self.get(role).to_vec();
        data.extend_from_slice(payload);
        bs58::encode(data).with_check().into_string()
    }

    /// Decode a base58-check string and strip the `role` prefix
    pub fn decode_check(&self, role: Base58Type, text: &str) -> Result<Vec<u8>, AddressError> {
        let data = bs58::decode(text).with_check(None).into_vec()?;
        data.strip_prefix(self.get(role))
            .map(<[u8]>::to_vec)
            .ok_or(AddressError::PrefixMismatch(role))
    }
}
