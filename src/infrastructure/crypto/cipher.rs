//! Per-record payload cipher
//!
//! A repeating-key XOR mask combined with a fresh 16-byte random nonce:
//!
//! ```text
//! out[i] = data[i] ^ key[i % key.len()] ^ nonce[i % 16]
//! ```
//!
//! Ciphertext and nonce travel as standard padded base64. This is the format
//! existing world state was written in. It is NOT authenticated: there is no
//! tamper detection and a known plaintext reveals the key stream.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::shared::{DomainError, DomainResult};

/// Nonce size in bytes.
pub const NONCE_SIZE: usize = 16;

/// Key the ledger was originally written with. Deployments that still hold
/// records sealed under it keep it as their configured key.
pub const LEGACY_ENCRYPTION_KEY: &str = "bioMTAKE_2024_encryption_key_32bytes!";

/// Shared symmetric key. Never empty.
#[derive(Clone, PartialEq, Eq)]
pub struct CipherKey(Vec<u8>);

impl CipherKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> DomainResult<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(DomainError::InvalidArgument(
                "encryption key must not be empty".into(),
            ));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Short SHA-256 fingerprint, safe to log.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(&self.0);
        hex::encode(&digest[..8])
    }
}

impl std::fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CipherKey({})", self.fingerprint())
    }
}

/// Base64 ciphertext and nonce, as stored on a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    pub ciphertext: String,
    pub nonce: String,
}

/// Encrypt under a fresh random nonce.
pub fn encrypt(plaintext: &[u8], key: &CipherKey) -> Sealed {
    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);
    encrypt_with_nonce(plaintext, key, &nonce)
}

/// Deterministic form of [`encrypt`] for a caller-chosen nonce.
pub fn encrypt_with_nonce(plaintext: &[u8], key: &CipherKey, nonce: &[u8; NONCE_SIZE]) -> Sealed {
    Sealed {
        ciphertext: STANDARD.encode(apply_mask(plaintext, key.as_bytes(), nonce)),
        nonce: STANDARD.encode(nonce),
    }
}

/// Reverse [`encrypt`]. Fails with `Decode` on malformed base64 or on an empty
/// nonce paired with non-empty data.
pub fn decrypt(ciphertext_b64: &str, nonce_b64: &str, key: &CipherKey) -> DomainResult<Vec<u8>> {
    let data = STANDARD
        .decode(ciphertext_b64)
        .map_err(|e| DomainError::Decode(format!("ciphertext: {e}")))?;
    let nonce = STANDARD
        .decode(nonce_b64)
        .map_err(|e| DomainError::Decode(format!("nonce: {e}")))?;

    if nonce.is_empty() && !data.is_empty() {
        return Err(DomainError::Decode("nonce is empty".into()));
    }

    Ok(apply_mask(&data, key.as_bytes(), &nonce))
}

/// XOR is its own inverse, so this both seals and opens.
fn apply_mask(data: &[u8], key: &[u8], nonce: &[u8]) -> Vec<u8> {
    data.iter()
        .enumerate()
        .map(|(i, byte)| byte ^ key[i % key.len()] ^ nonce[i % nonce.len()])
        .collect()
}

/// Cipher bound to one key, as handed to the record services.
#[derive(Debug, Clone)]
pub struct MaskCipher {
    key: CipherKey,
}

impl MaskCipher {
    pub fn new(key: CipherKey) -> Self {
        Self { key }
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Sealed {
        encrypt(plaintext, &self.key)
    }

    pub fn decrypt(&self, ciphertext_b64: &str, nonce_b64: &str) -> DomainResult<Vec<u8>> {
        decrypt(ciphertext_b64, nonce_b64, &self.key)
    }

    pub fn key_fingerprint(&self) -> String {
        self.key.fingerprint()
    }
}
