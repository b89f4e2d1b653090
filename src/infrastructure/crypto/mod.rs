//! Payload encryption and token generation

pub mod cipher;
pub mod token;

pub use cipher::{decrypt, encrypt, CipherKey, MaskCipher, Sealed, LEGACY_ENCRYPTION_KEY, NONCE_SIZE};
pub use token::{generate_session_id, SESSION_ID_LEN};
