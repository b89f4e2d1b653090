//! Session token generation

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;

/// Length of a session id in characters.
pub const SESSION_ID_LEN: usize = 32;

/// Generate an opaque session id: 32 random bytes, base64-encoded and cut to
/// [`SESSION_ID_LEN`] characters (192 bits of entropy survive the cut).
pub fn generate_session_id() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    let mut id = STANDARD.encode(bytes);
    id.truncate(SESSION_ID_LEN);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_have_fixed_length() {
        for _ in 0..32 {
            assert_eq!(generate_session_id().chars().count(), SESSION_ID_LEN);
        }
    }

    #[test]
    fn ids_are_unique() {
        let ids: std::collections::HashSet<String> = (0..256).map(|_| generate_session_id()).collect();
        assert_eq!(ids.len(), 256);
    }
}
