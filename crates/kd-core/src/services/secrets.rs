use rand::Rng;

use crate::models::Secret;

const SESSION_SECRET_BYTES: usize = 32;

/// Mint a fresh session secret: 32 bytes from the thread-local CSPRNG,
/// lowercase hex encoded.
pub fn generate_session_secret() -> Secret {
    let mut bytes = [0u8; SESSION_SECRET_BYTES];
    rand::rng().fill(&mut bytes[..]);
    Secret::new(hex::encode(bytes))
}

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }
}
