use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose, Engine as _};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::{AuthError, AuthResult};

const MAX_KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// Process-lifetime key material for session tokens.
#[derive(Clone)]
pub struct SessionKey(Vec<u8>);

impl SessionKey {
    /// Accepts 16, 24 or 32 bytes; longer secrets are cut to 32 bytes.
    pub fn from_secret(secret: &str) -> Result<Self, config::ConfigError> {
        let bytes = secret.as_bytes();
        match bytes.len() {
            16 | 24 | 32 => Ok(Self(bytes.to_vec())),
            n if n > MAX_KEY_LEN => Ok(Self(bytes[..MAX_KEY_LEN].to_vec())),
            n => Err(config::ConfigError::Message(format!(
                "session.secret must be 16, 24 or 32 bytes (got {})",
                n
            ))),
        }
    }

    pub fn generate() -> Self {
        let mut bytes = vec![0u8; MAX_KEY_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionKey({} bytes)", self.0.len())
    }
}

/// What a session token carries.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub name: String,
    pub exp: i64,  // unix seconds
    pub jti: String,
}

/// Seals claims into an opaque cookie value and opens them again.
///
/// Tokens are AES-256-GCM ciphertexts (`nonce || ciphertext`, base64url), so
/// they are both unreadable and tamper-evident without the key.
pub struct SessionCodec {
    cipher: Aes256Gcm,
}

impl SessionCodec {
    pub fn new(key: &SessionKey) -> Self {
        // Stretch 16/24/32 bytes of key material to an AES-256 key.
        let digest = Sha256::digest(&key.0);
        Self {
            cipher: Aes256Gcm::new(&digest),
        }
    }

    pub fn encode(&self, claims: &Claims) -> AuthResult<String> {
        let plain = serde_json::to_vec(claims)
            .map_err(|e| AuthError::Token(format!("claims: {}", e)))?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plain.as_slice())
            .map_err(|e| AuthError::Token(format!("encryption failed: {}", e)))?;

        let mut combined = nonce_bytes.to_vec();
        combined.extend(ciphertext);
        Ok(general_purpose::URL_SAFE_NO_PAD.encode(combined))
    }

    /// Fails on a malformed or tampered token, or one past its expiry.
    pub fn decode(&self, token: &str, now: i64) -> AuthResult<Claims> {
        let combined = general_purpose::URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|e| AuthError::Token(format!("not base64: {}", e)))?;
        if combined.len() < NONCE_LEN {
            return Err(AuthError::Token("token too short".into()));
        }

        let (nonce_bytes, ciphertext) = combined.split_at(NONCE_LEN);
        let plain = self
            .cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| AuthError::Token("authentication tag mismatch".into()))?;
        let claims: Claims = serde_json::from_slice(&plain)
            .map_err(|e| AuthError::Token(format!("claims: {}", e)))?;

        if claims.exp <= now {
            return Err(AuthError::Token("expired".into()));
        }
        Ok(claims)
    }
}
