use crate::errors::{AuthError, AuthResult};
use crate::services::Repository;

/// bcrypt ignores input past this many bytes, so longer passwords are refused
/// rather than silently truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// One-way bcrypt hash. Runs on the blocking pool; the cost makes it slow.
pub async fn hash_password(plaintext: &str, cost: u32) -> AuthResult<String> {
    if plaintext.len() > MAX_PASSWORD_BYTES {
        return Err(AuthError::PasswordTooLong(MAX_PASSWORD_BYTES));
    }
    let plaintext = plaintext.to_owned();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost)).await??;
    Ok(hash)
}

/// Checks `plaintext` against the stored hash for `username`.
///
/// An unknown user is `Ok(false)`; only a failed lookup is an error.
pub async fn verify_credential(
    repo: &dyn Repository,
    username: &str,
    plaintext: &str,
) -> AuthResult<bool> {
    // Could never have been hashed, and bcrypt would compare only a prefix.
    if plaintext.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }

    let Some(credential) = repo.find_credential(username).await? else {
        tracing::debug!("Login for unknown user {}", username);
        return Ok(false);
    };

    let plaintext = plaintext.to_owned();
    let stored = credential.password_hash;
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &stored)).await?;

    match verified {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::warn!("Stored password hash for {} is unusable: {}", username, e);
            Ok(false)
        }
    }
}
