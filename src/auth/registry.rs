use std::collections::HashMap;
use std::sync::RwLock;

/// Token ids that were logged out before their natural expiry.
///
/// Entries are kept until the token would have expired anyway.
#[derive(Default)]
pub struct RevokedSessions {
    // jti -> expiry (unix seconds)
    revoked: RwLock<HashMap<String, i64>>,
}

impl RevokedSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revoke(&self, jti: &str, expires_at: i64, now: i64) {
        let mut revoked = match self.revoked.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        revoked.retain(|_, exp| *exp > now);
        if expires_at > now {
            revoked.insert(jti.to_owned(), expires_at);
        }
    }

    pub fn is_revoked(&self, jti: &str) -> bool {
        match self.revoked.read() {
            Ok(guard) => guard.contains_key(jti),
            Err(poisoned) => poisoned.into_inner().contains_key(jti),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        match self.revoked.read() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revoked_ids_are_remembered_until_expiry() {
        let registry = RevokedSessions::new();
        registry.revoke("a", 200, 100);
        assert!(registry.is_revoked("a"));
        assert!(!registry.is_revoked("b"));

        // A later revocation purges entries that have expired since.
        registry.revoke("b", 400, 250);
        assert!(!registry.is_revoked("a"));
        assert!(registry.is_revoked("b"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn already_expired_tokens_are_not_stored() {
        let registry = RevokedSessions::new();
        registry.revoke("old", 50, 100);
        assert!(registry.is_empty());
    }
}
