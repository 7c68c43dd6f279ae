//! Credentials and cookie sessions.
//!
//! The session cookie is the only record of a login. A request is either
//! [`Identity::Anonymous`] or [`Identity::Authenticated`]; it becomes
//! authenticated only through [`AuthManager::issue_session`] after a
//! successful [`verify_credential`], and falls back to anonymous on logout,
//! expiry, tampering, or revocation.

mod password;
mod registry;
mod session;

pub use password::{hash_password, verify_credential, MAX_PASSWORD_BYTES};
pub use registry::RevokedSessions;
pub use session::{Claims, SessionCodec, SessionKey};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;

use crate::config::{AuthConfig, SessionConfig};
use crate::errors::AuthResult;

/// Who is making the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    Authenticated(String),
}

impl Identity {
    pub fn username(&self) -> Option<&str> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated(name) => Some(name),
        }
    }
}

/// Built once at startup and shared read-only by all requests.
pub struct AuthManager {
    codec: SessionCodec,
    revoked: RevokedSessions,
    cookie_name: String,
    max_age_secs: i64,
    secure: bool,
    bcrypt_cost: u32,
}

impl AuthManager {
    pub fn new(key: &SessionKey, session: &SessionConfig, auth: &AuthConfig) -> Self {
        Self {
            codec: SessionCodec::new(key),
            revoked: RevokedSessions::new(),
            cookie_name: session.cookie_name.clone(),
            max_age_secs: session.max_age_secs,
            secure: session.secure,
            bcrypt_cost: auth.bcrypt_cost,
        }
    }

    /// Uses the configured secret, or a random key when none is set.
    pub fn from_config(session: &SessionConfig, auth: &AuthConfig) -> Result<Self, config::ConfigError> {
        let key = match session.secret.as_deref() {
            Some(secret) => SessionKey::from_secret(secret)?,
            None => {
                tracing::warn!("No session.secret configured; sessions will not survive a restart");
                SessionKey::generate()
            }
        };
        Ok(Self::new(&key, session, auth))
    }

    pub async fn hash_password(&self, plaintext: &str) -> AuthResult<String> {
        hash_password(plaintext, self.bcrypt_cost).await
    }

    /// A fresh session cookie for `username`.
    pub fn issue_session(&self, username: &str) -> AuthResult<Cookie<'static>> {
        let claims = Claims {
            name: username.to_owned(),
            exp: Utc::now().timestamp() + self.max_age_secs,
            jti: uuid::Uuid::new_v4().to_string(),
        };
        let token = self.codec.encode(&claims)?;

        Ok(Cookie::build((self.cookie_name.clone(), token))
            .path("/")
            .max_age(time::Duration::seconds(self.max_age_secs))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build())
    }

    fn claims(&self, jar: &CookieJar) -> Option<Claims> {
        let cookie = jar.get(&self.cookie_name)?;
        match self.codec.decode(cookie.value(), Utc::now().timestamp()) {
            Ok(claims) if self.revoked.is_revoked(&claims.jti) => {
                tracing::debug!("Session {} was revoked", claims.jti);
                None
            }
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!("Ignoring session cookie: {}", e);
                None
            }
        }
    }

    /// The username behind the session cookie, if it is present and valid.
    pub fn resolve_session(&self, jar: &CookieJar) -> Option<String> {
        self.claims(jar).map(|claims| claims.name)
    }

    pub fn identity(&self, jar: &CookieJar) -> Identity {
        match self.resolve_session(jar) {
            Some(name) => Identity::Authenticated(name),
            None => Identity::Anonymous,
        }
    }

    /// Expires the cookie on the client and revokes the token server-side.
    pub fn clear_session(&self, jar: CookieJar) -> CookieJar {
        if let Some(claims) = self.claims(&jar) {
            self.revoked.revoke(&claims.jti, claims.exp, Utc::now().timestamp());
        }
        jar.remove(Cookie::build(self.cookie_name.clone()).path("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> AuthManager {
        let session = SessionConfig {
            cookie_name: "session".into(),
            max_age_secs: 3600,
            secure: false,
            secret: Some("0123456789abcdef".into()),
        };
        AuthManager::from_config(&session, &AuthConfig { bcrypt_cost: 4 }).unwrap()
    }

    fn jar_with(cookie: Cookie<'static>) -> CookieJar {
        CookieJar::new().add(cookie)
    }

    #[test]
    fn issued_session_resolves_to_its_user() {
        let auth = manager();
        let cookie = auth.issue_session("alice").unwrap();
        assert_eq!(cookie.name(), "session");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));
        assert_eq!(auth.resolve_session(&jar_with(cookie)), Some("alice".into()));
    }

    #[test]
    fn missing_or_tampered_cookie_is_anonymous() {
        let auth = manager();
        assert_eq!(auth.identity(&CookieJar::new()), Identity::Anonymous);

        let cookie = auth.issue_session("alice").unwrap();
        let mut value = cookie.value().to_string();
        let mid = value.len() / 2;
        let flipped = if &value[mid..mid + 1] == "A" { "B" } else { "A" };
        value.replace_range(mid..mid + 1, flipped);
        let tampered = Cookie::build(("session", value)).path("/").build();
        assert_eq!(auth.resolve_session(&jar_with(tampered)), None);
    }

    #[test]
    fn session_from_another_key_is_anonymous() {
        let other = AuthManager::from_config(
            &SessionConfig {
                cookie_name: "session".into(),
                max_age_secs: 3600,
                secure: false,
                secret: None,
            },
            &AuthConfig { bcrypt_cost: 4 },
        )
        .unwrap();
        let cookie = other.issue_session("mallory").unwrap();
        assert_eq!(manager().resolve_session(&jar_with(cookie)), None);
    }

    #[test]
    fn cleared_session_is_revoked() {
        let auth = manager();
        let cookie = auth.issue_session("alice").unwrap();
        let jar = jar_with(cookie.clone());

        let cleared = auth.clear_session(jar);
        let removal = cleared.get("session");
        assert!(removal.map_or(true, |c| c.value().is_empty()));

        // Replaying the old cookie no longer works.
        assert_eq!(auth.resolve_session(&jar_with(cookie)), None);
    }

    #[test]
    fn identity_username() {
        assert_eq!(Identity::Authenticated("bob".into()).username(), Some("bob"));
        assert_eq!(Identity::Anonymous.username(), None);
    }
}
