use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password_hash: String,  // bcrypt hash, never the plaintext
    // Names of the sheets this user owns. Kept by the repository, which stores
    // it next to the credential rather than inside it.
    #[serde(skip)]
    pub sheets: Vec<String>,
}

impl Credential {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            sheets: Vec::new(),
        }
    }
}
