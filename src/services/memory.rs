use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{Credential, Sheet};
use super::repository::{sheet_label, Repository};

#[derive(Default)]
struct Store {
    users: HashMap<String, Credential>,
    // owner -> sheet name -> sheet
    sheets: HashMap<String, HashMap<String, Sheet>>,
}

/// In-process store for development and tests. Both halves of a sheet write
/// happen under one write lock.
#[derive(Default)]
pub struct MemoryRepository {
    store: RwLock<Store>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn find_credential(&self, username: &str) -> RepositoryResult<Option<Credential>> {
        Ok(self.store.read().await.users.get(username).cloned())
    }

    async fn insert_credential(&self, credential: &Credential) -> RepositoryResult<()> {
        let mut store = self.store.write().await;
        if store.users.contains_key(&credential.username) {
            return Err(RepositoryError::Conflict(format!("User {}", credential.username)));
        }
        let mut stored = credential.clone();
        stored.sheets.clear();
        store.users.insert(credential.username.clone(), stored);
        Ok(())
    }

    async fn list_sheet_names(&self, username: &str) -> RepositoryResult<Vec<String>> {
        Ok(self
            .store
            .read()
            .await
            .users
            .get(username)
            .map(|user| user.sheets.clone())
            .unwrap_or_default())
    }

    async fn get_sheet(&self, owner: &str, name: &str) -> RepositoryResult<Option<Sheet>> {
        Ok(self
            .store
            .read()
            .await
            .sheets
            .get(owner)
            .and_then(|sheets| sheets.get(name))
            .cloned())
    }

    async fn insert_sheet(&self, sheet: &Sheet) -> RepositoryResult<()> {
        let mut guard = self.store.write().await;
        let store = &mut *guard;
        let user = store
            .users
            .get_mut(&sheet.owner)
            .ok_or_else(|| RepositoryError::NotFound(format!("User {}", sheet.owner)))?;
        let owned = store.sheets.entry(sheet.owner.clone()).or_default();
        if owned.contains_key(&sheet.name) {
            return Err(RepositoryError::Conflict(sheet_label(&sheet.owner, &sheet.name)));
        }

        user.sheets.push(sheet.name.clone());
        owned.insert(sheet.name.clone(), sheet.clone());
        Ok(())
    }

    async fn delete_sheet(&self, owner: &str, name: &str) -> RepositoryResult<()> {
        let mut guard = self.store.write().await;
        let store = &mut *guard;
        let removed = store
            .sheets
            .get_mut(owner)
            .and_then(|sheets| sheets.remove(name));
        if removed.is_none() {
            return Err(RepositoryError::NotFound(sheet_label(owner, name)));
        }
        if let Some(user) = store.users.get_mut(owner) {
            user.sheets.retain(|s| s != name);
        }
        Ok(())
    }
}
