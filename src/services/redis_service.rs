use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::Connection, AsyncCommands, Client};

use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{Credential, Sheet};
use super::repository::{sheet_label, Repository};

/// Redis-backed store. Layout:
///
/// - `user:{username}`: credential JSON
/// - `sheet_index:{username}`: list of sheet names, in creation order
/// - `sheets:{username}`: hash of sheet name to sheet JSON
#[derive(Clone)]
pub struct RedisRepository {
    client: Arc<Client>,
    timeout: Duration,
}

fn user_key(username: &str) -> String {
    format!("user:{}", username)
}

fn index_key(username: &str) -> String {
    format!("sheet_index:{}", username)
}

fn sheets_key(username: &str) -> String {
    format!("sheets:{}", username)
}

impl RedisRepository {
    pub fn new(client: Arc<Client>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Round trip used at startup to fail fast on a bad connection string.
    pub async fn ping(&self) -> RepositoryResult<()> {
        self.bounded(self.ping_inner()).await
    }

    async fn ping_inner(&self) -> RepositoryResult<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        Ok(())
    }

    async fn connection(&self) -> RepositoryResult<Connection> {
        Ok(self.client.get_async_connection().await?)
    }

    // Every call is one bounded round trip; nothing is retried.
    async fn bounded<T, F>(&self, fut: F) -> RepositoryResult<T>
    where
        F: Future<Output = RepositoryResult<T>> + Send,
    {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| RepositoryError::Timeout(self.timeout.as_secs()))?
    }

    async fn load_credential(&self, username: &str) -> RepositoryResult<Option<Credential>> {
        let mut conn = self.connection().await?;
        let data: Option<String> = conn.get(user_key(username)).await?;
        let Some(data) = data else {
            return Ok(None);
        };
        let mut credential: Credential = serde_json::from_str(&data)?;
        credential.sheets = conn.lrange(index_key(username), 0, -1).await?;
        Ok(Some(credential))
    }

    async fn store_credential(&self, credential: &Credential) -> RepositoryResult<()> {
        let mut conn = self.connection().await?;
        let json = serde_json::to_string(credential)?;
        let created: bool = conn.set_nx(user_key(&credential.username), json).await?;
        if !created {
            return Err(RepositoryError::Conflict(format!("User {}", credential.username)));
        }
        Ok(())
    }

    async fn load_sheet_names(&self, username: &str) -> RepositoryResult<Vec<String>> {
        let mut conn = self.connection().await?;
        Ok(conn.lrange(index_key(username), 0, -1).await?)
    }

    async fn load_sheet(&self, owner: &str, name: &str) -> RepositoryResult<Option<Sheet>> {
        let mut conn = self.connection().await?;
        let data: Option<String> = conn.hget(sheets_key(owner), name).await?;
        match data {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    async fn store_sheet(&self, sheet: &Sheet) -> RepositoryResult<()> {
        let json = serde_json::to_string(sheet)?;
        let sheets = sheets_key(&sheet.owner);
        let mut conn = self.connection().await?;

        // The existence checks and the write must see the same state, so
        // watch the sheet hash and let EXEC abort if it changes.
        redis::cmd("WATCH")
            .arg(&sheets)
            .query_async::<_, ()>(&mut conn)
            .await?;

        let owner_exists: bool = conn.exists(user_key(&sheet.owner)).await?;
        let taken: bool = conn.hexists(&sheets, &sheet.name).await?;
        if !owner_exists || taken {
            redis::cmd("UNWATCH").query_async::<_, ()>(&mut conn).await?;
            return Err(if taken {
                RepositoryError::Conflict(sheet_label(&sheet.owner, &sheet.name))
            } else {
                RepositoryError::NotFound(format!("User {}", sheet.owner))
            });
        }

        let applied: Option<()> = redis::pipe()
            .atomic()
            .hset(&sheets, &sheet.name, json)
            .ignore()
            .rpush(index_key(&sheet.owner), &sheet.name)
            .ignore()
            .query_async(&mut conn)
            .await?;

        // A concurrent write to the same hash aborted the transaction.
        applied.ok_or_else(|| RepositoryError::Conflict(sheet_label(&sheet.owner, &sheet.name)))
    }

    async fn remove_sheet(&self, owner: &str, name: &str) -> RepositoryResult<()> {
        let mut conn = self.connection().await?;
        let (removed, _unindexed): (i64, i64) = redis::pipe()
            .atomic()
            .hdel(sheets_key(owner), name)
            .lrem(index_key(owner), 0, name)
            .query_async(&mut conn)
            .await?;

        if removed == 0 {
            return Err(RepositoryError::NotFound(sheet_label(owner, name)));
        }
        tracing::debug!("Removed {} from store and index", sheet_label(owner, name));
        Ok(())
    }
}

#[async_trait]
impl Repository for RedisRepository {
    async fn find_credential(&self, username: &str) -> RepositoryResult<Option<Credential>> {
        self.bounded(self.load_credential(username)).await
    }

    async fn insert_credential(&self, credential: &Credential) -> RepositoryResult<()> {
        self.bounded(self.store_credential(credential)).await
    }

    async fn list_sheet_names(&self, username: &str) -> RepositoryResult<Vec<String>> {
        self.bounded(self.load_sheet_names(username)).await
    }

    async fn get_sheet(&self, owner: &str, name: &str) -> RepositoryResult<Option<Sheet>> {
        self.bounded(self.load_sheet(owner, name)).await
    }

    async fn insert_sheet(&self, sheet: &Sheet) -> RepositoryResult<()> {
        self.bounded(self.store_sheet(sheet)).await
    }

    async fn delete_sheet(&self, owner: &str, name: &str) -> RepositoryResult<()> {
        self.bounded(self.remove_sheet(owner, name)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_do_not_collide_across_kinds() {
        assert_eq!(user_key("a"), "user:a");
        assert_ne!(user_key("a:sheets"), index_key("a"));
        assert_ne!(sheets_key("a"), index_key("a"));
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error_not_a_panic() {
        let client = Arc::new(Client::open("redis://127.0.0.1:1/").unwrap());
        let repo = RedisRepository::new(client, Duration::from_secs(2));
        let err = repo.find_credential("alice").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Redis(_) | RepositoryError::Timeout(_)));
    }
}
