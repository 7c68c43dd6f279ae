use async_trait::async_trait;

use crate::errors::RepositoryResult;
use crate::models::{Credential, Sheet};

/// Persistence for credentials and sheets.
///
/// Sheet writes touch two things, the sheet record and the owner's sheet
/// index. `insert_sheet` and `delete_sheet` apply both or neither; an `Err`
/// means the store is unchanged.
#[async_trait]
pub trait Repository: Send + Sync {
    /// The credential with its sheet index filled in.
    async fn find_credential(&self, username: &str) -> RepositoryResult<Option<Credential>>;

    /// Fails with `Conflict` when the username is taken.
    async fn insert_credential(&self, credential: &Credential) -> RepositoryResult<()>;

    async fn list_sheet_names(&self, username: &str) -> RepositoryResult<Vec<String>>;

    async fn get_sheet(&self, owner: &str, name: &str) -> RepositoryResult<Option<Sheet>>;

    /// Fails with `Conflict` when `(sheet.owner, sheet.name)` already exists.
    async fn insert_sheet(&self, sheet: &Sheet) -> RepositoryResult<()>;

    /// Fails with `NotFound` when there is no such sheet.
    async fn delete_sheet(&self, owner: &str, name: &str) -> RepositoryResult<()>;
}

pub(crate) fn sheet_label(owner: &str, name: &str) -> String {
    format!("Sheet '{}' of {}", name, owner)
}
