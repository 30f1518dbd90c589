//! In-process snippet store.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{SnippetRepository, SnippetRepositoryError};
use crate::domain::{NewSnippet, Snippet, SnippetId, UserId};

#[derive(Debug)]
struct SnippetTable {
    last_id: i64,
    rows: BTreeMap<SnippetId, Snippet>,
}

/// [`SnippetRepository`] holding rows in memory behind a lock.
///
/// Ids come from a counter that only moves forward, so a deleted id is
/// never handed out again.
#[derive(Debug)]
pub struct MemorySnippetRepository {
    table: RwLock<SnippetTable>,
}

impl Default for MemorySnippetRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySnippetRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(SnippetTable {
                last_id: 0,
                rows: BTreeMap::new(),
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, SnippetTable>, SnippetRepositoryError> {
        self.table
            .read()
            .map_err(|_| SnippetRepositoryError::query("snippet table lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, SnippetTable>, SnippetRepositoryError> {
        self.table
            .write()
            .map_err(|_| SnippetRepositoryError::query("snippet table lock poisoned"))
    }
}

#[async_trait]
impl SnippetRepository for MemorySnippetRepository {
    async fn list(&self) -> Result<Vec<Snippet>, SnippetRepositoryError> {
        let mut snippets: Vec<Snippet> = self.read()?.rows.values().cloned().collect();
        snippets.sort_by_key(|snippet| (snippet.created(), snippet.id()));
        Ok(snippets)
    }

    async fn find_by_id(&self, id: SnippetId) -> Result<Option<Snippet>, SnippetRepositoryError> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    async fn list_ids_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<SnippetId>, SnippetRepositoryError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|snippet| snippet.owner() == owner)
            .map(Snippet::id)
            .collect())
    }

    async fn insert(&self, snippet: NewSnippet) -> Result<Snippet, SnippetRepositoryError> {
        let mut table = self.write()?;
        let next = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| SnippetRepositoryError::query("snippet id space exhausted"))?;
        let id = SnippetId::new(next).map_err(|err| SnippetRepositoryError::query(err.to_string()))?;
        let stored = snippet.into_snippet(id);
        table.last_id = next;
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, snippet: &Snippet) -> Result<bool, SnippetRepositoryError> {
        let mut table = self.write()?;
        match table.rows.get_mut(&snippet.id()) {
            Some(row) => {
                *row = snippet.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: SnippetId) -> Result<bool, SnippetRepositoryError> {
        Ok(self.write()?.rows.remove(&id).is_some())
    }
}
