//! In-process email store
//!
//! Same contract as [`EmailRepo`](super::EmailRepo) without a database.
//! The uniqueness check and the write happen under one lock, which makes
//! it the in-memory analogue of the unique index.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DbError, EmailStore};
use crate::models::{Email, EmailInput};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i32, Email>,
    last_id: i32,
}

impl Table {
    fn name_taken(&self, name: &str, except: Option<i32>) -> bool {
        self.rows
            .values()
            .any(|row| row.name == name && Some(row.id) != except)
    }
}

/// Email store held in memory
pub struct MemoryEmailRepo {
    table: RwLock<Table>,
    reachable: AtomicBool,
}

impl MemoryEmailRepo {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::default()),
            reachable: AtomicBool::new(true),
        }
    }

    /// Simulate storage going down (`false`) or coming back (`true`).
    /// While unreachable every operation fails with [`DbError::Unavailable`].
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    fn ensure_reachable(&self) -> Result<(), DbError> {
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DbError::Unavailable)
        }
    }
}

impl Default for MemoryEmailRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailStore for MemoryEmailRepo {
    async fn list(&self) -> Result<Vec<Email>, DbError> {
        self.ensure_reachable()?;
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Email>, DbError> {
        self.ensure_reachable()?;
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, DbError> {
        self.ensure_reachable()?;
        Ok(self.table.read().await.name_taken(name, None))
    }

    async fn insert(&self, input: EmailInput) -> Result<Email, DbError> {
        self.ensure_reachable()?;
        let mut table = self.table.write().await;
        if table.name_taken(&input.name, None) {
            return Err(DbError::Conflict { name: input.name });
        }

        table.last_id += 1;
        let email = Email {
            id: table.last_id,
            name: input.name,
        };
        table.rows.insert(email.id, email.clone());
        Ok(email)
    }

    async fn update(&self, id: i32, name: &str) -> Result<Email, DbError> {
        self.ensure_reachable()?;
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&id) {
            return Err(DbError::NotFound { id });
        }
        if table.name_taken(name, Some(id)) {
            return Err(DbError::Conflict {
                name: name.to_owned(),
            });
        }

        let row = table.rows.get_mut(&id).ok_or(DbError::NotFound { id })?;
        row.name = name.to_owned();
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), DbError> {
        self.ensure_reachable()?;
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(DbError::NotFound { id })
    }

    async fn can_connect(&self) -> bool {
        self.reachable.load(Ordering::SeqCst)
    }

    async fn apply_migrations(&self) -> Result<(), DbError> {
        self.ensure_reachable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_sequential_and_never_reused() {
        let repo = MemoryEmailRepo::new();
        let a = repo.insert(EmailInput::new("a@x.com")).await.unwrap();
        let b = repo.insert(EmailInput::new("b@x.com")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        repo.delete(b.id).await.unwrap();
        let c = repo.insert(EmailInput::new("c@x.com")).await.unwrap();
        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn duplicate_insert_is_conflict() {
        let repo = MemoryEmailRepo::new();
        repo.insert(EmailInput::new("a@x.com")).await.unwrap();
        let err = repo.insert(EmailInput::new("a@x.com")).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { ref name } if name == "a@x.com"));
    }

    #[tokio::test]
    async fn update_to_own_name_is_allowed() {
        let repo = MemoryEmailRepo::new();
        let a = repo.insert(EmailInput::new("a@x.com")).await.unwrap();
        assert_eq!(repo.update(a.id, "a@x.com").await.unwrap(), a);
    }

    #[tokio::test]
    async fn update_to_taken_name_is_conflict() {
        let repo = MemoryEmailRepo::new();
        repo.insert(EmailInput::new("a@x.com")).await.unwrap();
        let b = repo.insert(EmailInput::new("b@x.com")).await.unwrap();
        assert!(matches!(
            repo.update(b.id, "a@x.com").await,
            Err(DbError::Conflict { .. })
        ));
    }

    #[tokio::test]
    async fn concurrent_duplicate_inserts_admit_one() {
        let repo = std::sync::Arc::new(MemoryEmailRepo::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.insert(EmailInput::new("race@x.com")).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.expect("task panicked").is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unreachable_store_fails_every_call() {
        let repo = MemoryEmailRepo::new();
        repo.set_reachable(false);

        assert!(!repo.can_connect().await);
        assert!(matches!(repo.list().await, Err(DbError::Unavailable)));
        assert!(matches!(repo.apply_migrations().await, Err(DbError::Unavailable)));

        repo.set_reachable(true);
        assert!(repo.can_connect().await);
    }
}
