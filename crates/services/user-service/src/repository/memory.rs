//! In-memory repository used by tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use common::{AppError, AppResult};
use domain::{User, UserId};

use super::UserRepository;

/// Process-local stand-in for the `users` table.
///
/// IDs come from a counter that never goes backwards, so deleted IDs are
/// not reused.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: Mutex<Table>,
}

#[derive(Debug, Default)]
struct Table {
    last_id: UserId,
    rows: BTreeMap<UserId, User>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, Table>> {
        self.inner
            .lock()
            .map_err(|_| AppError::internal("user table lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn exists(&self, id: UserId) -> AppResult<bool> {
        Ok(self.lock()?.rows.contains_key(&id))
    }

    async fn create(&self, name: String, email: String) -> AppResult<User> {
        let mut table = self.lock()?;
        table.last_id += 1;
        let user = User::new(table.last_id, name, email);
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: UserId, name: String, email: String) -> AppResult<u64> {
        let mut table = self.lock()?;
        match table.rows.get_mut(&id) {
            Some(row) => {
                row.name = name;
                row.email = email;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: UserId) -> AppResult<u64> {
        Ok(self.lock()?.rows.remove(&id).map_or(0, |_| 1))
    }
}
