use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};

use crate::entity::{BotError, FavoriteRecord};
use crate::interactor::db;

/// Persistence of favorited coin ids for one chat.
///
/// The store does not deduplicate: callers check `exists` before `add`.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    async fn exists(&self, id: &str) -> Result<bool, BotError>;
    async fn add(&self, record: FavoriteRecord) -> Result<(), BotError>;
    /// No-op when the id is not stored.
    async fn remove(&self, id: &str) -> Result<(), BotError>;
    async fn list(&self) -> Result<Vec<FavoriteRecord>, BotError>;
}

/// PostgreSQL-backed store scoped to a Telegram chat
pub struct PgFavoriteStore {
    db_pool: Arc<PgPool>,
    chat_id: i64,
}

impl PgFavoriteStore {
    pub fn new(db_pool: Arc<PgPool>, chat_id: i64) -> Self {
        Self {
            db_pool,
            chat_id,
        }
    }
}

#[async_trait]
impl FavoriteStore for PgFavoriteStore {
    async fn exists(&self, id: &str) -> Result<bool, BotError> {
        Ok(db::favorite_exists(&self.db_pool, self.chat_id, id).await?)
    }

    async fn add(&self, record: FavoriteRecord) -> Result<(), BotError> {
        db::insert_favorite(&self.db_pool, self.chat_id, &record).await?;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), BotError> {
        db::delete_favorite(&self.db_pool, self.chat_id, id).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<FavoriteRecord>, BotError> {
        Ok(db::get_chat_favorites(&self.db_pool, self.chat_id).await?)
    }
}

/// Process-local store, lost on restart
#[derive(Default)]
pub struct InMemoryFavoriteStore {
    records: Mutex<Vec<FavoriteRecord>>,
}

impl InMemoryFavoriteStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<FavoriteRecord>>, BotError> {
        self.records
            .lock()
            .map_err(|_| BotError::Storage("favorite store lock poisoned".to_string()))
    }
}

#[async_trait]
impl FavoriteStore for InMemoryFavoriteStore {
    async fn exists(&self, id: &str) -> Result<bool, BotError> {
        Ok(self.lock()?.iter().any(|record| record.id == id))
    }

    async fn add(&self, record: FavoriteRecord) -> Result<(), BotError> {
        self.lock()?.push(record);
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), BotError> {
        self.lock()?.retain(|record| record.id != id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<FavoriteRecord>, BotError> {
        Ok(self.lock()?.clone())
    }
}
