use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use sqlx::PgPool;

use crate::coingecko::{CoinService, Config as CoingeckoConfig};
use crate::interactor::favorite_store::{FavoriteStore, InMemoryFavoriteStore, PgFavoriteStore};
use crate::services::DetailSessions;

/// Where favorites are persisted
pub enum FavoriteBackend {
    Postgres(Arc<PgPool>),
    /// Used when no database is configured; one store per chat
    Memory(Mutex<HashMap<i64, Arc<InMemoryFavoriteStore>>>),
}

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    coin_service: Arc<dyn CoinService + Send + Sync>,
    favorites: FavoriteBackend,
    detail_sessions: Arc<DetailSessions>,
    coingecko_config: CoingeckoConfig,
}

impl ServiceContainer {
    /// Create a new service container; without a pool favorites live in memory
    pub fn new(
        db_pool: Option<Arc<PgPool>>,
        coin_service: Arc<dyn CoinService + Send + Sync>,
        coingecko_config: CoingeckoConfig,
    ) -> Self {
        let favorites = match db_pool {
            Some(pool) => FavoriteBackend::Postgres(pool),
            None => FavoriteBackend::Memory(Mutex::new(HashMap::new())),
        };

        Self {
            coin_service,
            favorites,
            detail_sessions: Arc::new(DetailSessions::new()),
            coingecko_config,
        }
    }

    // Accessor methods

    pub fn coin_service(&self) -> Arc<dyn CoinService + Send + Sync> {
        self.coin_service.clone()
    }

    pub fn favorite_store(&self, chat_id: i64) -> Arc<dyn FavoriteStore + Send + Sync> {
        match &self.favorites {
            FavoriteBackend::Postgres(pool) => Arc::new(PgFavoriteStore::new(pool.clone(), chat_id)),
            FavoriteBackend::Memory(stores) => {
                let mut stores = stores
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                stores
                    .entry(chat_id)
                    .or_insert_with(|| Arc::new(InMemoryFavoriteStore::new()))
                    .clone()
            }
        }
    }

    pub fn detail_sessions(&self) -> Arc<DetailSessions> {
        self.detail_sessions.clone()
    }

    pub fn vs_currency(&self) -> String {
        self.coingecko_config.vs_currency.clone()
    }
}
