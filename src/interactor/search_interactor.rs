use async_trait::async_trait;
use std::sync::Arc;

use crate::coingecko::CoinService;
use crate::entity::{BotError, SearchResult};
use crate::interactor::favorite_store::FavoriteStore;

pub const MAX_SEARCH_RESULTS: usize = 10;

#[async_trait]
pub trait SearchInteractor: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, BotError>;
}

pub struct SearchInteractorImpl {
    coin_service: Arc<dyn CoinService + Send + Sync>,
    favorite_store: Arc<dyn FavoriteStore + Send + Sync>,
}

impl SearchInteractorImpl {
    pub fn new(
        coin_service: Arc<dyn CoinService + Send + Sync>,
        favorite_store: Arc<dyn FavoriteStore + Send + Sync>,
    ) -> Self {
        Self {
            coin_service,
            favorite_store,
        }
    }
}

#[async_trait]
impl SearchInteractor for SearchInteractorImpl {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, BotError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(BotError::BadRequest);
        }

        let coins = self.coin_service.search(query).await?;

        let mut results = Vec::with_capacity(coins.len().min(MAX_SEARCH_RESULTS));
        for coin in coins.into_iter().take(MAX_SEARCH_RESULTS) {
            let is_favorite = self.favorite_store.exists(&coin.id).await?;
            results.push(SearchResult { coin, is_favorite });
        }

        Ok(results)
    }
}
