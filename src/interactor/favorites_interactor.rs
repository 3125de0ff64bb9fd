use async_trait::async_trait;
use log::warn;
use std::collections::HashMap;
use std::sync::Arc;

use crate::coingecko::CoinService;
use crate::entity::{BotError, FavoriteCoin};
use crate::interactor::favorite_store::FavoriteStore;

#[async_trait]
pub trait FavoritesInteractor: Send + Sync {
    async fn get_favorites(&self) -> Result<Vec<FavoriteCoin>, BotError>;
}

pub struct FavoritesInteractorImpl {
    coin_service: Arc<dyn CoinService + Send + Sync>,
    favorite_store: Arc<dyn FavoriteStore + Send + Sync>,
}

impl FavoritesInteractorImpl {
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
impl FavoritesInteractor for FavoritesInteractorImpl {
    async fn get_favorites(&self) -> Result<Vec<FavoriteCoin>, BotError> {
        let records = self.favorite_store.list().await?;
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = records.iter().map(|record| record.id.clone()).collect();

        // Prices are best effort; the list itself comes from the store
        let prices: HashMap<String, (Option<f64>, Option<f64>)> =
            match self.coin_service.get_coins(&ids).await {
                Ok(coins) => coins
                    .into_iter()
                    .map(|coin| {
                        (
                            coin.id,
                            (coin.current_price, coin.price_change_percentage_24h),
                        )
                    })
                    .collect(),
                Err(e) => {
                    warn!("Failed to refresh favorite prices: {}", e);
                    HashMap::new()
                }
            };

        Ok(records
            .into_iter()
            .map(|record| {
                let (current_price, change) = prices.get(&record.id).copied().unwrap_or_default();
                FavoriteCoin {
                    record,
                    current_price,
                    price_change_percentage_24h: change,
                }
            })
            .collect())
    }
}
