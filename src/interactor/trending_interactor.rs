use async_trait::async_trait;
use std::sync::Arc;

use crate::coingecko::CoinService;
use crate::entity::{BotError, Trending};

pub const MAX_TRENDING_COINS: usize = 15;
pub const MAX_TRENDING_NFTS: usize = 7;

#[async_trait]
pub trait TrendingInteractor: Send + Sync {
    async fn get_trending(&self) -> Result<Trending, BotError>;
}

pub struct TrendingInteractorImpl {
    coin_service: Arc<dyn CoinService + Send + Sync>,
}

impl TrendingInteractorImpl {
    pub fn new(coin_service: Arc<dyn CoinService + Send + Sync>) -> Self {
        Self { coin_service }
    }
}

#[async_trait]
impl TrendingInteractor for TrendingInteractorImpl {
    async fn get_trending(&self) -> Result<Trending, BotError> {
        let mut trending = self.coin_service.get_trending().await?;

        trending.coins.truncate(MAX_TRENDING_COINS);
        trending.nfts.truncate(MAX_TRENDING_NFTS);

        Ok(trending)
    }
}
