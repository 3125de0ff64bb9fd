//! Test doubles shared by interactor and presenter tests.
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::coingecko::CoinService;
use crate::entity::{BotError, CoinSummary, FavoriteRecord, SearchCoin, Trending, TrendingCoin};
use crate::interactor::favorite_store::FavoriteStore;

pub fn sample_coin(id: &str) -> CoinSummary {
    CoinSummary {
        id: id.to_string(),
        symbol: id.chars().take(3).collect(),
        name: id.to_string(),
        image: format!("https://example.com/{}.png", id),
        current_price: Some(65000.0),
        price_change_percentage_24h: Some(-1.25),
        market_cap: Some(1_280_000_000_000.0),
        market_cap_rank: Some(1),
        fully_diluted_valuation: Some(1_365_000_000_000.0),
        total_volume: Some(35_000_000_000.0),
        high_24h: Some(66000.0),
        low_24h: Some(64000.0),
        ath: Some(73738.0),
        ath_date: Utc.with_ymd_and_hms(2024, 3, 14, 7, 10, 36).single(),
        atl: Some(67.81),
        atl_date: Utc.with_ymd_and_hms(2013, 7, 6, 0, 0, 0).single(),
        last_updated: Utc.with_ymd_and_hms(2025, 3, 8, 10, 0, 0).single(),
        sparkline: vec![64000.0, 64500.0, 65000.0],
    }
}

/// Pauses a request for one id until released.
pub struct Gate {
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl Gate {
    pub fn new() -> Self {
        Self {
            started: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }
}

#[derive(Default)]
pub struct FakeCoinService {
    pub coins: HashMap<String, CoinSummary>,
    pub search_results: Vec<SearchCoin>,
    pub failing: bool,
    pub gates: HashMap<String, Gate>,
    pub requests: Mutex<Vec<Vec<String>>>,
}

impl FakeCoinService {
    pub fn with_coins(ids: &[&str]) -> Self {
        Self {
            coins: ids
                .iter()
                .map(|id| (id.to_string(), sample_coin(id)))
                .collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CoinService for FakeCoinService {
    async fn get_coins(&self, ids: &[String]) -> Result<Vec<CoinSummary>, BotError> {
        self.requests.lock().unwrap().push(ids.to_vec());

        if let Some(gate) = ids.first().and_then(|id| self.gates.get(id)) {
            gate.started.notify_one();
            gate.release.notified().await;
        }

        if self.failing {
            return Err(BotError::Network("unreachable".to_string()));
        }

        Ok(ids
            .iter()
            .filter_map(|id| self.coins.get(id).cloned())
            .collect())
    }

    async fn get_trending(&self) -> Result<Trending, BotError> {
        if self.failing {
            return Err(BotError::RateLimited);
        }

        let mut coins: Vec<TrendingCoin> = self
            .coins
            .values()
            .map(|coin| TrendingCoin {
                id: coin.id.clone(),
                symbol: coin.symbol.clone(),
                name: coin.name.clone(),
                thumb: coin.image.clone(),
                score: 0,
                price_change_percentage_24h: coin.price_change_percentage_24h.unwrap_or_default(),
            })
            .collect();
        coins.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(Trending {
            coins,
            nfts: Vec::new(),
        })
    }

    async fn search(&self, _query: &str) -> Result<Vec<SearchCoin>, BotError> {
        if self.failing {
            return Err(BotError::Network("unreachable".to_string()));
        }
        Ok(self.search_results.clone())
    }
}

/// Store whose writes always fail.
#[derive(Default)]
pub struct FailingFavoriteStore {
    pub records: Mutex<Vec<FavoriteRecord>>,
}

#[async_trait]
impl FavoriteStore for FailingFavoriteStore {
    async fn exists(&self, id: &str) -> Result<bool, BotError> {
        Ok(self.records.lock().unwrap().iter().any(|r| r.id == id))
    }

    async fn add(&self, _record: FavoriteRecord) -> Result<(), BotError> {
        Err(BotError::Storage("disk full".to_string()))
    }

    async fn remove(&self, _id: &str) -> Result<(), BotError> {
        Err(BotError::Storage("disk full".to_string()))
    }

    async fn list(&self) -> Result<Vec<FavoriteRecord>, BotError> {
        Ok(self.records.lock().unwrap().clone())
    }
}

/// Store that cannot be reached at all.
pub struct UnavailableFavoriteStore;

#[async_trait]
impl FavoriteStore for UnavailableFavoriteStore {
    async fn exists(&self, _id: &str) -> Result<bool, BotError> {
        Err(BotError::Storage("connection refused".to_string()))
    }

    async fn add(&self, _record: FavoriteRecord) -> Result<(), BotError> {
        Err(BotError::Storage("connection refused".to_string()))
    }

    async fn remove(&self, _id: &str) -> Result<(), BotError> {
        Err(BotError::Storage("connection refused".to_string()))
    }

    async fn list(&self) -> Result<Vec<FavoriteRecord>, BotError> {
        Err(BotError::Storage("connection refused".to_string()))
    }
}
