//! Wire types for the CoinGecko REST API.
//!
//! These mirror the JSON the API returns; conversion into the entities the
//! rest of the bot works with happens here so nothing else sees the raw shape.
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

use crate::entity::{CoinSummary, SearchCoin, Trending, TrendingCoin, TrendingNft};

/// Item of the `/coins/markets` array
#[derive(Debug, Clone, Deserialize)]
pub struct MarketCoin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub current_price: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<i32>,
    pub fully_diluted_valuation: Option<f64>,
    pub total_volume: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub ath: Option<f64>,
    pub ath_date: Option<DateTime<Utc>>,
    pub atl: Option<f64>,
    pub atl_date: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
    pub sparkline_in_7d: Option<Sparkline>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sparkline {
    #[serde(default)]
    pub price: Vec<f64>,
}

impl From<MarketCoin> for CoinSummary {
    fn from(coin: MarketCoin) -> Self {
        Self {
            id: coin.id,
            symbol: coin.symbol,
            name: coin.name,
            image: coin.image,
            current_price: coin.current_price,
            price_change_percentage_24h: coin.price_change_percentage_24h,
            market_cap: coin.market_cap,
            market_cap_rank: coin.market_cap_rank,
            fully_diluted_valuation: coin.fully_diluted_valuation,
            total_volume: coin.total_volume,
            high_24h: coin.high_24h,
            low_24h: coin.low_24h,
            ath: coin.ath,
            ath_date: coin.ath_date,
            atl: coin.atl,
            atl_date: coin.atl_date,
            last_updated: coin.last_updated,
            sparkline: coin.sparkline_in_7d.map(|s| s.price).unwrap_or_default(),
        }
    }
}

/// `/search/trending` response
#[derive(Debug, Clone, Deserialize)]
pub struct TrendingResponse {
    #[serde(default)]
    pub coins: Vec<TrendingItem>,
    #[serde(default)]
    pub nfts: Vec<TrendingNftItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendingItem {
    pub item: TrendingCoinItem,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendingCoinItem {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub score: i32,
    pub data: Option<TrendingCoinData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendingCoinData {
    #[serde(default)]
    pub price_change_percentage_24h: HashMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendingNftItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub thumb: String,
    pub data: Option<TrendingNftData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendingNftData {
    #[serde(default)]
    pub floor_price: String,
    #[serde(default)]
    pub floor_price_in_usd_24h_percentage_change: String,
}

impl TrendingResponse {
    /// Flattens the response, picking the 24h change for `vs_currency`.
    pub fn into_trending(self, vs_currency: &str) -> Trending {
        let coins = self
            .coins
            .into_iter()
            .map(|TrendingItem { item }| {
                let change = item
                    .data
                    .as_ref()
                    .and_then(|data| data.price_change_percentage_24h.get(vs_currency))
                    .copied()
                    .unwrap_or_default();

                TrendingCoin {
                    id: item.id,
                    symbol: item.symbol,
                    name: item.name,
                    thumb: item.thumb,
                    score: item.score,
                    price_change_percentage_24h: change,
                }
            })
            .collect();

        let nfts = self
            .nfts
            .into_iter()
            .map(|nft| {
                let (floor_price, change) = nft
                    .data
                    .map(|data| {
                        (
                            data.floor_price,
                            data.floor_price_in_usd_24h_percentage_change,
                        )
                    })
                    .unwrap_or_default();

                TrendingNft {
                    id: nft.id,
                    name: nft.name,
                    thumb: nft.thumb,
                    floor_price,
                    floor_price_change_24h: change,
                }
            })
            .collect();

        Trending { coins, nfts }
    }
}

/// `/search` response, only the coin part is used
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub coins: Vec<SearchCoinItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchCoinItem {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<i32>,
    #[serde(default)]
    pub thumb: String,
}

impl From<SearchCoinItem> for SearchCoin {
    fn from(item: SearchCoinItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            symbol: item.symbol,
            market_cap_rank: item.market_cap_rank,
            thumb: item.thumb,
        }
    }
}

/// Error bodies CoinGecko sends alongside non-2xx codes (and sometimes with 200)
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiErrorBody {
    Status { status: ApiErrorStatus },
    Plain { error: String },
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorStatus {
    pub error_code: u16,
    pub error_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKETS_JSON: &str = r#"[{
        "id": "bitcoin",
        "symbol": "btc",
        "name": "Bitcoin",
        "image": "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
        "current_price": 65000,
        "market_cap": 1280000000000,
        "market_cap_rank": 1,
        "fully_diluted_valuation": null,
        "total_volume": 35000000000,
        "high_24h": 66000,
        "low_24h": 64000,
        "price_change_percentage_24h": -1.25,
        "ath": 73738,
        "ath_date": "2024-03-14T07:10:36.635Z",
        "atl": 67.81,
        "atl_date": "2013-07-06T00:00:00.000Z",
        "last_updated": "2025-03-08T10:00:00.000Z",
        "sparkline_in_7d": { "price": [64000.5, 64500.0, 65000.0] }
    }]"#;

    #[test]
    fn decodes_markets_with_nulls() {
        let coins: Vec<MarketCoin> = serde_json::from_str(MARKETS_JSON).unwrap();
        let summary = CoinSummary::from(coins.into_iter().next().unwrap());

        assert_eq!(summary.id, "bitcoin");
        assert_eq!(summary.current_price, Some(65000.0));
        assert_eq!(summary.high_24h, Some(66000.0));
        assert_eq!(summary.fully_diluted_valuation, None);
        assert_eq!(summary.market_cap_rank, Some(1));
        assert_eq!(summary.sparkline.len(), 3);
        assert!(summary.ath_date.is_some());
    }

    #[test]
    fn missing_sparkline_is_empty() {
        let json = r#"[{"id":"dogecoin","symbol":"doge","name":"Dogecoin","current_price":null}]"#;
        let coins: Vec<MarketCoin> = serde_json::from_str(json).unwrap();
        let summary = CoinSummary::from(coins[0].clone());

        assert!(summary.sparkline.is_empty());
        assert_eq!(summary.current_price, None);
        assert_eq!(summary.image, "");
    }

    #[test]
    fn trending_picks_requested_currency() {
        let json = r#"{
            "coins": [
                {"item": {"id": "pepe", "symbol": "PEPE", "name": "Pepe", "thumb": "t.png", "score": 0,
                          "data": {"price_change_percentage_24h": {"krw": 12.5, "usd": 12.4}}}},
                {"item": {"id": "sui", "symbol": "SUI", "name": "Sui", "score": 1}}
            ],
            "nfts": [
                {"id": "pudgy", "name": "Pudgy Penguins", "thumb": "p.png",
                 "data": {"floor_price": "10.5 ETH", "floor_price_in_usd_24h_percentage_change": "-2.1"}}
            ]
        }"#;
        let response: TrendingResponse = serde_json::from_str(json).unwrap();
        let trending = response.into_trending("krw");

        assert_eq!(trending.coins.len(), 2);
        assert_eq!(trending.coins[0].price_change_percentage_24h, 12.5);
        assert_eq!(trending.coins[1].price_change_percentage_24h, 0.0);
        assert_eq!(trending.nfts[0].floor_price, "10.5 ETH");
        assert_eq!(trending.nfts[0].floor_price_change_24h, "-2.1");
    }

    #[test]
    fn decodes_error_bodies() {
        let status: ApiErrorBody = serde_json::from_str(
            r#"{"status":{"error_code":429,"error_message":"You've exceeded the Rate Limit"}}"#,
        )
        .unwrap();
        assert!(matches!(status, ApiErrorBody::Status { status } if status.error_code == 429));

        let plain: ApiErrorBody = serde_json::from_str(r#"{"error":"coin not found"}"#).unwrap();
        assert!(matches!(plain, ApiErrorBody::Plain { error } if error == "coin not found"));
    }
}
