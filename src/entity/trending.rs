use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingCoin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub thumb: String,
    pub score: i32,
    pub price_change_percentage_24h: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingNft {
    pub id: String,
    pub name: String,
    pub thumb: String,
    pub floor_price: String,
    pub floor_price_change_24h: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trending {
    pub coins: Vec<TrendingCoin>,
    pub nfts: Vec<TrendingNft>,
}
