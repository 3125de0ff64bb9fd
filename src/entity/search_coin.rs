use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCoin {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<i32>,
    pub thumb: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub coin: SearchCoin,
    pub is_favorite: bool,
}
