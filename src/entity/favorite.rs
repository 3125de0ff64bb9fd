use serde::{Deserialize, Serialize};

use super::CoinSummary;

/// A coin bookmarked by the user. Existence of the record is the favorite state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FavoriteRecord {
    #[sqlx(rename = "coin_id")]
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<i32>,
    pub thumb: String,
}

impl From<&CoinSummary> for FavoriteRecord {
    fn from(coin: &CoinSummary) -> Self {
        Self {
            id: coin.id.clone(),
            name: coin.name.clone(),
            symbol: coin.symbol.clone(),
            market_cap_rank: coin.market_cap_rank,
            thumb: coin.image.clone(),
        }
    }
}

/// Outcome of the favorite button, rendered as a toast.
#[derive(Debug, Clone, PartialEq)]
pub enum FavoriteToggle {
    Added,
    Removed,
    Failed(String),
}

/// A favorite joined with its live price for the favorites screen
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteCoin {
    pub record: FavoriteRecord,
    pub current_price: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
}
