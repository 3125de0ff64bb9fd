mod bot_error;
mod coin;
mod detail_section;
mod favorite;
mod search_coin;
mod state;
mod trending;

pub use bot_error::BotError;
pub use coin::CoinSummary;
pub use detail_section::{DetailHeader, DetailItem, DetailSection};
pub use favorite::{FavoriteCoin, FavoriteRecord, FavoriteToggle};
pub use search_coin::{SearchCoin, SearchResult};
pub use state::State;
pub use trending::{Trending, TrendingCoin, TrendingNft};
