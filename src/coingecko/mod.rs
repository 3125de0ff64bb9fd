pub mod coin_service;
pub mod config;
pub mod models;

pub use coin_service::{CoinService, CoingeckoCoinService};
pub use config::Config;
