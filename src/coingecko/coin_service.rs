use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::coingecko::models::{ApiErrorBody, MarketCoin, SearchResponse, TrendingResponse};
use crate::coingecko::Config;
use crate::entity::{BotError, CoinSummary, SearchCoin, Trending};

/// Source of market data for the bot
#[async_trait]
pub trait CoinService: Send + Sync {
    /// Market snapshots for the given coin ids, fetched in a single request
    async fn get_coins(&self, ids: &[String]) -> Result<Vec<CoinSummary>, BotError>;

    /// Coins and NFTs trending in the last 24 hours
    async fn get_trending(&self) -> Result<Trending, BotError>;

    /// Coins matching a free-text query
    async fn search(&self, query: &str) -> Result<Vec<SearchCoin>, BotError>;
}

/// CoinGecko REST implementation
pub struct CoingeckoCoinService {
    http_client: Client,
    config: Config,
}

impl CoingeckoCoinService {
    pub fn new(config: Config) -> Result<Self, BotError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("crypto-collection-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BotError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn vs_currency(&self) -> &str {
        &self.config.vs_currency
    }

    async fn get_json<D>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        resource: &str,
    ) -> Result<D, BotError>
    where
        D: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.api_url, path);
        debug!("GET {} {:?}", url, query);

        let mut request = self.http_client.get(&url).query(query);
        if let Some(key) = &self.config.api_key {
            request = request.header("x-cg-demo-api-key", key);
        }

        let response = request.send().await.map_err(|e| {
            error!("Failed to reach CoinGecko: {}", e);
            BotError::Network(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("CoinGecko API error [{}]: {}", status, body);
            return Err(BotError::from_status(status.as_u16(), resource));
        }

        decode_body(&body, resource)
    }
}

/// Decodes a successful body, honouring error payloads sent with a 200.
pub(crate) fn decode_body<D>(body: &str, resource: &str) -> Result<D, BotError>
where
    D: DeserializeOwned,
{
    match serde_json::from_str::<D>(body) {
        Ok(value) => Ok(value),
        Err(decode_err) => match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(ApiErrorBody::Status { status }) => {
                error!("CoinGecko API error: {}", status.error_message);
                Err(BotError::from_status(status.error_code, resource))
            }
            Ok(ApiErrorBody::Plain { error }) => Err(BotError::NotFound(format!(
                "{} ({})",
                resource, error
            ))),
            Err(_) => Err(BotError::Decode(decode_err.to_string())),
        },
    }
}

#[async_trait]
impl CoinService for CoingeckoCoinService {
    async fn get_coins(&self, ids: &[String]) -> Result<Vec<CoinSummary>, BotError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids.join(",");
        info!("Fetching market data for: {}", joined);

        let coins: Vec<MarketCoin> = self
            .get_json(
                "/coins/markets",
                &[
                    ("vs_currency", self.vs_currency()),
                    ("ids", joined.as_str()),
                    ("sparkline", "true"),
                ],
                &joined,
            )
            .await?;

        Ok(coins.into_iter().map(CoinSummary::from).collect())
    }

    async fn get_trending(&self) -> Result<Trending, BotError> {
        info!("Fetching trending coins");

        let response: TrendingResponse = self.get_json("/search/trending", &[], "trending").await?;

        Ok(response.into_trending(self.vs_currency()))
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchCoin>, BotError> {
        info!("Searching coins for: {}", query);

        let response: SearchResponse = self
            .get_json("/search", &[("query", query)], query)
            .await?;

        Ok(response.coins.into_iter().map(SearchCoin::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coingecko::models::MarketCoin;

    #[test]
    fn decode_reports_shape_mismatch() {
        let result: Result<Vec<MarketCoin>, BotError> =
            decode_body(r#"{"unexpected": 1}"#, "bitcoin");
        assert!(matches!(result, Err(BotError::Decode(_))));
    }

    #[test]
    fn decode_maps_embedded_status_error() {
        let body = r#"{"status":{"error_code":429,"error_message":"rate limited"}}"#;
        let result: Result<Vec<MarketCoin>, BotError> = decode_body(body, "bitcoin");
        assert!(matches!(result, Err(BotError::RateLimited)));
    }

    #[test]
    fn decode_maps_plain_error_to_not_found() {
        let result: Result<Vec<MarketCoin>, BotError> =
            decode_body(r#"{"error":"coin not found"}"#, "nope");
        assert!(matches!(result, Err(BotError::NotFound(msg)) if msg.contains("nope")));
    }

    #[test]
    fn decode_accepts_empty_array() {
        let result: Result<Vec<MarketCoin>, BotError> = decode_body("[]", "bitcoin");
        assert!(result.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_id_list_skips_request() {
        let config = Config {
            api_url: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        };
        let service = CoingeckoCoinService::new(config).unwrap();

        let coins = service.get_coins(&[]).await.unwrap();
        assert!(coins.is_empty());
    }
}
