use async_trait::async_trait;
use log::{debug, error, info, warn};
use std::sync::Arc;

use crate::coingecko::CoinService;
use crate::entity::{
    BotError, CoinSummary, DetailHeader, DetailItem, DetailSection, FavoriteRecord, FavoriteToggle,
};
use crate::interactor::favorite_store::FavoriteStore;
use crate::services::{DetailSessions, RequestTicket};
use crate::utils::{format_date, format_money, format_percentage, format_updated_at, sparkline};

pub const SECTION_COIN_INFO: &str = "종목정보";
pub const SECTION_INDICATORS: &str = "투자지표";
pub const HIGH_24H: &str = "24시간 고가";
pub const LOW_24H: &str = "24시간 저가";
pub const ALL_TIME_HIGH: &str = "역대 최고가";
pub const ALL_TIME_LOW: &str = "역대 최소가";
pub const MARKET_CAP: &str = "시가총액";
pub const FULLY_DILUTED_VALUATION: &str = "완전 희석 가치(FDV)";
pub const TOTAL_VOLUME: &str = "총 거래량";

const CHART_WIDTH: usize = 24;

/// Result of a single detail fetch
#[derive(Debug)]
pub enum DetailOutput {
    Loaded {
        ticket: RequestTicket,
        summary: CoinSummary,
        header: DetailHeader,
        sections: Vec<DetailSection>,
    },
    Failed(BotError),
    /// A newer load for the same chat started while this one was in flight
    Superseded,
}

#[async_trait]
pub trait DetailInteractor: Send + Sync {
    async fn load_detail(&self, id: &str) -> DetailOutput;
    async fn toggle_favorite(&self, id: &str, snapshot: &CoinSummary) -> FavoriteToggle;
    async fn is_favorite(&self, id: &str) -> Result<bool, BotError>;
    fn current_snapshot(&self, id: &str) -> Option<CoinSummary>;
    /// Whether `ticket` is still the newest detail load of this chat
    fn is_current(&self, ticket: RequestTicket) -> bool;
}

pub struct DetailInteractorImpl {
    coin_service: Arc<dyn CoinService + Send + Sync>,
    favorite_store: Arc<dyn FavoriteStore + Send + Sync>,
    sessions: Arc<DetailSessions>,
    scope: i64,
    vs_currency: String,
}

impl DetailInteractorImpl {
    pub fn new(
        coin_service: Arc<dyn CoinService + Send + Sync>,
        favorite_store: Arc<dyn FavoriteStore + Send + Sync>,
        sessions: Arc<DetailSessions>,
        scope: i64,
        vs_currency: String,
    ) -> Self {
        Self {
            coin_service,
            favorite_store,
            sessions,
            scope,
            vs_currency,
        }
    }
}

fn item(title: &str, value: Option<f64>, vs_currency: &str) -> DetailItem {
    DetailItem {
        title: title.to_string(),
        value,
        money: format_money(value, vs_currency),
        date: None,
    }
}

fn dated_item(
    title: &str,
    value: Option<f64>,
    date: Option<&chrono::DateTime<chrono::Utc>>,
    vs_currency: &str,
) -> DetailItem {
    DetailItem {
        date: date.map(format_date),
        ..item(title, value, vs_currency)
    }
}

pub fn build_detail_header(coin: &CoinSummary, vs_currency: &str) -> DetailHeader {
    DetailHeader {
        coin_id: coin.id.clone(),
        symbol: coin.display_symbol(),
        name: coin.name.clone(),
        image: coin.image.clone(),
        price: format_money(coin.current_price, vs_currency),
        change: format_percentage(coin.price_change_percentage_24h),
        is_rising: coin.price_change_percentage_24h.unwrap_or_default() >= 0.0,
        chart: sparkline(&coin.sparkline, CHART_WIDTH),
        updated_at: coin.last_updated.as_ref().map(format_updated_at),
    }
}

/// Split a coin into the two metric sections of the detail screen.
pub fn build_detail_sections(coin: &CoinSummary, vs_currency: &str) -> Vec<DetailSection> {
    vec![
        DetailSection {
            title: SECTION_COIN_INFO.to_string(),
            items: vec![
                item(HIGH_24H, coin.high_24h, vs_currency),
                item(LOW_24H, coin.low_24h, vs_currency),
                dated_item(ALL_TIME_HIGH, coin.ath, coin.ath_date.as_ref(), vs_currency),
                dated_item(ALL_TIME_LOW, coin.atl, coin.atl_date.as_ref(), vs_currency),
            ],
        },
        DetailSection {
            title: SECTION_INDICATORS.to_string(),
            items: vec![
                item(MARKET_CAP, coin.market_cap, vs_currency),
                item(FULLY_DILUTED_VALUATION, coin.fully_diluted_valuation, vs_currency),
                item(TOTAL_VOLUME, coin.total_volume, vs_currency),
            ],
        },
    ]
}

#[async_trait]
impl DetailInteractor for DetailInteractorImpl {
    async fn load_detail(&self, id: &str) -> DetailOutput {
        let ticket = self.sessions.begin(self.scope);

        let result = self.coin_service.get_coins(&[id.to_string()]).await;

        if !self.sessions.is_current(ticket) {
            debug!("Dropping stale detail result for {} in chat {}", id, self.scope);
            return DetailOutput::Superseded;
        }

        let summary = match result {
            Ok(coins) => match coins.into_iter().find(|coin| coin.id == id) {
                Some(summary) => summary,
                None => return DetailOutput::Failed(BotError::NotFound(id.to_string())),
            },
            Err(e) if e.is_transport() => {
                warn!("Price API unavailable for {}: {}", id, e);
                return DetailOutput::Failed(e);
            }
            Err(e) => {
                error!("Failed to load detail for {}: {}", id, e);
                return DetailOutput::Failed(e);
            }
        };

        if !self.sessions.complete(ticket, &summary) {
            return DetailOutput::Superseded;
        }

        let header = build_detail_header(&summary, &self.vs_currency);
        let sections = build_detail_sections(&summary, &self.vs_currency);
        DetailOutput::Loaded {
            ticket,
            summary,
            header,
            sections,
        }
    }

    async fn toggle_favorite(&self, id: &str, snapshot: &CoinSummary) -> FavoriteToggle {
        let exists = match self.favorite_store.exists(id).await {
            Ok(exists) => exists,
            Err(e) => {
                error!("Failed to check favorite {}: {}", id, e);
                return FavoriteToggle::Failed(e.to_string());
            }
        };

        if exists {
            match self.favorite_store.remove(id).await {
                Ok(()) => {
                    info!("Favorite removed: {}", id);
                    FavoriteToggle::Removed
                }
                Err(e) => {
                    error!("Failed to remove favorite {}: {}", id, e);
                    FavoriteToggle::Failed(e.to_string())
                }
            }
        } else {
            let record = FavoriteRecord {
                id: id.to_string(),
                ..FavoriteRecord::from(snapshot)
            };

            match self.favorite_store.add(record).await {
                Ok(()) => {
                    info!("Favorite added: {}", id);
                    FavoriteToggle::Added
                }
                Err(e) => {
                    error!("Failed to add favorite {}: {}", id, e);
                    FavoriteToggle::Failed(e.to_string())
                }
            }
        }
    }

    async fn is_favorite(&self, id: &str) -> Result<bool, BotError> {
        self.favorite_store.exists(id).await
    }

    fn current_snapshot(&self, id: &str) -> Option<CoinSummary> {
        self.sessions.snapshot(self.scope, id)
    }

    fn is_current(&self, ticket: RequestTicket) -> bool {
        self.sessions.is_current(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactor::fakes::{sample_coin, FailingFavoriteStore, FakeCoinService, Gate};
    use crate::interactor::favorite_store::InMemoryFavoriteStore;

    fn interactor(
        coin_service: Arc<FakeCoinService>,
        store: Arc<dyn FavoriteStore + Send + Sync>,
        sessions: Arc<DetailSessions>,
    ) -> DetailInteractorImpl {
        DetailInteractorImpl::new(coin_service, store, sessions, 42, "krw".to_string())
    }

    #[test]
    fn sections_follow_fixed_order() {
        let sections = build_detail_sections(&sample_coin("bitcoin"), "krw");

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, SECTION_COIN_INFO);
        let titles: Vec<&str> = sections[0].items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec![HIGH_24H, LOW_24H, ALL_TIME_HIGH, ALL_TIME_LOW]);

        assert_eq!(sections[1].title, SECTION_INDICATORS);
        let titles: Vec<&str> = sections[1].items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec![MARKET_CAP, FULLY_DILUTED_VALUATION, TOTAL_VOLUME]);
    }

    #[test]
    fn sections_map_fields_one_to_one() {
        let coin = sample_coin("bitcoin");
        let sections = build_detail_sections(&coin, "krw");

        let high = sections[0].item(HIGH_24H).unwrap();
        assert_eq!(high.value, Some(66000.0));
        assert_eq!(high.money, "₩66,000");
        assert_eq!(high.date, None);

        let low = sections[0].item(LOW_24H).unwrap();
        assert_eq!(low.value, Some(64000.0));
        assert_eq!(low.money, "₩64,000");

        let ath = sections[0].item(ALL_TIME_HIGH).unwrap();
        assert_eq!(ath.value, coin.ath);
        assert_eq!(ath.date.as_deref(), Some("24년 3월 14일"));

        assert_eq!(sections[1].item(MARKET_CAP).unwrap().value, coin.market_cap);
        assert_eq!(
            sections[1].item(FULLY_DILUTED_VALUATION).unwrap().value,
            coin.fully_diluted_valuation
        );
        assert_eq!(sections[1].item(TOTAL_VOLUME).unwrap().value, coin.total_volume);
    }

    #[test]
    fn header_is_display_ready() {
        let header = build_detail_header(&sample_coin("bitcoin"), "krw");

        assert_eq!(header.symbol, "BIT");
        assert_eq!(header.price, "₩65,000");
        assert_eq!(header.chart, "▁▅█");
        assert!(header.updated_at.is_some());
    }

    #[test]
    fn missing_values_render_as_dash() {
        let coin = CoinSummary {
            fully_diluted_valuation: None,
            atl_date: None,
            ..sample_coin("bitcoin")
        };
        let sections = build_detail_sections(&coin, "krw");

        assert_eq!(sections[1].item(FULLY_DILUTED_VALUATION).unwrap().money, "-");
        assert_eq!(sections[0].item(ALL_TIME_LOW).unwrap().date, None);
    }

    #[tokio::test]
    async fn load_detail_emits_summary_and_sections() {
        let service = Arc::new(FakeCoinService::with_coins(&["bitcoin"]));
        let sessions = Arc::new(DetailSessions::new());
        let interactor = interactor(
            service.clone(),
            Arc::new(InMemoryFavoriteStore::new()),
            sessions.clone(),
        );

        match interactor.load_detail("bitcoin").await {
            DetailOutput::Loaded {
                summary,
                header,
                sections,
                ..
            } => {
                assert_eq!(summary.current_price, Some(65000.0));
                assert_eq!(header.price, "₩65,000");
                assert_eq!(header.change, "-1.25%");
                assert!(!header.is_rising);
                assert_eq!(sections[0].item(HIGH_24H).unwrap().value, Some(66000.0));
                assert_eq!(sections[0].item(LOW_24H).unwrap().value, Some(64000.0));
            }
            other => panic!("unexpected output: {:?}", other),
        }

        assert_eq!(service.requests(), vec![vec!["bitcoin".to_string()]]);
        assert!(interactor.current_snapshot("bitcoin").is_some());
    }

    #[tokio::test]
    async fn load_detail_reports_errors_as_values() {
        let interactor = interactor(
            Arc::new(FakeCoinService::failing()),
            Arc::new(InMemoryFavoriteStore::new()),
            Arc::new(DetailSessions::new()),
        );

        assert!(matches!(
            interactor.load_detail("bitcoin").await,
            DetailOutput::Failed(BotError::Network(_))
        ));
        assert!(interactor.current_snapshot("bitcoin").is_none());
    }

    #[tokio::test]
    async fn empty_response_is_not_found() {
        let interactor = interactor(
            Arc::new(FakeCoinService::default()),
            Arc::new(InMemoryFavoriteStore::new()),
            Arc::new(DetailSessions::new()),
        );

        assert!(matches!(
            interactor.load_detail("nope").await,
            DetailOutput::Failed(BotError::NotFound(id)) if id == "nope"
        ));
    }

    #[tokio::test]
    async fn newer_load_discards_stale_result() {
        let gate = Gate::new();
        let started = gate.started.clone();
        let release = gate.release.clone();

        let mut service = FakeCoinService::with_coins(&["bitcoin", "ethereum"]);
        service.gates.insert("bitcoin".to_string(), gate);
        let service = Arc::new(service);
        let sessions = Arc::new(DetailSessions::new());
        let store: Arc<dyn FavoriteStore + Send + Sync> = Arc::new(InMemoryFavoriteStore::new());

        let slow = Arc::new(interactor(service.clone(), store.clone(), sessions.clone()));
        let slow_task = {
            let slow = slow.clone();
            tokio::spawn(async move { slow.load_detail("bitcoin").await })
        };
        started.notified().await;

        let fast = interactor(service, store, sessions);
        assert!(matches!(
            fast.load_detail("ethereum").await,
            DetailOutput::Loaded { .. }
        ));

        release.notify_one();
        let stale = slow_task.await.unwrap();

        assert!(matches!(stale, DetailOutput::Superseded));
        assert!(fast.current_snapshot("ethereum").is_some());
        assert!(fast.current_snapshot("bitcoin").is_none());
    }

    #[tokio::test]
    async fn toggle_twice_restores_existence() {
        let store = Arc::new(InMemoryFavoriteStore::new());
        let interactor = interactor(
            Arc::new(FakeCoinService::default()),
            store.clone(),
            Arc::new(DetailSessions::new()),
        );
        let snapshot = sample_coin("bitcoin");

        assert!(!store.exists("bitcoin").await.unwrap());
        assert_eq!(
            interactor.toggle_favorite("bitcoin", &snapshot).await,
            FavoriteToggle::Added
        );
        assert!(store.exists("bitcoin").await.unwrap());

        let saved = store.list().await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, snapshot.name);
        assert_eq!(saved[0].thumb, snapshot.image);
        assert_eq!(saved[0].market_cap_rank, Some(1));

        assert_eq!(
            interactor.toggle_favorite("bitcoin", &snapshot).await,
            FavoriteToggle::Removed
        );
        assert!(!store.exists("bitcoin").await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_write_leaves_store_unchanged() {
        let store = Arc::new(FailingFavoriteStore::default());
        let interactor = interactor(
            Arc::new(FakeCoinService::default()),
            store.clone(),
            Arc::new(DetailSessions::new()),
        );

        let outcome = interactor
            .toggle_favorite("bitcoin", &sample_coin("bitcoin"))
            .await;

        assert!(matches!(outcome, FavoriteToggle::Failed(msg) if msg.contains("disk full")));
        assert!(!store.exists("bitcoin").await.unwrap());
    }

    #[tokio::test]
    async fn failed_remove_keeps_record() {
        let snapshot = sample_coin("bitcoin");
        let store = Arc::new(FailingFavoriteStore::default());
        store
            .records
            .lock()
            .unwrap()
            .push(FavoriteRecord::from(&snapshot));
        let interactor = interactor(
            Arc::new(FakeCoinService::default()),
            store.clone(),
            Arc::new(DetailSessions::new()),
        );

        let outcome = interactor.toggle_favorite("bitcoin", &snapshot).await;

        assert!(matches!(outcome, FavoriteToggle::Failed(msg) if msg.contains("disk full")));
        assert!(store.exists("bitcoin").await.unwrap());
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn ticket_goes_stale_after_newer_load() {
        let sessions = Arc::new(DetailSessions::new());
        let interactor = interactor(
            Arc::new(FakeCoinService::with_coins(&["bitcoin"])),
            Arc::new(InMemoryFavoriteStore::new()),
            sessions.clone(),
        );

        let DetailOutput::Loaded { ticket, .. } = interactor.load_detail("bitcoin").await else {
            panic!("expected a loaded detail");
        };
        assert!(interactor.is_current(ticket));

        sessions.begin(42);
        assert!(!interactor.is_current(ticket));
    }
}
