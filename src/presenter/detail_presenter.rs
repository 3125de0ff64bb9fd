use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use crate::entity::CoinSummary;
use crate::interactor::detail_interactor::{DetailInteractor, DetailOutput};
use crate::view::detail_view::DetailView;

/// Button taps on the detail screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailIntent {
    Back,
    ToggleFavorite(String),
    Retry(String),
}

impl DetailIntent {
    /// Parse callback data produced by the detail keyboard
    pub fn from_callback(data: &str) -> Option<Self> {
        if data == "back" {
            Some(DetailIntent::Back)
        } else if let Some(id) = data.strip_prefix("fav_") {
            Some(DetailIntent::ToggleFavorite(id.to_string()))
        } else {
            data.strip_prefix("retry_")
                .map(|id| DetailIntent::Retry(id.to_string()))
        }
    }
}

#[async_trait]
pub trait DetailPresenter: Send + Sync {
    async fn show_detail(&self, coin_id: &str) -> Result<()>;
    async fn handle_intent(&self, intent: DetailIntent) -> Result<()>;
}

pub struct DetailPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> DetailPresenterImpl<I, V>
where
    I: DetailInteractor,
    V: DetailView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

impl<I, V> DetailPresenterImpl<I, V>
where
    I: DetailInteractor + Send + Sync,
    V: DetailView + Send + Sync,
{
    // Loads and renders; returns the published snapshot, if any
    async fn load_and_render(&self, coin_id: &str) -> Result<Option<CoinSummary>> {
        match self.interactor.load_detail(coin_id).await {
            DetailOutput::Loaded {
                ticket,
                summary,
                header,
                sections,
            } => {
                let favorite_state = self.interactor.is_favorite(coin_id).await;

                // A newer load may have published while the favorite state was read
                if !self.interactor.is_current(ticket) {
                    debug!("Detail for {} superseded before rendering", coin_id);
                    self.view.dismiss().await?;
                    return Ok(None);
                }

                match favorite_state {
                    Ok(is_favorite) => {
                        self.view
                            .display_detail(&header, &sections, is_favorite)
                            .await?;
                    }
                    Err(e) => {
                        warn!("Failed to read favorite state of {}: {}", coin_id, e);
                        self.view.display_detail(&header, &sections, false).await?;
                        self.view
                            .display_favorite_state_error(coin_id, e.to_string())
                            .await?;
                    }
                }
                Ok(Some(summary))
            }
            DetailOutput::Failed(e) => {
                self.view.display_error(coin_id, e.to_string()).await?;
                Ok(None)
            }
            DetailOutput::Superseded => {
                debug!("Detail for {} superseded, not rendering", coin_id);
                self.view.dismiss().await?;
                Ok(None)
            }
        }
    }

    async fn toggle_favorite(&self, coin_id: &str) -> Result<()> {
        let snapshot = match self.interactor.current_snapshot(coin_id) {
            Some(snapshot) => snapshot,
            None => match self.load_and_render(coin_id).await? {
                Some(snapshot) => snapshot,
                None => return Ok(()),
            },
        };

        let result = self.interactor.toggle_favorite(coin_id, &snapshot).await;
        self.view
            .display_favorite_result(coin_id, &snapshot.display_symbol(), &result)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl<I, V> DetailPresenter for DetailPresenterImpl<I, V>
where
    I: DetailInteractor + Send + Sync,
    V: DetailView + Send + Sync,
{
    async fn show_detail(&self, coin_id: &str) -> Result<()> {
        self.view.display_loading(coin_id).await?;
        self.load_and_render(coin_id).await?;

        Ok(())
    }

    async fn handle_intent(&self, intent: DetailIntent) -> Result<()> {
        match intent {
            DetailIntent::Back => self.view.navigate_back().await,
            DetailIntent::ToggleFavorite(coin_id) => self.toggle_favorite(&coin_id).await,
            DetailIntent::Retry(coin_id) => self.show_detail(&coin_id).await,
        }
    }
}
