use crate::interactor::trending_interactor::TrendingInteractor;
use crate::view::trending_view::TrendingView;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait TrendingPresenter: Send + Sync {
    async fn show_trending(&self) -> Result<()>;
}

pub struct TrendingPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> TrendingPresenterImpl<I, V>
where
    I: TrendingInteractor,
    V: TrendingView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<I, V> TrendingPresenter for TrendingPresenterImpl<I, V>
where
    I: TrendingInteractor + Send + Sync,
    V: TrendingView + Send + Sync,
{
    async fn show_trending(&self) -> Result<()> {
        match self.interactor.get_trending().await {
            Ok(trending) => {
                self.view.display_trending(&trending).await?;
            }
            Err(e) => {
                self.view.display_error(e.to_string()).await?;
            }
        }

        Ok(())
    }
}
