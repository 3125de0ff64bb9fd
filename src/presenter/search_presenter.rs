use crate::interactor::search_interactor::SearchInteractor;
use crate::view::search_view::SearchView;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait SearchPresenter: Send + Sync {
    async fn prompt_for_query(&self) -> Result<()>;
    async fn search(&self, query: &str) -> Result<()>;
}

pub struct SearchPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> SearchPresenterImpl<I, V>
where
    I: SearchInteractor,
    V: SearchView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<I, V> SearchPresenter for SearchPresenterImpl<I, V>
where
    I: SearchInteractor + Send + Sync,
    V: SearchView + Send + Sync,
{
    async fn prompt_for_query(&self) -> Result<()> {
        self.view.prompt_for_query().await
    }

    async fn search(&self, query: &str) -> Result<()> {
        match self.interactor.search(query).await {
            Ok(results) => {
                self.view.display_results(query.trim(), &results).await?;
            }
            Err(e) => {
                self.view.display_error(e.to_string()).await?;
            }
        }

        Ok(())
    }
}
