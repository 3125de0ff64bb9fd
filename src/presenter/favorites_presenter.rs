use crate::interactor::favorites_interactor::FavoritesInteractor;
use crate::view::favorites_view::FavoritesView;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait FavoritesPresenter: Send + Sync {
    async fn show_favorites(&self) -> Result<()>;
}

pub struct FavoritesPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> FavoritesPresenterImpl<I, V>
where
    I: FavoritesInteractor,
    V: FavoritesView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<I, V> FavoritesPresenter for FavoritesPresenterImpl<I, V>
where
    I: FavoritesInteractor + Send + Sync,
    V: FavoritesView + Send + Sync,
{
    async fn show_favorites(&self) -> Result<()> {
        match self.interactor.get_favorites().await {
            Ok(favorites) => {
                self.view.display_favorites(&favorites).await?;
            }
            Err(e) => {
                self.view.display_error(e.to_string()).await?;
            }
        }

        Ok(())
    }
}
