use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::interactor::favorites_interactor::FavoritesInteractorImpl;
use crate::presenter::favorites_presenter::{FavoritesPresenter, FavoritesPresenterImpl};
use crate::view::favorites_view::TelegramFavoritesView;

pub struct FavoritesCommand;

impl CommandHandler for FavoritesCommand {
    fn command_name() -> &'static str {
        "favorites"
    }

    fn description() -> &'static str {
        "show your favorite coins"
    }

    async fn execute(
        bot: Bot,
        _msg: Message,
        chat_id: ChatId,
        _dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Favorites command received in chat {}", chat_id);

        show_favorites(bot, chat_id, services).await
    }
}

pub async fn show_favorites(
    bot: Bot,
    chat_id: ChatId,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let interactor = Arc::new(FavoritesInteractorImpl::new(
        services.coin_service(),
        services.favorite_store(chat_id.0),
    ));
    let view = Arc::new(TelegramFavoritesView::new(
        bot,
        chat_id,
        services.vs_currency(),
    ));
    let presenter = FavoritesPresenterImpl::new(interactor, view);

    presenter.show_favorites().await
}
