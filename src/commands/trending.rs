use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::interactor::trending_interactor::TrendingInteractorImpl;
use crate::presenter::trending_presenter::{TrendingPresenter, TrendingPresenterImpl};
use crate::view::trending_view::TelegramTrendingView;

pub struct TrendingCommand;

impl CommandHandler for TrendingCommand {
    fn command_name() -> &'static str {
        "trending"
    }

    fn description() -> &'static str {
        "show trending coins"
    }

    async fn execute(
        bot: Bot,
        _msg: Message,
        chat_id: ChatId,
        _dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Trending command received in chat {}", chat_id);

        show_trending(bot, chat_id, services).await
    }
}

pub async fn show_trending(bot: Bot, chat_id: ChatId, services: Arc<ServiceContainer>) -> Result<()> {
    let interactor = Arc::new(TrendingInteractorImpl::new(services.coin_service()));
    let view = Arc::new(TelegramTrendingView::new(bot, chat_id));
    let presenter = TrendingPresenterImpl::new(interactor, view);

    presenter.show_trending().await
}
