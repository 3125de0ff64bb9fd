use anyhow::Result;
use log::{error, info};
use std::sync::Arc;
use teloxide::{prelude::*, types::MessageId};

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::interactor::detail_interactor::DetailInteractorImpl;
use crate::presenter::detail_presenter::{DetailIntent, DetailPresenter, DetailPresenterImpl};
use crate::utils::normalize_coin_id;
use crate::view::detail_view::TelegramDetailView;

pub struct CoinCommand;

impl CommandHandler for CoinCommand {
    fn command_name() -> &'static str {
        "coin"
    }

    fn description() -> &'static str {
        "show coin details"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        chat_id: ChatId,
        _dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let argument = msg
            .text()
            .and_then(|text| text.split_whitespace().nth(1))
            .unwrap_or("");

        info!("Coin command received in chat {}: {}", chat_id, argument);

        match normalize_coin_id(argument) {
            Some(coin_id) => open_detail(bot, chat_id, None, coin_id, services),
            None => {
                bot.send_message(
                    chat_id,
                    "Use the command in this format: /coin <coin_id>\n\nExample: /coin bitcoin",
                )
                .await?;
            }
        }

        Ok(())
    }
}

fn detail_presenter(
    bot: Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    services: &ServiceContainer,
) -> DetailPresenterImpl<DetailInteractorImpl, TelegramDetailView> {
    let interactor = Arc::new(DetailInteractorImpl::new(
        services.coin_service(),
        services.favorite_store(chat_id.0),
        services.detail_sessions(),
        chat_id.0,
        services.vs_currency(),
    ));
    let view = Arc::new(TelegramDetailView::new(bot, chat_id, message_id));

    DetailPresenterImpl::new(interactor, view)
}

/// Load the detail screen in the background so newer taps can supersede it
pub fn open_detail(
    bot: Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    coin_id: String,
    services: Arc<ServiceContainer>,
) {
    let presenter = detail_presenter(bot, chat_id, message_id, &services);

    tokio::spawn(async move {
        if let Err(e) = presenter.show_detail(&coin_id).await {
            error!("Failed to show detail for {}: {}", coin_id, e);
        }
    });
}

/// Route a detail-screen button tap to its presenter
pub async fn handle_detail_intent(
    bot: Bot,
    chat_id: ChatId,
    message_id: MessageId,
    intent: DetailIntent,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    if let DetailIntent::Retry(coin_id) = intent {
        open_detail(bot, chat_id, Some(message_id), coin_id, services);
        return Ok(());
    }

    let presenter = detail_presenter(bot, chat_id, Some(message_id), &services);
    presenter.handle_intent(intent).await
}
