use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;
use teloxide::prelude::*;

use crate::commands::{coin, favorites, help, search, trending, MyDialogue};
use crate::di::ServiceContainer;
use crate::presenter::detail_presenter::DetailIntent;
use crate::utils::normalize_coin_id;

/// Screen a callback button leads to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    Trending,
    Favorites,
    Search,
    Help,
    OpenCoin(String),
    Detail(DetailIntent),
}

impl CallbackAction {
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "trending" => Some(CallbackAction::Trending),
            "favorites" => Some(CallbackAction::Favorites),
            "search" => Some(CallbackAction::Search),
            "help" => Some(CallbackAction::Help),
            _ => {
                if let Some(id) = data.strip_prefix("coin_") {
                    return normalize_coin_id(id).map(CallbackAction::OpenCoin);
                }

                match DetailIntent::from_callback(data)? {
                    DetailIntent::Back => Some(CallbackAction::Detail(DetailIntent::Back)),
                    DetailIntent::ToggleFavorite(id) => normalize_coin_id(&id)
                        .map(|id| CallbackAction::Detail(DetailIntent::ToggleFavorite(id))),
                    DetailIntent::Retry(id) => normalize_coin_id(&id)
                        .map(|id| CallbackAction::Detail(DetailIntent::Retry(id))),
                }
            }
        }
    }
}

// Main callback handler function
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    // Extract the callback data
    let callback_data = match q.data.clone() {
        Some(data) => data,
        None => return Ok(()),
    };

    // Get the chat and the message the button belongs to
    let (chat_id, message_id) = match q.message {
        Some(ref msg) => (msg.chat().id, msg.id()),
        None => return Ok(()),
    };

    info!(
        "Received callback: {} from user {} in chat {}",
        callback_data, q.from.id, chat_id
    );

    // Acknowledge the callback query to stop loading animation
    if let Err(err) = bot.answer_callback_query(q.id.clone()).await {
        info!("Failed to answer callback query: {}", err);
    }

    let Some(action) = CallbackAction::parse(&callback_data) else {
        warn!("Unknown callback data: {}", callback_data);
        return Ok(());
    };

    match action {
        CallbackAction::Trending => trending::show_trending(bot, chat_id, services).await?,
        CallbackAction::Favorites => favorites::show_favorites(bot, chat_id, services).await?,
        CallbackAction::Search => {
            search::start_search(bot, chat_id, Some(dialogue), services).await?
        }
        CallbackAction::Help => help::send_help(&bot, chat_id).await?,
        CallbackAction::OpenCoin(coin_id) => {
            coin::open_detail(bot, chat_id, None, coin_id, services)
        }
        CallbackAction::Detail(intent) => {
            coin::handle_detail_intent(bot, chat_id, message_id, intent, services).await?
        }
    }

    Ok(())
}
