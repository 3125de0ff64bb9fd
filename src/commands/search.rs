use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;
use crate::interactor::search_interactor::SearchInteractorImpl;
use crate::presenter::search_presenter::{SearchPresenter, SearchPresenterImpl};
use crate::view::search_view::TelegramSearchView;

pub struct SearchCommand;

impl CommandHandler for SearchCommand {
    fn command_name() -> &'static str {
        "search"
    }

    fn description() -> &'static str {
        "search coins by name or symbol"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        chat_id: ChatId,
        dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let query = msg
            .text()
            .and_then(|text| text.split_once(char::is_whitespace))
            .map(|(_, rest)| rest.trim())
            .unwrap_or("");

        info!("Search command received in chat {}: '{}'", chat_id, query);

        if query.is_empty() {
            start_search(bot, chat_id, dialogue, services).await
        } else {
            run_search(bot, chat_id, query, services).await
        }
    }
}

fn search_presenter(
    bot: Bot,
    chat_id: ChatId,
    services: &ServiceContainer,
) -> SearchPresenterImpl<SearchInteractorImpl, TelegramSearchView> {
    let interactor = Arc::new(SearchInteractorImpl::new(
        services.coin_service(),
        services.favorite_store(chat_id.0),
    ));
    let view = Arc::new(TelegramSearchView::new(bot, chat_id));

    SearchPresenterImpl::new(interactor, view)
}

// Ask for a query and wait for the next text message
pub async fn start_search(
    bot: Bot,
    chat_id: ChatId,
    dialogue: Option<MyDialogue>,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    if let Some(dialogue) = dialogue {
        dialogue.update(State::AwaitingSearchQuery).await?;
    }

    search_presenter(bot, chat_id, &services)
        .prompt_for_query()
        .await
}

pub async fn run_search(
    bot: Bot,
    chat_id: ChatId,
    query: &str,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    search_presenter(bot, chat_id, &services)
        .search(query)
        .await
}

// Handler for the query text after /search or the search button
pub async fn receive_search_query(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let chat_id = msg.chat.id;

    // Reset dialogue state
    dialogue.update(State::Start).await?;

    match msg.text() {
        Some(query) => run_search(bot, chat_id, query, services).await?,
        None => {
            bot.send_message(chat_id, "검색어를 텍스트로 입력해 주세요.")
                .await?;
        }
    }

    Ok(())
}
