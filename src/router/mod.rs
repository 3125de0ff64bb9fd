use async_trait::async_trait;
use std::sync::Arc;
use teloxide::{
    dispatching::dialogue::InMemStorage, dispatching::UpdateHandler, prelude::*,
};

use crate::commands::{
    self, callback::handle_callback, BotCommands, CommandHandler, MyDialogue,
};
use crate::di::ServiceContainer;
use crate::entity::State;

// Base router trait
#[async_trait]
pub trait Router: Send + Sync {
    fn setup_handlers(&self) -> UpdateHandler<anyhow::Error>;
}

// Command router implementation
pub struct TelegramRouter {
    services: Arc<ServiceContainer>,
}

impl TelegramRouter {
    pub fn new(services: Arc<ServiceContainer>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Router for TelegramRouter {
    fn setup_handlers(&self) -> UpdateHandler<anyhow::Error> {
        use dptree::case;
        use teloxide::dispatching::UpdateFilterExt;

        let services_for_commands = self.services.clone();
        let services_for_search = self.services.clone();
        let services_for_callbacks = self.services.clone();

        let command_handler = teloxide::filter_command::<BotCommands, _>().endpoint(
            move |bot: Bot, msg: Message, cmd: BotCommands, dialogue: MyDialogue| {
                let services = services_for_commands.clone();
                let chat_id = msg.chat.id;
                async move {
                    let dialogue = Some(dialogue);
                    match cmd {
                        BotCommands::Start => {
                            commands::start::StartCommand::execute(
                                bot, msg, chat_id, dialogue, services,
                            )
                            .await
                        }
                        BotCommands::Trending => {
                            commands::trending::TrendingCommand::execute(
                                bot, msg, chat_id, dialogue, services,
                            )
                            .await
                        }
                        BotCommands::Coin(_) => {
                            commands::coin::CoinCommand::execute(
                                bot, msg, chat_id, dialogue, services,
                            )
                            .await
                        }
                        BotCommands::Favorites => {
                            commands::favorites::FavoritesCommand::execute(
                                bot, msg, chat_id, dialogue, services,
                            )
                            .await
                        }
                        BotCommands::Search(_) => {
                            commands::search::SearchCommand::execute(
                                bot, msg, chat_id, dialogue, services,
                            )
                            .await
                        }
                        BotCommands::Help => {
                            commands::help::HelpCommand::execute(
                                bot, msg, chat_id, dialogue, services,
                            )
                            .await
                        }
                    }
                }
            },
        );

        let message_handler = Update::filter_message().branch(command_handler).branch(
            case![State::AwaitingSearchQuery].endpoint(
                move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                    let services = services_for_search.clone();
                    async move {
                        commands::search::receive_search_query(bot, msg, dialogue, services).await
                    }
                },
            ),
        );

        // Add callback query handler for our buttons
        let callback_handler = Update::filter_callback_query().endpoint(
            move |bot: Bot, q: CallbackQuery, dialogue: MyDialogue| {
                let services = services_for_callbacks.clone();
                async move { handle_callback(bot, q, dialogue, services).await }
            },
        );

        teloxide::dispatching::dialogue::enter::<Update, InMemStorage<State>, State, _>()
            .branch(message_handler)
            .branch(callback_handler)
    }
}
