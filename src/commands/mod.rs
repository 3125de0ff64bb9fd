use anyhow::Result;
use std::sync::Arc;
use teloxide::{dispatching::dialogue::InMemStorage, prelude::*};

use crate::di::ServiceContainer;
use crate::entity::State;
use teloxide::dispatching::dialogue::Dialogue;

pub mod callback;
pub mod coin;
pub mod favorites;
pub mod help;
pub mod search;
pub mod start;
pub mod trending;
pub mod ui;

pub type MyDialogue = Dialogue<State, InMemStorage<State>>;

/// Trait that defines a command handler
pub trait CommandHandler {
    /// The command name in lowercase
    fn command_name() -> &'static str;

    /// The command description for help
    fn description() -> &'static str;

    /// Execute the command
    async fn execute(
        bot: Bot,
        msg: Message,
        chat_id: ChatId,
        dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()>;
}

/// Register all command handlers in the command system
pub fn register_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            start::StartCommand::command_name(),
            start::StartCommand::description(),
        ),
        (
            trending::TrendingCommand::command_name(),
            trending::TrendingCommand::description(),
        ),
        (
            coin::CoinCommand::command_name(),
            coin::CoinCommand::description(),
        ),
        (
            favorites::FavoritesCommand::command_name(),
            favorites::FavoritesCommand::description(),
        ),
        (
            search::SearchCommand::command_name(),
            search::SearchCommand::description(),
        ),
        (
            help::HelpCommand::command_name(),
            help::HelpCommand::description(),
        ),
    ]
}

/// Bot Commands enum for teloxide command filter
#[derive(teloxide::utils::command::BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum BotCommands {
    #[command(description = "start the bot and show the main menu")]
    Start,
    #[command(description = "show trending coins")]
    Trending,
    #[command(description = "show coin details, e.g. /coin bitcoin")]
    Coin(String),
    #[command(description = "show your favorite coins")]
    Favorites,
    #[command(description = "search coins by name or symbol")]
    Search(String),
    #[command(description = "display this help message")]
    Help,
}
