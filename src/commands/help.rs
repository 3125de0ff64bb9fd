use super::{BotCommands, CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands as _;

pub struct HelpCommand;

impl CommandHandler for HelpCommand {
    fn command_name() -> &'static str {
        "help"
    }

    fn description() -> &'static str {
        "display this help message"
    }

    async fn execute(
        bot: Bot,
        _msg: Message,
        chat_id: ChatId,
        _dialogue: Option<MyDialogue>,
        _services: Arc<ServiceContainer>,
    ) -> Result<()> {
        send_help(&bot, chat_id).await
    }
}

pub async fn send_help(bot: &Bot, chat_id: ChatId) -> Result<()> {
    bot.send_message(chat_id, BotCommands::descriptions().to_string())
        .reply_markup(super::ui::main_menu_keyboard())
        .await?;

    Ok(())
}
