use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::{prelude::*, types::ParseMode};

use super::trending::show_trending;
use super::{ui, CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;

pub struct StartCommand;

impl CommandHandler for StartCommand {
    fn command_name() -> &'static str {
        "start"
    }

    fn description() -> &'static str {
        "start the bot"
    }

    async fn execute(
        bot: Bot,
        _msg: Message,
        chat_id: ChatId,
        dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Start command received in chat {}", chat_id);

        if let Some(dialogue) = dialogue {
            dialogue.update(State::Start).await?;
        }

        bot.send_message(
            chat_id,
            "<b>Crypto Collection</b>\n\n인기 코인과 시세를 확인하고 관심 있는 코인을 즐겨찾기에 모아보세요.",
        )
        .parse_mode(ParseMode::Html)
        .reply_markup(ui::main_menu_keyboard())
        .await?;

        show_trending(bot, chat_id, services).await
    }
}
