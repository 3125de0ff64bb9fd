use anyhow::Result;
use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
    utils::html,
    Bot,
};

use crate::commands::ui::{coin_button, navigation_row};
use crate::entity::SearchResult;

#[async_trait]
pub trait SearchView: Send + Sync {
    async fn prompt_for_query(&self) -> Result<()>;
    async fn display_results(&self, query: &str, results: &[SearchResult]) -> Result<()>;
    async fn display_no_results(&self, query: &str) -> Result<()>;
    async fn display_error(&self, error_message: String) -> Result<()>;
}

pub fn result_button_text(result: &SearchResult) -> String {
    let star = if result.is_favorite { "★" } else { "☆" };
    let rank = result
        .coin
        .market_cap_rank
        .map(|rank| format!(" #{}", rank))
        .unwrap_or_default();

    format!(
        "{} {} {}{}",
        star, result.coin.symbol, result.coin.name, rank
    )
}

pub fn search_keyboard(results: &[SearchResult]) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = results
        .iter()
        .filter_map(|result| {
            coin_button(result_button_text(result), "coin_", &result.coin.id)
                .map(|button| vec![button])
        })
        .collect();
    rows.push(navigation_row());

    InlineKeyboardMarkup::new(rows)
}

pub struct TelegramSearchView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramSearchView {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl SearchView for TelegramSearchView {
    async fn prompt_for_query(&self) -> Result<()> {
        self.bot
            .send_message(self.chat_id, "검색할 코인 이름이나 심볼을 입력해 주세요:")
            .await?;

        Ok(())
    }

    async fn display_results(&self, query: &str, results: &[SearchResult]) -> Result<()> {
        if results.is_empty() {
            return self.display_no_results(query).await;
        }

        self.bot
            .send_message(
                self.chat_id,
                format!("<b>🔍 '{}' 검색 결과</b>", html::escape(query)),
            )
            .parse_mode(ParseMode::Html)
            .reply_markup(search_keyboard(results))
            .await?;

        Ok(())
    }

    async fn display_no_results(&self, query: &str) -> Result<()> {
        let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
            "다시 검색",
            "search",
        )]]);

        self.bot
            .send_message(
                self.chat_id,
                format!("'{}'에 대한 검색 결과가 없습니다.", query),
            )
            .reply_markup(keyboard)
            .await?;

        Ok(())
    }

    async fn display_error(&self, error_message: String) -> Result<()> {
        let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
            "다시 검색",
            "search",
        )]]);

        self.bot
            .send_message(self.chat_id, format!("❌ 검색에 실패했습니다: {}", error_message))
            .reply_markup(keyboard)
            .await?;

        Ok(())
    }
}
