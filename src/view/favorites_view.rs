use anyhow::Result;
use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
    Bot,
};

use crate::commands::ui::{coin_button, navigation_row};
use crate::entity::FavoriteCoin;
use crate::utils::{format_money, format_percentage};

#[async_trait]
pub trait FavoritesView: Send + Sync {
    async fn display_favorites(&self, favorites: &[FavoriteCoin]) -> Result<()>;
    async fn display_empty_favorites(&self) -> Result<()>;
    async fn display_error(&self, error_message: String) -> Result<()>;
}

pub fn favorite_button_text(favorite: &FavoriteCoin, vs_currency: &str) -> String {
    let rank = favorite
        .record
        .market_cap_rank
        .map(|rank| format!(" #{}", rank))
        .unwrap_or_default();

    format!(
        "★ {}{} {} ({})",
        favorite.record.symbol.to_uppercase(),
        rank,
        format_money(favorite.current_price, vs_currency),
        format_percentage(favorite.price_change_percentage_24h)
    )
}

pub fn favorites_keyboard(favorites: &[FavoriteCoin], vs_currency: &str) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = favorites
        .iter()
        .filter_map(|favorite| {
            coin_button(
                favorite_button_text(favorite, vs_currency),
                "coin_",
                &favorite.record.id,
            )
            .map(|button| vec![button])
        })
        .collect();
    rows.push(navigation_row());

    InlineKeyboardMarkup::new(rows)
}

pub struct TelegramFavoritesView {
    bot: Bot,
    chat_id: ChatId,
    vs_currency: String,
}

impl TelegramFavoritesView {
    pub fn new(bot: Bot, chat_id: ChatId, vs_currency: String) -> Self {
        Self {
            bot,
            chat_id,
            vs_currency,
        }
    }
}

#[async_trait]
impl FavoritesView for TelegramFavoritesView {
    async fn display_favorites(&self, favorites: &[FavoriteCoin]) -> Result<()> {
        if favorites.is_empty() {
            return self.display_empty_favorites().await;
        }

        self.bot
            .send_message(
                self.chat_id,
                "<b>⭐ 즐겨찾기</b>\n\n코인을 선택하면 상세 정보를 볼 수 있습니다.",
            )
            .parse_mode(ParseMode::Html)
            .reply_markup(favorites_keyboard(favorites, &self.vs_currency))
            .await?;

        Ok(())
    }

    async fn display_empty_favorites(&self) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                "즐겨찾기한 코인이 없습니다. 코인 상세 화면에서 ☆ 버튼을 눌러 추가해 보세요!",
            )
            .reply_markup(InlineKeyboardMarkup::new(vec![navigation_row()]))
            .await?;

        Ok(())
    }

    async fn display_error(&self, error_message: String) -> Result<()> {
        let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
            "다시 시도",
            "favorites",
        )]]);

        self.bot
            .send_message(
                self.chat_id,
                format!("❌ 즐겨찾기를 불러오지 못했습니다: {}", error_message),
            )
            .reply_markup(keyboard)
            .await?;

        Ok(())
    }
}
