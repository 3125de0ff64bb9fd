use anyhow::Result;
use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
    utils::html,
    Bot,
};

use crate::commands::ui::{coin_button, navigation_row};
use crate::entity::Trending;
use crate::utils::format_percentage;

#[async_trait]
pub trait TrendingView: Send + Sync {
    async fn display_trending(&self, trending: &Trending) -> Result<()>;
    async fn display_error(&self, error_message: String) -> Result<()>;
}

pub fn render_trending(trending: &Trending) -> String {
    let mut text = String::from("<b>🔥 인기 검색어</b>\n");

    if trending.coins.is_empty() {
        text.push_str("\n지금은 인기 코인 정보가 없습니다.\n");
    }

    if !trending.nfts.is_empty() {
        text.push_str("\n<b>인기 NFT</b>\n");
        for (rank, nft) in trending.nfts.iter().enumerate() {
            text.push_str(&format!(
                "{}. {} · {} ({}%)\n",
                rank + 1,
                html::escape(&nft.name),
                html::escape(&nft.floor_price),
                html::escape(&nft.floor_price_change_24h),
            ));
        }
    }

    text
}

pub fn trending_keyboard(trending: &Trending) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = trending
        .coins
        .iter()
        .enumerate()
        .filter_map(|(rank, coin)| {
            coin_button(
                format!(
                    "{}. {} {} {}",
                    rank + 1,
                    coin.symbol.to_uppercase(),
                    coin.name,
                    format_percentage(Some(coin.price_change_percentage_24h))
                ),
                "coin_",
                &coin.id,
            )
            .map(|button| vec![button])
        })
        .collect();

    rows.push(navigation_row());
    InlineKeyboardMarkup::new(rows)
}

pub struct TelegramTrendingView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramTrendingView {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl TrendingView for TelegramTrendingView {
    async fn display_trending(&self, trending: &Trending) -> Result<()> {
        self.bot
            .send_message(self.chat_id, render_trending(trending))
            .parse_mode(ParseMode::Html)
            .reply_markup(trending_keyboard(trending))
            .await?;

        Ok(())
    }

    async fn display_error(&self, error_message: String) -> Result<()> {
        let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
            "다시 시도",
            "trending",
        )]]);

        self.bot
            .send_message(
                self.chat_id,
                format!("❌ 인기 코인을 불러오지 못했습니다: {}", error_message),
            )
            .reply_markup(keyboard)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ui::{callback_data, MAX_CALLBACK_DATA_LEN};
    use crate::entity::{TrendingCoin, TrendingNft};

    fn trending() -> Trending {
        Trending {
            coins: vec![TrendingCoin {
                id: "pepe".to_string(),
                symbol: "pepe".to_string(),
                name: "Pepe".to_string(),
                thumb: String::new(),
                score: 0,
                price_change_percentage_24h: 12.5,
            }],
            nfts: vec![TrendingNft {
                id: "pudgy".to_string(),
                name: "Pudgy Penguins".to_string(),
                thumb: String::new(),
                floor_price: "10.5 ETH".to_string(),
                floor_price_change_24h: "-2.1".to_string(),
            }],
        }
    }

    #[test]
    fn coins_become_buttons() {
        let keyboard = trending_keyboard(&trending());

        assert_eq!(keyboard.inline_keyboard[0][0].text, "1. PEPE Pepe +12.50%");
        assert_eq!(keyboard.inline_keyboard.len(), 2);
    }

    #[test]
    fn coins_with_oversized_ids_are_skipped() {
        let mut trending = trending();
        let mut long = trending.coins[0].clone();
        long.id = "x".repeat(80);
        trending.coins.push(long);

        let keyboard = trending_keyboard(&trending);

        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert!(callback_data(&keyboard)
            .iter()
            .all(|data| data.len() <= MAX_CALLBACK_DATA_LEN));
    }

    #[test]
    fn nfts_are_listed_in_text() {
        let text = render_trending(&trending());
        assert!(text.contains("1. Pudgy Penguins · 10.5 ETH (-2.1%)"));
    }
}
