use anyhow::Result;
use async_trait::async_trait;
use log::warn;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode},
    utils::html,
    Bot,
};

use crate::entity::{DetailHeader, DetailSection, FavoriteToggle};

#[async_trait]
pub trait DetailView: Send + Sync {
    async fn display_loading(&self, coin_id: &str) -> Result<()>;
    async fn display_detail(
        &self,
        header: &DetailHeader,
        sections: &[DetailSection],
        is_favorite: bool,
    ) -> Result<()>;
    async fn display_favorite_result(
        &self,
        coin_id: &str,
        symbol: &str,
        result: &FavoriteToggle,
    ) -> Result<()>;
    /// The favorite state could not be read; the detail was rendered as not favorited
    async fn display_favorite_state_error(
        &self,
        coin_id: &str,
        error_message: String,
    ) -> Result<()>;
    async fn display_error(&self, coin_id: &str, error_message: String) -> Result<()>;
    async fn navigate_back(&self) -> Result<()>;
    /// Drop a loading placeholder whose load was superseded
    async fn dismiss(&self) -> Result<()>;
}

pub fn detail_keyboard(coin_id: &str, is_favorite: bool) -> InlineKeyboardMarkup {
    let star = if is_favorite { "★" } else { "☆" };

    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("←", "back"),
        InlineKeyboardButton::callback(star, format!("fav_{}", coin_id)),
    ]])
}

pub fn loading_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback("←", "back")]])
}

pub fn error_keyboard(coin_id: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("다시 시도", format!("retry_{}", coin_id)),
        InlineKeyboardButton::callback("←", "back"),
    ]])
}

pub fn render_detail(header: &DetailHeader, sections: &[DetailSection]) -> String {
    let trend = if header.is_rising { "▲" } else { "▼" };
    let mut text = format!(
        "<b>{}</b> {}\n<b>{}</b>\n{} {}\n",
        html::escape(&header.symbol),
        html::escape(&header.name),
        header.price,
        trend,
        header.change,
    );

    if !header.chart.is_empty() {
        text.push_str(&format!("<code>{}</code>\n", header.chart));
    }
    if let Some(updated_at) = &header.updated_at {
        text.push_str(&format!("<i>{}</i>\n", updated_at));
    }

    for section in sections {
        text.push_str(&format!("\n<b>{}</b>\n", section.title));
        for item in &section.items {
            match &item.date {
                Some(date) => text.push_str(&format!(
                    "• {}: {} <i>({})</i>\n",
                    item.title, item.money, date
                )),
                None => text.push_str(&format!("• {}: {}\n", item.title, item.money)),
            }
        }
    }

    text
}

pub fn favorite_toast(symbol: &str, result: &FavoriteToggle) -> String {
    match result {
        FavoriteToggle::Added => format!("⭐ {} 즐겨찾기에 추가되었습니다", symbol),
        FavoriteToggle::Removed => format!("{} 즐겨찾기에서 삭제되었습니다", symbol),
        FavoriteToggle::Failed(reason) => format!("❌ 즐겨찾기 저장에 실패했습니다: {}", reason),
    }
}

/// Detail screen bound to one chat message; the message is created on first render
pub struct TelegramDetailView {
    bot: Bot,
    chat_id: ChatId,
    message_id: Mutex<Option<MessageId>>,
    // Set once this view sent its own message rather than editing an existing one
    owns_message: AtomicBool,
}

impl TelegramDetailView {
    pub fn new(bot: Bot, chat_id: ChatId, message_id: Option<MessageId>) -> Self {
        Self {
            bot,
            chat_id,
            message_id: Mutex::new(message_id),
            owns_message: AtomicBool::new(false),
        }
    }

    fn message_id(&self) -> Option<MessageId> {
        *self
            .message_id
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_message_id(&self, id: MessageId) {
        *self
            .message_id
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(id);
    }

    async fn render(&self, text: String, keyboard: InlineKeyboardMarkup) -> Result<()> {
        if let Some(message_id) = self.message_id() {
            let edited = self
                .bot
                .edit_message_text(self.chat_id, message_id, text.clone())
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboard.clone())
                .await;

            match edited {
                Ok(_) => return Ok(()),
                Err(e) => warn!("Failed to edit detail message, sending a new one: {}", e),
            }
        }

        let message = self
            .bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard)
            .await?;
        self.set_message_id(message.id);
        self.owns_message.store(true, Ordering::SeqCst);

        Ok(())
    }
}

#[async_trait]
impl DetailView for TelegramDetailView {
    async fn display_loading(&self, coin_id: &str) -> Result<()> {
        self.render(
            format!("{} 불러오는 중...", html::escape(coin_id)),
            loading_keyboard(),
        )
        .await
    }

    async fn display_detail(
        &self,
        header: &DetailHeader,
        sections: &[DetailSection],
        is_favorite: bool,
    ) -> Result<()> {
        self.render(
            render_detail(header, sections),
            detail_keyboard(&header.coin_id, is_favorite),
        )
        .await
    }

    async fn display_favorite_result(
        &self,
        coin_id: &str,
        symbol: &str,
        result: &FavoriteToggle,
    ) -> Result<()> {
        if let Some(message_id) = self.message_id() {
            let is_favorite = matches!(result, FavoriteToggle::Added);
            if !matches!(result, FavoriteToggle::Failed(_)) {
                if let Err(e) = self
                    .bot
                    .edit_message_reply_markup(self.chat_id, message_id)
                    .reply_markup(detail_keyboard(coin_id, is_favorite))
                    .await
                {
                    warn!("Failed to update favorite button: {}", e);
                }
            }
        }

        self.bot
            .send_message(self.chat_id, favorite_toast(symbol, result))
            .await?;

        Ok(())
    }

    async fn display_favorite_state_error(
        &self,
        coin_id: &str,
        error_message: String,
    ) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                format!(
                    "⚠️ {} 즐겨찾기 상태를 확인하지 못했습니다: {}",
                    coin_id, error_message
                ),
            )
            .await?;

        Ok(())
    }

    async fn display_error(&self, coin_id: &str, error_message: String) -> Result<()> {
        self.render(
            format!(
                "❌ {} 정보를 불러오지 못했습니다\n{}",
                html::escape(coin_id),
                html::escape(&error_message)
            ),
            error_keyboard(coin_id),
        )
        .await
    }

    async fn navigate_back(&self) -> Result<()> {
        if let Some(message_id) = self.message_id() {
            self.bot.delete_message(self.chat_id, message_id).await?;
        }

        Ok(())
    }

    async fn dismiss(&self) -> Result<()> {
        if !self.owns_message.load(Ordering::SeqCst) {
            return Ok(());
        }

        if let Some(message_id) = self.message_id() {
            if let Err(e) = self.bot.delete_message(self.chat_id, message_id).await {
                warn!("Failed to delete superseded placeholder: {}", e);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ui::{callback_data, MAX_CALLBACK_DATA_LEN};
    use crate::interactor::detail_interactor::{build_detail_header, build_detail_sections};
    use crate::interactor::fakes::sample_coin;
    use crate::utils::normalize_coin_id;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn renders_header_and_both_sections() {
        let coin = sample_coin("bitcoin");
        let text = render_detail(
            &build_detail_header(&coin, "krw"),
            &build_detail_sections(&coin, "krw"),
        );

        assert!(text.contains("₩65,000"));
        assert!(text.contains("▼ -1.25%"));
        assert!(text.contains("• 24시간 고가: ₩66,000\n"));
        assert!(text.contains("• 24시간 저가: ₩64,000\n"));
        assert!(text.contains("(24년 3월 14일)"));
        assert!(text.find("종목정보").unwrap() < text.find("투자지표").unwrap());
    }

    #[test]
    fn escapes_coin_names() {
        let mut header = build_detail_header(&sample_coin("bitcoin"), "krw");
        header.name = "<Fake & Co>".to_string();

        assert!(render_detail(&header, &[]).contains("&lt;Fake &amp; Co&gt;"));
    }

    #[test]
    fn keyboard_reflects_favorite_state() {
        let keyboard = detail_keyboard("bitcoin", true);
        let row = &keyboard.inline_keyboard[0];

        assert_eq!(row[0].text, "←");
        assert_eq!(row[1].text, "★");
        assert!(matches!(
            &row[1].kind,
            InlineKeyboardButtonKind::CallbackData(data) if data == "fav_bitcoin"
        ));
        assert_eq!(detail_keyboard("bitcoin", false).inline_keyboard[0][1].text, "☆");
    }

    #[test]
    fn keyboards_fit_callback_limit_for_longest_id() {
        let coin_id = normalize_coin_id(&"a".repeat(58)).unwrap();

        for keyboard in [
            detail_keyboard(&coin_id, false),
            error_keyboard(&coin_id),
            loading_keyboard(),
        ] {
            assert!(callback_data(&keyboard)
                .iter()
                .all(|data| data.len() <= MAX_CALLBACK_DATA_LEN));
        }
        assert!(normalize_coin_id(&"a".repeat(100)).is_none());
    }

    #[test]
    fn toasts_cover_every_outcome() {
        assert!(favorite_toast("BTC", &FavoriteToggle::Added).contains("추가"));
        assert!(favorite_toast("BTC", &FavoriteToggle::Removed).contains("삭제"));
        assert!(favorite_toast("BTC", &FavoriteToggle::Failed("disk".into())).contains("disk"));
    }
}
