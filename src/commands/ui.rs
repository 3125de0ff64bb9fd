use log::warn;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Telegram rejects callback data longer than this many bytes
pub const MAX_CALLBACK_DATA_LEN: usize = 64;

pub fn navigation_row() -> Vec<InlineKeyboardButton> {
    vec![
        InlineKeyboardButton::callback("🔥 인기", "trending"),
        InlineKeyboardButton::callback("⭐ 즐겨찾기", "favorites"),
        InlineKeyboardButton::callback("🔍 검색", "search"),
    ]
}

pub fn main_menu_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        navigation_row(),
        vec![InlineKeyboardButton::callback("도움말", "help")],
    ])
}

// Button carrying `{prefix}{coin_id}`; None when that would not fit in callback data
pub fn coin_button(
    text: impl Into<String>,
    prefix: &str,
    coin_id: &str,
) -> Option<InlineKeyboardButton> {
    let data = format!("{}{}", prefix, coin_id);
    if data.len() > MAX_CALLBACK_DATA_LEN {
        warn!("Skipping button for {}: callback data too long", coin_id);
        return None;
    }

    Some(InlineKeyboardButton::callback(text, data))
}

#[cfg(test)]
pub(crate) fn callback_data(keyboard: &InlineKeyboardMarkup) -> Vec<String> {
    use teloxide::types::InlineKeyboardButtonKind;

    keyboard
        .inline_keyboard
        .iter()
        .flatten()
        .filter_map(|button| match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
            _ => None,
        })
        .collect()
}
