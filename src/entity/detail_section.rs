use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailItem {
    pub title: String,
    pub value: Option<f64>,
    pub money: String,
    pub date: Option<String>,
}

/// A titled group of metrics shown under the detail header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailSection {
    pub title: String,
    pub items: Vec<DetailItem>,
}

impl DetailSection {
    pub fn item(&self, title: &str) -> Option<&DetailItem> {
        self.items.iter().find(|item| item.title == title)
    }
}

/// Display-ready header of the detail screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailHeader {
    pub coin_id: String,
    pub symbol: String,
    pub name: String,
    pub image: String,
    pub price: String,
    pub change: String,
    pub is_rising: bool,
    pub chart: String,
    pub updated_at: Option<String>,
}
