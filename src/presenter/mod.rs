pub mod detail_presenter;
pub mod favorites_presenter;
pub mod search_presenter;
pub mod trending_presenter;
