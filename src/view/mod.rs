pub mod detail_view;
pub mod favorites_view;
pub mod search_view;
pub mod trending_view;
