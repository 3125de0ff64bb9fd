pub mod db;
pub mod detail_interactor;
pub mod favorite_store;
pub mod favorites_interactor;
pub mod search_interactor;
pub mod trending_interactor;

#[cfg(test)]
pub(crate) mod fakes;
