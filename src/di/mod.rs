mod container;

pub use container::{FavoriteBackend, ServiceContainer};
