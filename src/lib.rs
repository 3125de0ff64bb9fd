pub mod coingecko;
pub mod commands;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod presenter;
pub mod router;
pub mod services;
pub mod utils;
pub mod view;

use std::sync::Arc;

use sqlx::PgPool;
use teloxide::{dispatching::dialogue::InMemStorage, Bot};

// Re-export commonly used items
pub use commands::{BotCommands, MyDialogue};
pub use di::ServiceContainer;
pub use entity::*;
pub use router::{Router, TelegramRouter};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wire the services, router and dialogue storage together
pub fn create_application(
    bot: Bot,
    db_pool: Option<Arc<PgPool>>,
    coingecko_config: coingecko::Config,
) -> Result<
    (
        TelegramRouter,
        Bot,
        Arc<ServiceContainer>,
        Arc<InMemStorage<State>>,
    ),
    BotError,
> {
    let coin_service = Arc::new(coingecko::CoingeckoCoinService::new(
        coingecko_config.clone(),
    )?) as Arc<dyn coingecko::CoinService + Send + Sync>;

    let services = Arc::new(ServiceContainer::new(
        db_pool,
        coin_service,
        coingecko_config,
    ));
    let router = TelegramRouter::new(services.clone());
    let storage = InMemStorage::<State>::new();

    Ok((router, bot, services, storage))
}
