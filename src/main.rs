//! Crypto Collection Bot for Telegram - Main executable
//!
//! Entry point of the bot that shows trending coins, coin details with a
//! price chart, and lets users keep a list of favorite coins.
use anyhow::Context;
use crypto_collection_bot::{coingecko, commands, create_application, Router};
use dotenv::dotenv;
use log::{info, warn};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::sync::Arc;
use teloxide::{dptree, prelude::*, types::BotCommand, Bot};

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!(
        "Starting Crypto Collection Telegram Bot v{}",
        crypto_collection_bot::VERSION
    );

    // Load and validate environment variables
    let bot_token = env::var("TELEGRAM_BOT_TOKEN")
        .context("TELEGRAM_BOT_TOKEN must be set in environment variables")?;

    let coingecko_config = coingecko::Config::from_env();
    info!(
        "Using CoinGecko at {} (quote currency: {})",
        coingecko_config.api_url, coingecko_config.vs_currency
    );

    // Setup database connection pool, favorites stay in memory without one
    let db_pool = match env::var("DATABASE_URL") {
        Ok(database_url) => {
            info!("Connecting to database...");
            let db_pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(&database_url)
                .await
                .context("Failed to create database connection pool")?;

            info!("Running database migrations...");
            sqlx::migrate!("./migrations")
                .run(&db_pool)
                .await
                .context("Failed to run database migrations")?;
            info!("Migrations completed successfully");

            Some(Arc::new(db_pool))
        }
        Err(_) => {
            warn!("DATABASE_URL is not set, favorites will be kept in memory only");
            None
        }
    };

    // Create Telegram bot instance
    let bot = Bot::new(bot_token);

    info!("Initializing bot application...");
    let (router, bot, service_container, storage) =
        create_application(bot, db_pool, coingecko_config)
            .context("Failed to initialize application")?;

    let bot_commands: Vec<BotCommand> = commands::register_commands()
        .into_iter()
        .map(|(name, description)| BotCommand::new(name, description))
        .collect();
    if let Err(e) = bot.set_my_commands(bot_commands).await {
        warn!("Failed to register bot commands: {}", e);
    }

    // Get the handler from the router
    let handler = router.setup_handlers();

    // Build dispatcher with dependency injections and control-C handling
    let mut dispatcher = teloxide::dispatching::Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![service_container, storage])
        .enable_ctrlc_handler()
        .build();

    info!("Bot is running! Press Ctrl+C to stop.");
    dispatcher.dispatch().await;

    Ok(())
}
