#[macro_use]
extern crate log;

mod bot;
mod config;
mod error;
mod exchange;
mod helpers;
mod model;
mod portfolio;
mod request;

use std::io::Write;
use std::sync::Arc;
use anyhow::{Context, Result};
use colored::*;
use teloxide::prelude::*;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::utils::command::BotCommands;
use crate::bot::Command;
use crate::config::AppConfig;
use crate::exchange::binance::BinanceClient;
use crate::exchange::SpotExchange;


#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger with custom formatter
    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

            let level_string = match level {
                log::Level::Error => format!(" {} ", level).on_red().black().to_string(),
                log::Level::Warn => format!(" {}  ", level).on_yellow().black().to_string(),
                log::Level::Info => format!(" {}  ", level).to_string(),
                log::Level::Debug => format!(" {} ", level).to_string(),
                log::Level::Trace => format!(" {} ", level).to_string(),
            };

            writeln!(
                buf,
                "{} {}: {}",
                timestamp.to_string().dimmed(),
                level_string,
                record.args()
            )
        })
        .init();

    info!("🚀 Starting spot-balance-bot...");

    let config = AppConfig::load()?;

    // The bot still starts when the exchange is down, /binance reports the failure
    let exchange = BinanceClient::from_config(&config).context("Failed to create Binance client")?;
    match exchange.health_check().await {
        Ok(true) => info!("✅ {} reachable at {}", exchange.name(), config.binance.base_url),
        _ => warn!("{} not reachable at {}", exchange.name(), config.binance.base_url),
    }
    drop(exchange);

    let bot = Bot::new(&config.telegram.bot_token);

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register bot commands: {}", e);
    }

    if !config.telegram.allowed_user_ids.is_empty() {
        info!("/binance restricted to {} user(s)", config.telegram.allowed_user_ids.len());
    }

    info!("✅ Listening for updates (long polling)");

    Dispatcher::builder(bot, crate::bot::schema())
        .dependencies(dptree::deps![Arc::new(config)])
        .default_handler(|upd| async move {
            debug!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("👋 Bot stopped");

    Ok(())
}
