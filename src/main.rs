use anyhow::{Context, Result};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use garden_assistant::bot::{schema, Command};
use garden_assistant::catalog::KnowledgeStore;
use garden_assistant::config::{BotConfig, LogFormat, BOT_TOKEN_VAR};
use garden_assistant::localization::init_localization;
use garden_assistant::router::Router;
use garden_assistant::weather::OpenWeatherClient;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = BotConfig::from_env();
    init_tracing(config.log_format);

    info!("Starting Garden Assistant Telegram Bot");

    init_localization().context("Failed to load localization resources")?;

    let store = match &config.catalog_path {
        Some(path) => {
            info!(path = %path.display(), "Loading catalog seed from file");
            KnowledgeStore::from_path(path)?
        }
        None => KnowledgeStore::embedded().context("Embedded catalog seed is invalid")?,
    };

    let weather = match &config.weather_api_key {
        Some(api_key) => Some(
            OpenWeatherClient::new(api_key.clone(), config.weather_api_url.clone())
                .context("Failed to build weather client")?,
        ),
        None => {
            warn!("WEATHER_API_KEY is not set, /weather is disabled");
            None
        }
    };

    let router = Arc::new(Router::new(Arc::new(store), weather));

    let bot_token = config
        .bot_token
        .clone()
        .with_context(|| format!("{BOT_TOKEN_VAR} must be set"))?;
    let bot = Bot::new(bot_token);

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    info!("Bot initialized, starting dispatcher");

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![router])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
