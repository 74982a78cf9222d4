use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use emergency_bot::telegram::{handle_callback_query, handle_message};
use emergency_bot::{CommandDispatcher, ConversationStore};
use shared::BotConfig;
use teloxide::prelude::*;
use teloxide::types::Me;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    shared::init_tracing("emergency-bot")?;

    let config = BotConfig::from_env()?;

    shared::init_metrics(config.metrics_port)?;

    tracing::info!("Starting Emergency Numbers Bot...");
    tracing::info!("Configuration:");
    tracing::info!("  Admins: {}", config.admin_ids.len());
    tracing::info!("  Health Port: {}", config.health_port);
    tracing::info!("  Metrics Port: {}", config.metrics_port);

    let bot = Bot::new(config.token.clone());

    // The bot keeps running if the health endpoint can't bind.
    tokio::spawn(run_health_server(config.health_port));

    if let Err(e) = tokio::spawn(run_telegram_bot(bot, config)).await {
        tracing::error!("Telegram bot task failed: {}", e);
    }

    tracing::info!("Bot stopped");
    Ok(())
}

async fn run_telegram_bot(bot: Bot, config: BotConfig) {
    tracing::info!("Starting Telegram bot...");

    let me = loop {
        match bot.get_me().await {
            Ok(me) => {
                tracing::info!("Bot username: @{}", me.username());
                break me;
            }
            Err(e) => {
                tracing::warn!("Failed to get bot info (will retry): {}", e);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    };

    let dispatcher = Arc::new(CommandDispatcher::new(
        ConversationStore::new(),
        config.admin_ids,
        me.username(),
    ));

    let me_msg = me.clone();

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(
            move |bot: Bot, msg: Message, dispatcher: Arc<CommandDispatcher>| {
                let me: Me = me_msg.clone();
                async move {
                    handle_message(bot, msg, me, dispatcher)
                        .await
                        .map_err(|e| {
                            tracing::error!("Message handler error: {}", e);
                            e
                        })
                }
            },
        ))
        .branch(Update::filter_callback_query().endpoint(
            |bot: Bot, q: CallbackQuery, dispatcher: Arc<CommandDispatcher>| async move {
                handle_callback_query(bot, q, dispatcher)
                    .await
                    .map_err(|e| {
                        tracing::error!("Callback query handler error: {}", e);
                        e
                    })
            },
        ));

    tracing::info!("Bot is working...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![dispatcher])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn run_health_server(port: u16) {
    let app = Router::new().route("/health", get(health_check));

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await {
        Ok(l) => {
            tracing::info!("Health server listening on port {}", port);
            l
        }
        Err(e) => {
            tracing::error!("Failed to bind health server: {}", e);
            return;
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Health server error: {}", e);
    }
}

async fn health_check() -> &'static str {
    "OK"
}
