use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use shared::errors::{Result, ServiceError};
use shared::{record_counter, record_timing};
use teloxide::{
    prelude::*,
    types::{CallbackQuery, Me, Message, MessageEntityKind, ReplyMarkup},
    utils::command::BotCommands,
};

use crate::dispatcher::CommandDispatcher;
use crate::events::{Inbound, Outbound, Sender};
use crate::telegram::Command;

fn map_teloxide_err<E: std::fmt::Display>(e: E) -> ServiceError {
    ServiceError::Telegram(e.to_string())
}

/// Turns a message into a dispatcher event. Unknown commands, messages
/// without a sender and non-text, non-contact content yield `None`.
///
/// A message is a command only when Telegram tagged a `bot_command` entity at
/// offset 0. Anything after the command token (e.g. a `/start` deep-link
/// payload) is ignored.
pub fn inbound_from_message(msg: &Message, bot_username: &str) -> Option<Inbound> {
    let sender = Sender::from(msg.from.as_ref()?);

    if let Some(contact) = msg.contact() {
        return Some(Inbound::Contact {
            sender,
            phone_number: contact.phone_number.clone(),
        });
    }

    let text = msg.text()?;
    if starts_with_bot_command(msg) {
        let token = text.split_whitespace().next().unwrap_or(text);
        return match Command::parse(token, bot_username) {
            Ok(command) => Some(Inbound::Command { sender, command }),
            Err(_) => None,
        };
    }

    Some(Inbound::Text {
        sender,
        text: text.to_string(),
    })
}

fn starts_with_bot_command(msg: &Message) -> bool {
    msg.entities().is_some_and(|entities| {
        entities
            .iter()
            .any(|e| e.offset == 0 && matches!(e.kind, MessageEntityKind::BotCommand))
    })
}

pub async fn handle_message(
    bot: Bot,
    msg: Message,
    me: Me,
    dispatcher: Arc<CommandDispatcher>,
) -> Result<()> {
    let start_time = Instant::now();

    let Some(event) = inbound_from_message(&msg, me.username()) else {
        return Ok(());
    };

    let actions = dispatcher.dispatch(event).await?;
    execute(&bot, msg.chat.id, actions).await?;

    record_timing("bot_update_duration_seconds", start_time.elapsed().as_secs_f64());
    Ok(())
}

pub async fn handle_callback_query(
    bot: Bot,
    q: CallbackQuery,
    dispatcher: Arc<CommandDispatcher>,
) -> Result<()> {
    let start_time = Instant::now();

    bot.answer_callback_query(q.id.clone())
        .await
        .map_err(map_teloxide_err)?;

    let Some(data) = q.data.clone() else {
        return Ok(());
    };

    let chat_id = q
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or_else(|| ChatId::from(q.from.id));

    let actions = dispatcher
        .dispatch(Inbound::Callback {
            sender: Sender::from(&q.from),
            data,
        })
        .await?;
    execute(&bot, chat_id, actions).await?;

    record_timing("bot_update_duration_seconds", start_time.elapsed().as_secs_f64());
    Ok(())
}

/// Runs the actions in order. Consecutive notifications go out concurrently
/// and a failed one is logged without stopping the rest; a failed reply
/// aborts the update.
pub async fn execute(bot: &Bot, origin: ChatId, actions: Vec<Outbound>) -> Result<()> {
    let mut pending = Vec::new();

    for action in actions {
        match action {
            Outbound::Notify {
                chat_id,
                text,
                markup,
            } => pending.push((chat_id, text, markup)),
            Outbound::Reply { text, markup } => {
                fan_out(bot, std::mem::take(&mut pending)).await;
                send(bot, origin, text, markup)
                    .await
                    .map_err(map_teloxide_err)?;
            }
            Outbound::RegisterCommands => {
                fan_out(bot, std::mem::take(&mut pending)).await;
                if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
                    tracing::warn!("Failed to register bot commands: {}", e);
                }
            }
        }
    }

    fan_out(bot, pending).await;
    Ok(())
}

async fn fan_out(bot: &Bot, notifications: Vec<(ChatId, String, Option<ReplyMarkup>)>) {
    if notifications.is_empty() {
        return;
    }

    let deliveries = notifications.into_iter().map(|(chat_id, text, markup)| async move {
        if let Err(e) = send(bot, chat_id, text, markup).await {
            tracing::error!(chat_id = chat_id.0, "Failed to deliver notification: {}", e);
            record_counter("bot_fanout_failures_total", 1);
        }
    });

    join_all(deliveries).await;
}

async fn send(
    bot: &Bot,
    chat_id: ChatId,
    text: String,
    markup: Option<ReplyMarkup>,
) -> std::result::Result<(), teloxide::RequestError> {
    let request = bot.send_message(chat_id, text);
    match markup {
        Some(markup) => request.reply_markup(markup).await?,
        None => request.await?,
    };
    Ok(())
}
