//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::debug;

use crate::router::Interaction;

use super::commands::Command;
use super::reply_sender::{deliver_or_apologize, ReplyTarget};
use super::{route_guarded, AppRouter};

/// Handle /start, /help and /weather
pub async fn command_handler(
    bot: Bot,
    msg: Message,
    command: Command,
    router: Arc<AppRouter>,
) -> Result<()> {
    debug!(user_id = %msg.chat.id, command = ?command, "Received command from user");

    let first_name = msg
        .from
        .as_ref()
        .map(|user| user.first_name.clone())
        .unwrap_or_default();

    let reply = route_guarded(
        &router,
        Interaction::Command {
            command,
            first_name,
        },
    )
    .await;
    deliver_or_apologize(&bot, ReplyTarget::Chat(msg.chat.id), reply).await;

    Ok(())
}

/// Handle free text; any other message kind gets the "no match" answer
pub async fn message_handler(bot: Bot, msg: Message, router: Arc<AppRouter>) -> Result<()> {
    let body = match msg.text() {
        Some(text) => {
            debug!(user_id = %msg.chat.id, message_length = text.len(), "Received text message from user");
            text.to_string()
        }
        None => {
            debug!(user_id = %msg.chat.id, "Received unsupported message type from user");
            String::new()
        }
    };

    let reply = route_guarded(&router, Interaction::Text(body)).await;
    deliver_or_apologize(&bot, ReplyTarget::Chat(msg.chat.id), reply).await;

    Ok(())
}
