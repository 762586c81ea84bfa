//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, warn};

use crate::router::Interaction;

use super::reply_sender::{deliver_or_apologize, ReplyTarget};
use super::{route_guarded, AppRouter};

/// Handle callback queries from inline keyboards
pub async fn callback_handler(
    bot: Bot,
    q: teloxide::types::CallbackQuery,
    router: Arc<AppRouter>,
) -> Result<()> {
    debug!(user_id = %q.from.id, "Received callback query from user");

    // Answer the callback query first to remove the loading state
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        warn!(user_id = %q.from.id, error = %e, "Failed to acknowledge callback query");
    }

    let target = match &q.message {
        Some(msg) => ReplyTarget::Message {
            chat_id: msg.chat().id,
            message_id: msg.id(),
        },
        None => ReplyTarget::Chat(ChatId::from(q.from.id)),
    };

    let reply = route_guarded(&router, callback_interaction(q.data.as_deref())).await;
    deliver_or_apologize(&bot, target, reply).await;

    Ok(())
}

/// A press without data is routed as an empty token and answered as "not found"
fn callback_interaction(data: Option<&str>) -> Interaction {
    Interaction::Callback(data.unwrap_or_default().to_string())
}
