//! Executes a router [`Reply`] against the Bot API

use teloxide::prelude::*;
use teloxide::types::{MessageId, ParseMode};
use teloxide::{ApiError, RequestError};
use tracing::{debug, error};

use crate::localization::t;
use crate::router::{Controls, Reply};

use super::ui_builder::{inline_keyboard, main_menu_keyboard};

/// Where a reply goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTarget {
    /// New messages only
    Chat(ChatId),
    /// Message that carried the pressed button; edits apply to it
    Message { chat_id: ChatId, message_id: MessageId },
}

impl ReplyTarget {
    pub fn chat_id(self) -> ChatId {
        match self {
            ReplyTarget::Chat(chat_id) | ReplyTarget::Message { chat_id, .. } => chat_id,
        }
    }
}

/// Send or edit according to the reply
pub async fn deliver(bot: &Bot, target: ReplyTarget, reply: Reply) -> Result<(), RequestError> {
    match (reply, target) {
        (
            Reply::Edit {
                text,
                keyboard,
                html,
            },
            ReplyTarget::Message {
                chat_id,
                message_id,
            },
        ) => {
            let mut request = bot.edit_message_text(chat_id, message_id, text);
            if let Some(layout) = keyboard {
                request = request.reply_markup(inline_keyboard(&layout));
            }
            if html {
                request = request.parse_mode(ParseMode::Html);
            }

            match request.await {
                Ok(_) => Ok(()),
                // Re-selecting the page that is already shown
                Err(RequestError::Api(ApiError::MessageNotModified)) => {
                    debug!(chat_id = %chat_id, "Message already shows the requested content");
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
        // The button's message is gone; fall back to a new message
        (
            Reply::Edit {
                text,
                keyboard,
                html,
            },
            ReplyTarget::Chat(chat_id),
        ) => {
            let controls = keyboard.map(Controls::Inline);
            send(bot, chat_id, text, controls, html).await
        }
        (
            Reply::Send {
                text,
                controls,
                html,
            },
            target,
        ) => send(bot, target.chat_id(), text, controls, html).await,
    }
}

async fn send(
    bot: &Bot,
    chat_id: ChatId,
    text: String,
    controls: Option<Controls>,
    html: bool,
) -> Result<(), RequestError> {
    let mut request = bot.send_message(chat_id, text);
    match controls {
        Some(Controls::Inline(layout)) => {
            request = request.reply_markup(inline_keyboard(&layout));
        }
        Some(Controls::MainMenu) => {
            request = request.reply_markup(main_menu_keyboard());
        }
        None => {}
    }
    if html {
        request = request.parse_mode(ParseMode::Html);
    }

    request.await?;
    Ok(())
}

/// Deliver the reply; if that fails, tell the user to retry
pub async fn deliver_or_apologize(bot: &Bot, target: ReplyTarget, reply: Reply) {
    let chat_id = target.chat_id();
    if let Err(e) = deliver(bot, target, reply).await {
        error!(chat_id = %chat_id, error = %e, "Failed to deliver reply");

        if let Err(e) = bot.send_message(chat_id, t("generic-error")).await {
            error!(chat_id = %chat_id, error = %e, "Failed to send error message");
        }
    }
}
