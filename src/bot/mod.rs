//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `commands`: slash commands understood by the bot
//! - `message_handler`: handles commands and free-text messages
//! - `callback_handler`: handles inline keyboard callback queries
//! - `reply_sender`: executes router replies as sends or edits
//! - `ui_builder`: creates Telegram keyboards

pub mod callback_handler;
pub mod commands;
pub mod message_handler;
pub mod reply_sender;
pub mod ui_builder;

use std::future::Future;
use std::sync::Arc;
use teloxide::dispatching::{HandlerExt, UpdateHandler};
use teloxide::prelude::*;
use tracing::error;

use crate::router::{Interaction, Reply, Router};
use crate::weather::{OpenWeatherClient, WeatherProvider};

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use commands::Command;
pub use message_handler::{command_handler, message_handler};

/// Router wired to the production weather client
pub type AppRouter = Router<OpenWeatherClient>;

/// Dispatcher tree: commands first, then other messages, then button presses
pub fn schema() -> UpdateHandler<anyhow::Error> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(Update::filter_message().endpoint(message_handler))
        .branch(Update::filter_callback_query().endpoint(callback_handler))
}

/// Run the router in its own task so a panic still produces the retry text
pub async fn route_guarded<W: WeatherProvider>(
    router: &Arc<Router<W>>,
    interaction: Interaction,
) -> Reply {
    let is_callback = matches!(interaction, Interaction::Callback(_));
    let router = Arc::clone(router);

    guarded::<W, _>(is_callback, async move { router.handle(&interaction).await }).await
}

async fn guarded<W, F>(is_callback: bool, task: F) -> Reply
where
    W: WeatherProvider,
    F: Future<Output = Reply> + Send + 'static,
{
    match tokio::spawn(task).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(error = %e, "Interaction handler panicked");
            Router::<W>::error_reply(is_callback)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn exploding_handler() -> Reply {
        panic!("handler blew up")
    }

    #[tokio::test]
    async fn test_panicking_callback_still_edits_with_retry_text() {
        let reply = guarded::<OpenWeatherClient, _>(true, exploding_handler()).await;

        assert_eq!(
            reply,
            Reply::edit("Произошла ошибка. Пожалуйста, попробуйте еще раз.")
        );
    }

    #[tokio::test]
    async fn test_completed_task_reply_passes_through() {
        let reply = guarded::<OpenWeatherClient, _>(false, async { Reply::send("готово") }).await;
        assert_eq!(reply, Reply::send("готово"));
    }
}
