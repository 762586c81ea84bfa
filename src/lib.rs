//! # Garden Assistant Telegram Bot
//!
//! A menu-driven Telegram bot for gardeners: plant care cards, pest control,
//! seasonal tips and current weather. Navigation state travels inside the
//! callback data of inline buttons, so the bot keeps no per-user sessions.

pub mod action;
pub mod bot;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod localization;
pub mod pagination;
pub mod render;
pub mod router;
pub mod weather;
