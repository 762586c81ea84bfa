//! UI Builder module for turning button layouts into Telegram keyboards

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use crate::pagination::ButtonLayout;
use crate::router::main_menu_rows;

/// Create an inline keyboard, one callback button per menu item
pub fn inline_keyboard(layout: &ButtonLayout) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = layout
        .iter()
        .map(|row| {
            row.iter()
                .map(|item| InlineKeyboardButton::callback(item.label.clone(), item.token.clone()))
                .collect()
        })
        .collect();

    InlineKeyboardMarkup::new(rows)
}

/// Create the persistent main menu keyboard shown after /start
pub fn main_menu_keyboard() -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = main_menu_rows()
        .into_iter()
        .map(|row| row.into_iter().map(KeyboardButton::new).collect())
        .collect();

    KeyboardMarkup::new(rows).resize_keyboard()
}
