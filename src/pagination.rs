//! # Paginator
//!
//! Splits the plant menu into fixed-size pages. Pages are never stored: every
//! navigation press recomputes the requested page from the full menu.

use crate::action::{CallbackCommand, MenuItem};
use crate::localization::t_args;

/// Items shown per page
pub const PAGE_SIZE: usize = 5;

/// Rows of buttons, top to bottom
pub type ButtonLayout = Vec<Vec<MenuItem>>;

/// One rendered page of a menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Zero-based index of the page actually shown
    pub index: usize,
    pub page_count: usize,
    pub text: String,
    pub keyboard: ButtonLayout,
}

/// Number of pages needed for `len` items
pub fn page_count(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// Render a page; indices past the end show the last page
pub fn render_page(catalog: &[MenuItem], page_index: usize) -> PageView {
    let count = page_count(catalog.len());
    let index = page_index.min(count.saturating_sub(1));

    let start = index * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(catalog.len());
    let mut keyboard: ButtonLayout = catalog[start..end]
        .iter()
        .map(|item| vec![item.clone()])
        .collect();

    if count > 1 {
        keyboard.push(navigation_row(count, index));
    }

    let text = t_args(
        "plants-page-title",
        &[
            ("page", &(index + 1).to_string()),
            ("total", &count.max(1).to_string()),
        ],
    );

    PageView {
        index,
        page_count: count,
        text,
        keyboard,
    }
}

fn navigation_row(count: usize, current: usize) -> Vec<MenuItem> {
    (0..count)
        .map(|i| {
            let label = if i == current {
                format!("· {} ·", i + 1)
            } else {
                (i + 1).to_string()
            };
            MenuItem::new(label, &CallbackCommand::PagePlants(i))
        })
        .collect()
}
