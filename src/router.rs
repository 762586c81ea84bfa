//! # Callback Router
//!
//! Turns one inbound [`Interaction`] into exactly one [`Reply`]. The router
//! holds no per-user state: a button press carries everything needed to
//! render the next step inside its action token.
//!
//! Button presses always edit the message that carried the button. Commands
//! and free text always produce a new message.

use std::sync::Arc;
use tracing::{debug, error, info};

use crate::action::{CallbackCommand, MenuItem};
use crate::bot::commands::Command;
use crate::catalog::KnowledgeStore;
use crate::errors::{BotError, Lookup};
use crate::localization::{t, t_args};
use crate::pagination::{render_page, ButtonLayout};
use crate::render::{render_pest_tips, render_plant, render_season_tips, render_weather};
use crate::weather::{OpenWeatherClient, WeatherProvider};

/// One inbound event from the chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// Slash command; `first_name` is used by the greeting
    Command { command: Command, first_name: String },
    /// Any other text message
    Text(String),
    /// Button press carrying an action token
    Callback(String),
}

/// Keyboard attached to a new message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Controls {
    /// Inline buttons under the message
    Inline(ButtonLayout),
    /// Persistent reply keyboard with the main menu
    MainMenu,
}

/// The single outbound action for an interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Send {
        text: String,
        controls: Option<Controls>,
        html: bool,
    },
    /// Replace the text of the message the button belongs to; `None` removes the keyboard
    Edit {
        text: String,
        keyboard: Option<ButtonLayout>,
        html: bool,
    },
}

impl Reply {
    pub fn send(text: impl Into<String>) -> Self {
        Reply::Send {
            text: text.into(),
            controls: None,
            html: false,
        }
    }

    pub fn edit(text: impl Into<String>) -> Self {
        Reply::Edit {
            text: text.into(),
            keyboard: None,
            html: false,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Reply::Send { text, .. } | Reply::Edit { text, .. } => text,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, Reply::Edit { .. })
    }
}

/// Entries of the main menu keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Recommendations,
    Help,
    Weather,
    Pests,
    Calendar,
}

impl MenuAction {
    pub const ALL: [MenuAction; 5] = [
        MenuAction::Recommendations,
        MenuAction::Help,
        MenuAction::Weather,
        MenuAction::Pests,
        MenuAction::Calendar,
    ];

    /// Main menu keyboard rows
    pub const ROWS: [&'static [MenuAction]; 3] = [
        &[MenuAction::Recommendations, MenuAction::Help],
        &[MenuAction::Weather, MenuAction::Pests],
        &[MenuAction::Calendar],
    ];

    fn label_key(self) -> &'static str {
        match self {
            MenuAction::Recommendations => "menu-recommendations",
            MenuAction::Help => "menu-help",
            MenuAction::Weather => "menu-weather",
            MenuAction::Pests => "menu-pests",
            MenuAction::Calendar => "menu-calendar",
        }
    }

    /// Button label, emoji included
    pub fn label(self) -> String {
        t(self.label_key())
    }

    /// Exact match against the label or the label without its emoji.
    /// `normalized` must already be trimmed and lowercased.
    pub fn from_text(normalized: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| {
            let label = action.label().to_lowercase();
            let bare = label.split_once(' ').map(|(_, word)| word);
            normalized == label || Some(normalized) == bare
        })
    }
}

/// Labels of the main menu keyboard, row by row
pub fn main_menu_rows() -> Vec<Vec<String>> {
    MenuAction::ROWS
        .iter()
        .map(|row| row.iter().map(|action| action.label()).collect())
        .collect()
}

pub struct Router<W = OpenWeatherClient> {
    store: Arc<KnowledgeStore>,
    plant_menu: Vec<MenuItem>,
    pest_menu: Vec<MenuItem>,
    season_menu: Vec<MenuItem>,
    weather: Option<W>,
}

impl<W: WeatherProvider> Router<W> {
    /// `weather` is `None` when no API key is configured
    pub fn new(store: Arc<KnowledgeStore>, weather: Option<W>) -> Self {
        Self {
            plant_menu: store.plant_menu(),
            pest_menu: store.pest_menu(),
            season_menu: store.season_menu(),
            store,
            weather,
        }
    }

    /// Answer an interaction. Never fails: errors become user-visible texts.
    pub async fn handle(&self, interaction: &Interaction) -> Reply {
        let is_callback = matches!(interaction, Interaction::Callback(_));

        let result = match interaction {
            Interaction::Command { command, first_name } => {
                self.handle_command(command, first_name).await
            }
            Interaction::Text(body) => self.handle_text(body),
            Interaction::Callback(token) => self.handle_callback(token),
        };

        match result {
            Ok(reply) => reply,
            Err(err) => Self::recover(err, is_callback),
        }
    }

    /// Generic retry text for failures outside the router
    pub fn error_reply(is_callback: bool) -> Reply {
        Self::recover(
            BotError::Internal("interaction failed".to_string()),
            is_callback,
        )
    }

    fn recover(err: BotError, is_callback: bool) -> Reply {
        let text = match &err {
            BotError::NotFound(lookup) => {
                debug!(lookup = %lookup, "Requested record not found");
                match lookup {
                    Lookup::Plant(_) => t("plant-incomplete"),
                    Lookup::Pest(_) => t("pest-not-found"),
                    Lookup::Season(_) => t("season-not-found"),
                }
            }
            BotError::MalformedToken(token) => {
                debug!(token = %token, "Malformed action token");
                t("not-found")
            }
            BotError::Upstream(cause) => {
                error!(error = %cause, "Weather lookup failed");
                t("weather-failed")
            }
            BotError::Internal(msg) => {
                error!(error = %msg, "Failed to handle interaction");
                t("generic-error")
            }
        };

        if is_callback {
            Reply::edit(text)
        } else {
            Reply::send(text)
        }
    }

    async fn handle_command(&self, command: &Command, first_name: &str) -> Result<Reply, BotError> {
        debug!(command = ?command, "Handling command");
        match command {
            Command::Start => Ok(self.welcome(first_name)),
            Command::Help => Ok(self.help()),
            Command::Weather(city) => self.weather(city.trim()).await,
        }
    }

    fn handle_text(&self, body: &str) -> Result<Reply, BotError> {
        let normalized = body.trim().to_lowercase();

        if let Some(action) = MenuAction::from_text(&normalized) {
            debug!(action = ?action, "Menu selection");
            return Ok(self.menu(action));
        }

        if self.store.contains_plant(&normalized) {
            let record = self
                .store
                .lookup_plant(&normalized)
                .ok_or(BotError::NotFound(Lookup::Plant(normalized)))?;
            return Ok(Reply::Send {
                text: render_plant(&record),
                controls: None,
                html: true,
            });
        }

        Ok(Reply::send(t("no-match")))
    }

    fn handle_callback(&self, token: &str) -> Result<Reply, BotError> {
        let command = CallbackCommand::decode(token)?;
        debug!(command = ?command, "Decoded action token");

        match command {
            CallbackCommand::PagePlants(page) => {
                let view = render_page(&self.plant_menu, page);
                Ok(Reply::Edit {
                    text: view.text,
                    keyboard: Some(view.keyboard),
                    html: false,
                })
            }
            CallbackCommand::PlantDetail(key) => {
                let record = self
                    .store
                    .lookup_plant(&key)
                    .ok_or(BotError::NotFound(Lookup::Plant(key)))?;
                Ok(Reply::Edit {
                    text: render_plant(&record),
                    keyboard: None,
                    html: true,
                })
            }
            CallbackCommand::PestDetail(name) => {
                let tips = self
                    .store
                    .lookup_pest_tips(&name)
                    .ok_or_else(|| BotError::NotFound(Lookup::Pest(name.clone())))?;
                Ok(Reply::Edit {
                    text: render_pest_tips(&name, tips),
                    keyboard: None,
                    html: true,
                })
            }
            CallbackCommand::SeasonDetail(season) => {
                let tips = self
                    .store
                    .lookup_season_tips(&season)
                    .ok_or_else(|| BotError::NotFound(Lookup::Season(season.clone())))?;
                Ok(Reply::Edit {
                    text: render_season_tips(&season, tips),
                    keyboard: None,
                    html: true,
                })
            }
        }
    }

    fn menu(&self, action: MenuAction) -> Reply {
        match action {
            MenuAction::Help => self.help(),
            MenuAction::Recommendations => {
                let view = render_page(&self.plant_menu, 0);
                Reply::Send {
                    text: view.text,
                    controls: Some(Controls::Inline(view.keyboard)),
                    html: false,
                }
            }
            MenuAction::Pests => Reply::Send {
                text: t("pests-menu-title"),
                controls: Some(Controls::Inline(one_per_row(&self.pest_menu))),
                html: false,
            },
            MenuAction::Calendar => Reply::Send {
                text: t("seasons-menu-title"),
                controls: Some(Controls::Inline(one_per_row(&self.season_menu))),
                html: false,
            },
            MenuAction::Weather => Reply::send(t("weather-prompt")),
        }
    }

    fn welcome(&self, first_name: &str) -> Reply {
        let text = format!(
            "{}\n{}\n{}\n{}\n{}\n\n{}",
            t_args("welcome-greeting", &[("first_name", first_name)]),
            t("welcome-commands"),
            t("welcome-start"),
            t("welcome-help"),
            t("welcome-weather"),
            t("welcome-menu")
        );
        Reply::Send {
            text,
            controls: Some(Controls::MainMenu),
            html: false,
        }
    }

    fn help(&self) -> Reply {
        let text = format!(
            "{}\n\n{}\n{}\n{}\n{}",
            t("help-title"),
            t("help-recommendations"),
            t("help-weather"),
            t("help-pests"),
            t("help-calendar")
        );
        Reply::Send {
            text,
            controls: None,
            html: true,
        }
    }

    async fn weather(&self, city: &str) -> Result<Reply, BotError> {
        let Some(provider) = &self.weather else {
            return Ok(Reply::send(t("weather-not-configured")));
        };
        if city.is_empty() {
            return Ok(Reply::send(t("weather-usage")));
        }

        let report = provider.fetch_weather(city).await?;
        info!(city = city, temp_c = report.temp_c, "Weather lookup completed");
        Ok(Reply::send(render_weather(city, &report)))
    }
}

fn one_per_row(items: &[MenuItem]) -> ButtonLayout {
    items.iter().map(|item| vec![item.clone()]).collect()
}
