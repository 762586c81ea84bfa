//! # Action Tokens
//!
//! Buttons carry their whole navigation state inside the callback data. A token
//! is `<domain>_<payload>`; decoding turns it back into a [`CallbackCommand`].

use crate::errors::BotError;

/// Separator between the domain prefix and the payload
pub const DELIMITER: char = '_';

/// Telegram rejects callback data longer than this many bytes
pub const MAX_TOKEN_BYTES: usize = 64;

// Order matters: `plant_page_` is itself prefixed by `plant_`
const PLANT_PAGE_PREFIX: &str = "plant_page_";
const PLANT_PREFIX: &str = "plant_";
const PEST_PREFIX: &str = "pest_";
const SEASON_PREFIX: &str = "season_";

/// Decoded button press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackCommand {
    /// Show a page of the plant menu
    PagePlants(usize),
    /// Show a plant card
    PlantDetail(String),
    /// Show pest-control tips
    PestDetail(String),
    /// Show seasonal tips
    SeasonDetail(String),
}

impl CallbackCommand {
    /// Encode the command as callback data
    pub fn encode(&self) -> String {
        match self {
            CallbackCommand::PagePlants(page) => format!("{PLANT_PAGE_PREFIX}{page}"),
            CallbackCommand::PlantDetail(key) => format!("{PLANT_PREFIX}{key}"),
            CallbackCommand::PestDetail(key) => format!("{PEST_PREFIX}{key}"),
            CallbackCommand::SeasonDetail(key) => format!("{SEASON_PREFIX}{key}"),
        }
    }

    /// Decode callback data; the first matching prefix wins
    pub fn decode(token: &str) -> Result<Self, BotError> {
        let malformed = || BotError::MalformedToken(token.to_string());

        if let Some(page) = token.strip_prefix(PLANT_PAGE_PREFIX) {
            return page
                .parse::<usize>()
                .map(CallbackCommand::PagePlants)
                .map_err(|_| malformed());
        }

        let (payload, build): (&str, fn(String) -> CallbackCommand) =
            if let Some(rest) = token.strip_prefix(PLANT_PREFIX) {
                (rest, CallbackCommand::PlantDetail)
            } else if let Some(rest) = token.strip_prefix(PEST_PREFIX) {
                (rest, CallbackCommand::PestDetail)
            } else if let Some(rest) = token.strip_prefix(SEASON_PREFIX) {
                (rest, CallbackCommand::SeasonDetail)
            } else {
                return Err(malformed());
            };

        if !is_valid_payload(payload) {
            return Err(malformed());
        }
        Ok(build(payload.to_string()))
    }
}

/// A payload must be non-empty and must not contain the delimiter
pub fn is_valid_payload(payload: &str) -> bool {
    !payload.is_empty() && !payload.contains(DELIMITER)
}

/// One selectable entry of a menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub token: String,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, command: &CallbackCommand) -> Self {
        Self {
            label: label.into(),
            token: command.encode(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_token_round_trip() {
        for page in 0..10_000 {
            let token = CallbackCommand::PagePlants(page).encode();
            assert_eq!(
                CallbackCommand::decode(&token).unwrap(),
                CallbackCommand::PagePlants(page)
            );
        }
    }

    #[test]
    fn test_page_prefix_wins_over_plant_prefix() {
        assert_eq!(
            CallbackCommand::decode("plant_page_3").unwrap(),
            CallbackCommand::PagePlants(3)
        );
    }

    #[test]
    fn test_detail_tokens() {
        assert_eq!(
            CallbackCommand::decode("plant_ель").unwrap(),
            CallbackCommand::PlantDetail("ель".to_string())
        );
        assert_eq!(
            CallbackCommand::decode("pest_Паутинный клещ").unwrap(),
            CallbackCommand::PestDetail("Паутинный клещ".to_string())
        );
        assert_eq!(
            CallbackCommand::decode("season_зима").unwrap(),
            CallbackCommand::SeasonDetail("зима".to_string())
        );
    }

    #[test]
    fn test_malformed_tokens() {
        for token in [
            "plant_page_x",
            "plant_page_-1",
            "plant_page_",
            "plant_",
            "pest_a_b",
            "season_",
            "weather_Москва",
            "",
        ] {
            assert!(
                matches!(
                    CallbackCommand::decode(token),
                    Err(BotError::MalformedToken(_))
                ),
                "token {token:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_menu_item_carries_encoded_token() {
        let item = MenuItem::new("Ель", &CallbackCommand::PlantDetail("ель".to_string()));
        assert_eq!(item.token, "plant_ель");
    }
}
