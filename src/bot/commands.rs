//! Slash commands understood by the bot

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "Начать работу")]
    Start,
    #[command(description = "Помощь")]
    Help,
    #[command(description = "Узнать погоду: /weather [город]")]
    Weather(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_keeps_multi_word_city() {
        let command = Command::parse("/weather Нижний Новгород", "garden_bot").unwrap();
        assert_eq!(command, Command::Weather("Нижний Новгород".to_string()));
    }

    #[test]
    fn test_weather_without_city() {
        let command = Command::parse("/weather", "garden_bot").unwrap();
        assert_eq!(command, Command::Weather(String::new()));
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(Command::parse("/garden", "garden_bot").is_err());
    }
}
