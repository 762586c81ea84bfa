//! # Localization Tests
//!
//! Message retrieval and formatting, including fallbacks.

use garden_assistant::localization::{t, t_args, LocalizationManager};
use std::collections::HashMap;

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_localization() -> LocalizationManager {
        LocalizationManager::new().expect("Failed to create localization manager")
    }

    #[test]
    fn test_get_message_existing_key() {
        let manager = setup_localization();

        let message = manager.get_message("season-not-found", None);
        assert_eq!(message, "Советы для этого сезона отсутствуют.");
    }

    #[test]
    fn test_get_message_nonexistent_key() {
        let manager = setup_localization();

        let message = manager.get_message("nonexistent-key", None);
        assert!(message.starts_with("Missing translation:"));
    }

    #[test]
    fn test_get_message_with_args() {
        let manager = setup_localization();

        let mut args = HashMap::new();
        args.insert("page", "2");
        args.insert("total", "4");

        let message = manager.get_message("plants-page-title", Some(&args));
        assert_eq!(
            message,
            "🌿 Рекомендации по садовой культуре (страница 2/4). Выберите растение:"
        );
    }

    #[test]
    fn test_get_message_missing_args() {
        let manager = setup_localization();

        // Missing arguments are reported by Fluent but still produce text
        let message = manager.get_message("weather-title", None);
        assert!(message.starts_with("🌦 Погода в"));
    }

    #[test]
    fn test_help_lines_use_html_bold() {
        let manager = setup_localization();

        let message = manager.get_message("help-title", None);
        assert_eq!(message, "🛠 <b>Доступные команды и функции:</b>");
    }

    #[test]
    fn test_convenience_functions() {
        garden_assistant::localization::init_localization()
            .expect("Failed to initialize localization");

        let message = t("weather-not-configured");
        assert_eq!(message, "Функция погоды не настроена администратором.");

        let message = t_args("pest-tips-title", &[("pest", "Тля")]);
        assert_eq!(message, "🐛 Борьба с вредителем «Тля»:");
    }
}
