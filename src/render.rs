//! Record Renderer: turns catalog records into message text.
//!
//! Output uses Telegram HTML, where `<b>text</b>` is bold. Catalog text is
//! escaped, so seeds may contain any characters.

use teloxide::utils::html::{bold, escape};

use crate::catalog::PlantRecord;
use crate::localization::{t, t_args};
use crate::weather::{WeatherAdvice, WeatherReport};

/// Uppercase the first character and lowercase the rest
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Plant card: name, description, care, pests, diseases
pub fn render_plant(record: &PlantRecord) -> String {
    format!(
        "🌱 {}\n\n{}\n\n{}\n{}\n\n{} {}\n{} {}",
        bold(&escape(&capitalize(&record.name))),
        escape(&record.description),
        bold(&t("plant-care-header")),
        escape(&record.care),
        bold(&t("plant-pests-header")),
        escape(&record.pests),
        bold(&t("plant-diseases-header")),
        escape(&record.diseases)
    )
}

pub fn render_pest_tips(pest: &str, tips: &[String]) -> String {
    format!(
        "{}\n\n{}",
        bold(&t_args("pest-tips-title", &[("pest", &escape(pest))])),
        bullet_list(tips)
    )
}

pub fn render_season_tips(season: &str, tips: &[String]) -> String {
    format!(
        "{}\n\n{}",
        bold(&t_args(
            "season-tips-title",
            &[("season", &escape(&capitalize(season)))]
        )),
        bullet_list(tips)
    )
}

/// Weather summary with gardening advice; plain text, the city is user input
pub fn render_weather(city: &str, report: &WeatherReport) -> String {
    let mut lines = vec![
        t_args("weather-title", &[("city", city)]),
        t_args("weather-condition", &[("description", &report.description)]),
        t_args("weather-temperature", &[("temp", &report.temp_c.to_string())]),
        t_args("weather-humidity", &[("humidity", &report.humidity_pct.to_string())]),
        t_args("weather-wind", &[("wind", &report.wind_ms.to_string())]),
    ];

    if let Some(advice) = report.advice() {
        let key = match advice {
            WeatherAdvice::Cold => "weather-advice-cold",
            WeatherAdvice::Hot => "weather-advice-hot",
        };
        lines.push(String::new());
        lines.push(t(key));
    }

    lines.join("\n")
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {}", escape(item)))
        .collect::<Vec<_>>()
        .join("\n")
}
