//! # Localization Module
//!
//! Every user-visible string of the bot lives in a Fluent resource under
//! `locales/<lang>/main.ftl`. Resources are embedded at compile time so the
//! binary does not depend on its working directory.

use anyhow::{anyhow, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::warn;
use unic_langid::LanguageIdentifier;

/// Language of the bot's replies
const DEFAULT_LANGUAGE: &str = "ru";

const RESOURCES: &[(&str, &str)] = &[("ru", include_str!("../locales/ru/main.ftl"))];

/// Localization manager for the garden assistant
pub struct LocalizationManager {
    bundles: HashMap<String, Arc<FluentBundle<FluentResource>>>,
}

impl LocalizationManager {
    /// Create a new localization manager with every embedded locale loaded
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for (lang, source) in RESOURCES {
            let locale: LanguageIdentifier = lang.parse()?;
            let bundle = Self::create_bundle(&locale, source)?;
            bundles.insert((*lang).to_string(), Arc::new(bundle));
        }

        Ok(Self { bundles })
    }

    /// Manager without any resources; every lookup reports a missing translation
    fn empty() -> Self {
        Self {
            bundles: HashMap::new(),
        }
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(
        locale: &LanguageIdentifier,
        source: &str,
    ) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // Unicode isolation marks would make rendered text differ from the resource
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow!("Invalid Fluent resource for {locale}: {errors:?}"))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Duplicate Fluent messages for {locale}: {errors:?}"))?;

        Ok(bundle)
    }

    /// Get a localized message, formatting `args` into its placeholders
    pub fn get_message(&self, key: &str, args: Option<&HashMap<&str, &str>>) -> String {
        let Some(bundle) = self.bundles.get(DEFAULT_LANGUAGE) else {
            return format!("Missing translation: {key}");
        };

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {key}"),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {key}"),
        };

        let fluent_args = args.map(|args| {
            FluentArgs::from_iter(args.iter().map(|(k, v)| (*k, FluentValue::from(*v))))
        });

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, fluent_args.as_ref(), &mut errors);
        if !errors.is_empty() {
            warn!(key = key, errors = ?errors, "Fluent reported errors while formatting message");
        }

        value.into_owned()
    }
}

static LOCALIZATION_MANAGER: OnceLock<LocalizationManager> = OnceLock::new();

/// Initialize the global localization manager, surfacing resource errors
pub fn init_localization() -> Result<()> {
    if LOCALIZATION_MANAGER.get().is_some() {
        return Ok(());
    }
    let manager = LocalizationManager::new()?;
    // A concurrent initializer may have won the race; both hold the same resources
    let _ = LOCALIZATION_MANAGER.set(manager);
    Ok(())
}

/// Get the global localization manager
pub fn get_localization_manager() -> &'static LocalizationManager {
    LOCALIZATION_MANAGER.get_or_init(|| {
        LocalizationManager::new().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load localization resources");
            LocalizationManager::empty()
        })
    })
}

/// Convenience function to get a localized message
pub fn t(key: &str) -> String {
    get_localization_manager().get_message(key, None)
}

/// Convenience function to get a localized message with arguments
pub fn t_args(key: &str, args: &[(&str, &str)]) -> String {
    let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
    get_localization_manager().get_message(key, Some(&args_map))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_resources_parse() {
        assert!(LocalizationManager::new().is_ok());
    }

    #[test]
    fn test_args_are_not_isolated() {
        let message = t_args("weather-title", &[("city", "Москва")]);
        assert_eq!(message, "🌦 Погода в Москва:");
    }
}
