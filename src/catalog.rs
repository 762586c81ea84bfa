//! # Knowledge Store
//!
//! Read-only catalog of plant cards, pest-control tips and seasonal tips. It is
//! loaded once at startup, either from the seed embedded in the binary or from
//! a JSON file, and shared between interactions without locking.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

use crate::action::{is_valid_payload, CallbackCommand, MenuItem, MAX_TOKEN_BYTES};
use crate::render::capitalize;

/// Seed shipped with the bot
pub const EMBEDDED_SEED: &str = include_str!("../data/catalog.json");

/// Seasons offered in the calendar menu, in display order
pub const SEASONS: [&str; 4] = ["весна", "лето", "осень", "зима"];

/// Plant entry as it appears in the seed; any field may be missing
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlantSeed {
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub care: Option<String>,
    #[serde(default)]
    pub pests: Option<String>,
    #[serde(default)]
    pub diseases: Option<String>,
}

/// Complete plant card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantRecord {
    pub name: String,
    pub description: String,
    pub care: String,
    pub pests: String,
    pub diseases: String,
}

impl PlantSeed {
    /// Build a record only when all five fields are populated
    pub fn to_record(&self) -> Option<PlantRecord> {
        fn field(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        Some(PlantRecord {
            name: field(&self.name)?,
            description: field(&self.description)?,
            care: field(&self.care)?,
            pests: field(&self.pests)?,
            diseases: field(&self.diseases)?,
        })
    }
}

/// Named list of tips, used for both pests and seasons
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TipsRecord {
    pub name: String,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogSeed {
    plants: Vec<PlantSeed>,
    #[serde(default)]
    pests: Vec<TipsRecord>,
    #[serde(default)]
    seasons: Vec<TipsRecord>,
}

/// Errors detected while loading a catalog seed
#[derive(Debug)]
pub enum CatalogError {
    /// The seed is not valid JSON or does not match the expected shape
    Parse(String),
    /// A key cannot be carried inside an action token
    InvalidKey(String),
    /// The same key appears twice
    DuplicateKey(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Parse(msg) => write!(f, "Catalog parse error: {msg}"),
            CatalogError::InvalidKey(key) => write!(f, "Invalid catalog key: {key:?}"),
            CatalogError::DuplicateKey(key) => write!(f, "Duplicate catalog key: {key:?}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Read-only lookup of plants, pests and seasons
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    plants: Vec<PlantSeed>,
    plant_index: HashMap<String, usize>,
    pests: Vec<TipsRecord>,
    seasons: HashMap<String, Vec<String>>,
}

impl KnowledgeStore {
    /// Load the seed embedded in the binary
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_SEED)
    }

    /// Load a seed file from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog seed {}", path.display()))?;
        let store = Self::from_json(&content)
            .with_context(|| format!("Failed to load catalog seed {}", path.display()))?;
        Ok(store)
    }

    /// Parse and validate a JSON seed
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let seed: CatalogSeed =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let mut plant_index = HashMap::new();
        for (i, plant) in seed.plants.iter().enumerate() {
            validate_key(&CallbackCommand::PlantDetail(plant.key.clone()), &plant.key)?;
            if plant_index.insert(plant.key.clone(), i).is_some() {
                return Err(CatalogError::DuplicateKey(plant.key.clone()));
            }
        }

        let mut pest_names = HashSet::new();
        for pest in &seed.pests {
            validate_key(&CallbackCommand::PestDetail(pest.name.clone()), &pest.name)?;
            if !pest_names.insert(pest.name.as_str()) {
                return Err(CatalogError::DuplicateKey(pest.name.clone()));
            }
        }

        let mut seasons = HashMap::new();
        for season in seed.seasons {
            validate_key(&CallbackCommand::SeasonDetail(season.name.clone()), &season.name)?;
            if seasons.contains_key(&season.name) {
                return Err(CatalogError::DuplicateKey(season.name));
            }
            seasons.insert(season.name, season.tips);
        }

        info!(
            plants = seed.plants.len(),
            pests = seed.pests.len(),
            seasons = seasons.len(),
            "Catalog loaded"
        );

        Ok(Self {
            plants: seed.plants,
            plant_index,
            pests: seed.pests,
            seasons,
        })
    }

    /// Complete plant card for an exact key
    pub fn lookup_plant(&self, key: &str) -> Option<PlantRecord> {
        let plant = &self.plants[*self.plant_index.get(key)?];
        let record = plant.to_record();
        if record.is_none() {
            debug!(key = key, "Plant record is incomplete");
        }
        record
    }

    /// Whether the key names a plant in the catalog, complete or not
    pub fn contains_plant(&self, key: &str) -> bool {
        self.plant_index.contains_key(key)
    }

    /// Tips for a season; a season without tips counts as absent
    pub fn lookup_season_tips(&self, season: &str) -> Option<&[String]> {
        self.seasons
            .get(season)
            .map(Vec::as_slice)
            .filter(|tips| !tips.is_empty())
    }

    /// Pest-control tips for a pest name
    pub fn lookup_pest_tips(&self, name: &str) -> Option<&[String]> {
        self.pests
            .iter()
            .find(|pest| pest.name == name)
            .map(|pest| pest.tips.as_slice())
            .filter(|tips| !tips.is_empty())
    }

    /// Plant menu in catalog order
    pub fn plant_menu(&self) -> Vec<MenuItem> {
        self.plants
            .iter()
            .map(|plant| {
                let label = capitalize(plant.name.as_deref().unwrap_or(&plant.key));
                MenuItem::new(label, &CallbackCommand::PlantDetail(plant.key.clone()))
            })
            .collect()
    }

    /// Pest menu in catalog order
    pub fn pest_menu(&self) -> Vec<MenuItem> {
        self.pests
            .iter()
            .map(|pest| {
                MenuItem::new(
                    pest.name.clone(),
                    &CallbackCommand::PestDetail(pest.name.clone()),
                )
            })
            .collect()
    }

    /// Calendar menu, including seasons the seed has no tips for
    pub fn season_menu(&self) -> Vec<MenuItem> {
        SEASONS
            .iter()
            .map(|season| {
                MenuItem::new(
                    capitalize(season),
                    &CallbackCommand::SeasonDetail((*season).to_string()),
                )
            })
            .collect()
    }
}

fn validate_key(command: &CallbackCommand, key: &str) -> Result<(), CatalogError> {
    if !is_valid_payload(key) || command.encode().len() > MAX_TOKEN_BYTES {
        return Err(CatalogError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_seed(key: &str) -> PlantSeed {
        PlantSeed {
            key: key.to_string(),
            name: Some(key.to_string()),
            description: Some("описание".to_string()),
            care: Some("уход".to_string()),
            pests: Some("тля".to_string()),
            diseases: Some("гниль".to_string()),
        }
    }

    #[test]
    fn test_complete_seed_builds_record() {
        let record = complete_seed("пион").to_record().unwrap();
        assert_eq!(record.name, "пион");
        assert_eq!(record.diseases, "гниль");
    }

    #[test]
    fn test_any_missing_field_rejects_record() {
        let mut seeds = Vec::new();
        for i in 0..5 {
            let mut seed = complete_seed("пион");
            match i {
                0 => seed.name = None,
                1 => seed.description = Some(String::new()),
                2 => seed.care = Some("   ".to_string()),
                3 => seed.pests = None,
                _ => seed.diseases = None,
            }
            seeds.push(seed);
        }
        for seed in seeds {
            assert!(seed.to_record().is_none(), "{seed:?}");
        }
    }

    #[test]
    fn test_embedded_seed_is_complete() {
        let store = KnowledgeStore::embedded().unwrap();
        let menu = store.plant_menu();
        assert_eq!(menu.len(), 17);
        for item in &menu {
            let key = item.token.strip_prefix("plant_").unwrap();
            assert!(store.lookup_plant(key).is_some(), "{key} is incomplete");
        }
    }

    #[test]
    fn test_key_with_delimiter_is_rejected() {
        let json = r#"{"plants": [{"key": "белая_акация"}]}"#;
        assert!(matches!(
            KnowledgeStore::from_json(json),
            Err(CatalogError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let json = r#"{"plants": [{"key": "ель"}, {"key": "ель"}]}"#;
        assert!(matches!(
            KnowledgeStore::from_json(json),
            Err(CatalogError::DuplicateKey(_))
        ));
    }

    #[test]
    fn test_overlong_token_is_rejected() {
        let key = "я".repeat(40);
        let json = format!(r#"{{"plants": [], "pests": [{{"name": "{key}", "tips": ["x"]}}]}}"#);
        assert!(matches!(
            KnowledgeStore::from_json(&json),
            Err(CatalogError::InvalidKey(_))
        ));
    }
}
