//! Seed data: initial source definitions loaded at startup.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

use super::{NewSource, Rule};

/// Root seed data structure listing sources to create on startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seed {
    /// Sources to create if the store is empty
    #[serde(default)]
    pub sources: Vec<SeedSource>,
}

impl Seed {
    /// Load seed data from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load seed data or return an empty seed if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Seed load failed from {:?}: {}. Starting with no sources.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate that every seed source is usable: the name is non-empty,
    /// the address parses as a URL, and the rule compiles.
    pub fn validate(&self) -> Result<()> {
        for source in &self.sources {
            if source.name.trim().is_empty() {
                return Err(AppError::validation("seed source with empty name"));
            }
            url::Url::parse(&source.address).map_err(|e| {
                AppError::validation(format!("seed source {}: bad address: {}", source.name, e))
            })?;
            source.rule().compile().map_err(|e| {
                AppError::validation(format!("seed source {}: {}", source.name, e))
            })?;
        }
        Ok(())
    }
}

/// One source definition in the seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedSource {
    /// Human-readable name
    pub name: String,

    /// Address of the page to fetch
    pub address: String,

    /// Pattern locating each item segment
    pub item_pattern: String,

    /// Pattern for the title within a segment
    pub title_pattern: String,

    /// Pattern for the link within a segment
    pub link_pattern: String,

    /// Pattern for the description within a segment
    pub description_pattern: String,
}

impl SeedSource {
    /// The extraction rule carried by this seed entry.
    pub fn rule(&self) -> Rule {
        Rule {
            item_pattern: self.item_pattern.clone(),
            title_pattern: self.title_pattern.clone(),
            link_pattern: self.link_pattern.clone(),
            description_pattern: self.description_pattern.clone(),
        }
    }

    /// Creation parameters for the store.
    pub fn to_new_source(&self) -> NewSource {
        NewSource {
            name: self.name.clone(),
            address: self.address.clone(),
            rule: self.rule(),
        }
    }
}
