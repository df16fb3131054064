// src/models/source.rs

//! Source data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::Rule;

/// Store-assigned source identifier.
pub type SourceId = u64;

/// A configured origin to poll, with its own extraction rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Store-assigned identifier
    pub id: SourceId,

    /// Human-readable name
    pub name: String,

    /// Address of the page to fetch
    pub address: String,

    /// Extraction rule, validated at creation time
    pub rule: Rule,

    /// Set when the most recent refresh attempt failed; never cleared
    /// automatically
    pub broken: bool,

    /// When the source was created
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a new source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSource {
    pub name: String,
    pub address: String,
    pub rule: Rule,
}

impl NewSource {
    /// Check the invariants every store must enforce before persisting:
    /// the address parses as a URL and the rule compiles.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.address)?;
        self.rule.compile()?;
        Ok(())
    }
}
