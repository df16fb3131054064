// src/models/rule.rs

//! Extraction rules and their compiled form.
//!
//! A rule is four user-authored regex patterns: one that segments a
//! document into items, and one each for the title, link, and description
//! fields within a segment. Every pattern must carry a capture group; the
//! first group is the extracted sub-region.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Raw extraction patterns for a single source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rule {
    /// Pattern locating each item segment in the document
    pub item_pattern: String,

    /// Pattern for the title within a segment
    pub title_pattern: String,

    /// Pattern for the link within a segment
    pub link_pattern: String,

    /// Pattern for the description within a segment
    pub description_pattern: String,
}

impl Rule {
    /// Compile all four patterns into a ready-to-use matcher set.
    ///
    /// All-or-nothing: if any pattern is invalid or lacks a capture
    /// group, the whole rule is rejected and no `CompiledRule` exists.
    pub fn compile(&self) -> Result<CompiledRule> {
        Ok(CompiledRule {
            item: compile_pattern("item", &self.item_pattern)?,
            title: compile_pattern("title", &self.title_pattern)?,
            link: compile_pattern("link", &self.link_pattern)?,
            description: compile_pattern("description", &self.description_pattern)?,
        })
    }
}

/// Validated, ready-to-use form of a [`Rule`].
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub item: Regex,
    pub title: Regex,
    pub link: Regex,
    pub description: Regex,
}

fn compile_pattern(field: &'static str, pattern: &str) -> Result<Regex> {
    let regex = Regex::new(pattern)?;
    // captures_len counts the implicit whole-match group
    if regex.captures_len() < 2 {
        return Err(AppError::MissingCaptureGroup { field });
    }
    Ok(regex)
}
