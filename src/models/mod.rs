// src/models/mod.rs

//! Domain models for the pagefeed application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod item;
mod rule;
mod seed;
mod source;

// Re-export all public types
pub use config::{Config, FetchConfig, SchedulerConfig};
pub use item::{ExtractedItem, Item};
pub use rule::{CompiledRule, Rule};
pub use seed::{Seed, SeedSource};
pub use source::{NewSource, Source, SourceId};
