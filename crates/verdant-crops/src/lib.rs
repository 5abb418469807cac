//! Species rules, growth, breeding gate, and harvest resolution for the
//! Verdant crop engine.
//!
//! The host simulation owns the world, scheduling, rendering and saves.
//! This crate owns the decisions: given a tile's state and the
//! environment, may it grow, may it cross-breed, and what does harvesting
//! or picking it yield.
//!
//! # Modules
//!
//! - [`species`] -- [`SpeciesDescriptor`]: immutable per-species data plus
//!   its rules, and the [`Namespace`] a species is owned by.
//! - [`rules`] -- The [`SpeciesRules`] contract with overridable defaults,
//!   and [`StandardRules`] for data-driven species.
//! - [`tile`] -- [`TileState`], the mutable per-location plant state.
//! - [`growth`] -- Per-tick growth evaluation.
//! - [`breeding`] -- Cross-breeding eligibility.
//! - [`harvest`] -- Harvest (right-click) and pick (left-click) outcomes.
//! - [`seeds`] -- Seed generation from a picked tile.
//! - [`sprites`] -- Per-species sprite tables, built only when rendering.
//! - [`registry`] -- Write-once species catalogue with legacy ids.
//! - [`weed`] -- The built-in weed species.
//! - [`config`] -- YAML species catalogues.
//! - [`error`] -- Error types.

pub mod breeding;
pub mod config;
pub mod error;
pub mod growth;
pub mod harvest;
pub mod registry;
pub mod rules;
pub mod seeds;
pub mod species;
pub mod sprites;
pub mod tile;
pub mod weed;

// Re-export primary types at crate root.
pub use config::{CatalogueConfig, ConfigError, SpeciesEntry};
pub use error::{CropError, SpeciesKey};
pub use growth::GrowthOutcome;
pub use harvest::ActionOutcome;
pub use registry::{RegistryBuilder, SpeciesRegistry};
pub use rules::{SpeciesRules, StandardRules};
pub use species::{MAX_TIER, Namespace, SpeciesDefinition, SpeciesDescriptor};
pub use sprites::{SpriteKey, SpriteTable, sprite_index};
pub use tile::TileState;
