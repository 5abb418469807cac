//! The built-in weed species.
//!
//! Weed is the universal tier-0 species. It spreads onto empty locations,
//! chokes neighbours once it reaches size 2, can never be harvested and
//! drops no seeds; picking it is how players clear it.

use verdant_types::{ItemStack, StatVector};

use crate::error::CropError;
use crate::rules::SpeciesRules;
use crate::species::{Namespace, SpeciesDefinition, SpeciesDescriptor};
use crate::tile::TileState;

/// Namespace of the built-in species.
pub const WEED_OWNER: &str = "verdant";

/// Name of the weed species.
pub const WEED_NAME: &str = "weed";

/// Growth stages of the weed.
pub const WEED_MAX_SIZE: u8 = 5;

/// Growth points per weed stage. Tier 0 would otherwise advance every tick.
pub const WEED_GROWTH_DURATION: u32 = 300;

/// Formulas of the weed.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeedRules;

impl SpeciesRules for WeedRules {
    fn can_grow(&self, tile: &TileState) -> bool {
        tile.size() < WEED_MAX_SIZE
    }

    fn optimal_harvest_size(&self, _tile: &TileState) -> u8 {
        1
    }

    fn can_be_harvested(&self, _tile: &TileState) -> bool {
        false
    }

    fn gain(&self, _tile: &TileState) -> Option<ItemStack> {
        None
    }

    fn growth_duration(&self, _tile: &TileState) -> u32 {
        WEED_GROWTH_DURATION
    }

    fn drop_seed_chance(&self, _tile: &TileState) -> f64 {
        0.0
    }
}

/// Build the weed descriptor.
///
/// # Errors
///
/// Only fails if the built-in definition is invalid.
pub fn species() -> Result<SpeciesDescriptor, CropError> {
    let definition = SpeciesDefinition {
        name: String::from(WEED_NAME),
        tier: 0,
        stats: StatVector::new(0, 0, 0, 0, 5),
        attributes: vec![String::from("Weed"), String::from("Bad")],
        max_size: WEED_MAX_SIZE,
        display_name: Some(String::from("Weed")),
        discovered_by: None,
    };
    SpeciesDescriptor::new(&Namespace::new(WEED_OWNER), definition, Box::new(WeedRules))
}
