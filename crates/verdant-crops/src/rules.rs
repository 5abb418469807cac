//! The species rules contract.
//!
//! [`SpeciesRules`] is the overridable formula surface of a species. Four
//! methods have no sensible default and must be implemented; everything
//! else falls back to the stock formulas below, which new species inherit
//! unless they override them.
//!
//! | Formula                 | Default                                      |
//! |-------------------------|----------------------------------------------|
//! | `growth_duration`       | `tier * 200`                                 |
//! | `weight_influences`     | `humidity + nutrients + air`                 |
//! | `can_cross`             | `size >= 3`                                  |
//! | `drop_gain_chance`      | `0.95 ^ tier`                                |
//! | `drop_seed_chance`      | `0` at size 1, else `0.5 (/2 at size 2) * 0.8 ^ tier` |
//! | `size_after_harvest`    | `1`                                          |
//! | `is_weed`               | `size >= 2` and (weed species or growth stat >= 24) |
//!
//! Every method receives the tile; the tile's species is reachable through
//! [`TileState::species`].

use rand::RngCore;
use verdant_types::{EntityContact, Environment, HarvestMode, ItemStack};

use crate::error::CropError;
use crate::harvest::{self, ActionOutcome};
use crate::seeds;
use crate::species::{SpeciesDescriptor, attribute_description};
use crate::tile::TileState;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Growth points per tier needed for one size increment.
pub const GROWTH_POINTS_PER_TIER: u32 = 200;

/// Smallest size at which a tile may cross-breed.
pub const MIN_CROSS_SIZE: u8 = 3;

/// Per-tier decay of the gain drop chance.
pub const GAIN_CHANCE_DECAY: f64 = 0.95;

/// Seed drop chance of a tile at size 3 or more, before tier decay.
pub const SEED_BASE_CHANCE: f64 = 0.5;

/// Per-tier decay of the seed drop chance.
pub const SEED_CHANCE_DECAY: f64 = 0.8;

/// Growth stat from which any plant counts as weed-like.
pub const WEED_GROWTH_STAT: u8 = 24;

/// Smallest size at which a tile can spread weed.
pub const MIN_WEED_SIZE: u8 = 2;

// ---------------------------------------------------------------------------
// SpeciesRules
// ---------------------------------------------------------------------------

/// Overridable formulas of a species.
///
/// Implementations are shared across tiles and threads, so every method
/// takes `&self` and must be deterministic given its inputs (the click
/// hooks receive an explicit RNG).
pub trait SpeciesRules: Send + Sync + core::fmt::Debug {
    /// Whether the plant may grow further.
    ///
    /// Also called with a size-0 probe tile to decide whether a neighbour
    /// may spread onto an empty location, so it must not assume the tile
    /// holds a grown plant.
    fn can_grow(&self, tile: &TileState) -> bool;

    /// Size an automated harvester waits for before harvesting.
    fn optimal_harvest_size(&self, tile: &TileState) -> u8;

    /// Whether the plant can be harvested in its current state.
    fn can_be_harvested(&self, tile: &TileState) -> bool;

    /// One unit of harvest gain, or `None` if the species yields nothing.
    fn gain(&self, tile: &TileState) -> Option<ItemStack>;

    /// One description line for players. Defaults to two attribute tags
    /// per line.
    fn description(&self, species: &SpeciesDescriptor, line: usize) -> String {
        attribute_description(species.attributes(), line)
    }

    /// Growth points needed per size increment.
    fn growth_duration(&self, tile: &TileState) -> u32 {
        u32::from(tile.species().tier()).saturating_mul(GROWTH_POINTS_PER_TIER)
    }

    /// Growth points contributed by the environment this tick.
    ///
    /// Each input conventionally ranges over 0--30. Species may weigh the
    /// terms differently as long as the result stays non-negative.
    fn weight_influences(&self, _tile: &TileState, env: Environment) -> u32 {
        influence_sum(env)
    }

    /// Whether the tile may act as a cross-breeding parent.
    fn can_cross(&self, tile: &TileState) -> bool {
        tile.size() >= MIN_CROSS_SIZE
    }

    /// Expected gain drops per harvest. Values above 1 mean guaranteed
    /// drops plus a chance of one more.
    fn drop_gain_chance(&self, species: &SpeciesDescriptor) -> f64 {
        GAIN_CHANCE_DECAY.powi(i32::from(species.tier()))
    }

    /// Expected seed drops per pick.
    fn drop_seed_chance(&self, tile: &TileState) -> f64 {
        if tile.size() == 1 {
            return 0.0;
        }
        let base = if tile.size() == 2 {
            SEED_BASE_CHANCE / 2.0
        } else {
            SEED_BASE_CHANCE
        };
        base * SEED_CHANCE_DECAY.powi(i32::from(tile.species().tier()))
    }

    /// Tile size after a harvest.
    fn size_after_harvest(&self, _tile: &TileState) -> u8 {
        1
    }

    /// One seed drop produced when the tile is picked.
    fn seeds(&self, tile: &TileState) -> Option<ItemStack> {
        Some(seeds::generate(tile))
    }

    /// Redstone signal strength emitted by the tile.
    fn emit_redstone(&self, _tile: &TileState) -> u8 {
        0
    }

    /// Light level emitted by the tile.
    fn emitted_light(&self, _tile: &TileState) -> u8 {
        0
    }

    /// Whether an entity walking into the tile should trigger the host's
    /// trample handling. Only living, sprinting entities trample.
    fn on_entity_collision(&self, _tile: &TileState, contact: EntityContact) -> bool {
        contact.living && contact.sprinting
    }

    /// Whether the tile spreads weed to its neighbours.
    fn is_weed(&self, tile: &TileState) -> bool {
        tile.size() >= MIN_WEED_SIZE
            && (tile.species().is_weed_species() || tile.stats().growth >= WEED_GROWTH_STAT)
    }

    /// How many blocks below the tile the host should look at when the
    /// species checks its surroundings.
    fn root_length(&self, _tile: &TileState) -> u8 {
        1
    }

    /// Right-click by a player. Harvests by default.
    fn right_click(
        &self,
        tile: &mut TileState,
        rng: &mut dyn RngCore,
    ) -> Result<ActionOutcome, CropError> {
        harvest::harvest(tile, HarvestMode::Manual, rng)
    }

    /// Left-click by a player. Picks by default.
    fn left_click(
        &self,
        tile: &mut TileState,
        rng: &mut dyn RngCore,
    ) -> Result<ActionOutcome, CropError> {
        harvest::pick(tile, rng)
    }

    /// Called on every crop tick, before growth is evaluated.
    fn on_tick(&self, _tile: &mut TileState) {}

    /// Called when a block next to the tile changed.
    fn on_neighbour_change(&self, _tile: &TileState) {}

    /// Called when the host removes the tile.
    fn on_destroyed(&self, _tile: &TileState) {}
}

/// Default environmental influence: the plain sum, truncated, never
/// negative.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn influence_sum(env: Environment) -> u32 {
    let sum = env.humidity.max(0.0) + env.nutrients.max(0.0) + env.air.max(0.0);
    // Float-to-int `as` saturates; NaN becomes 0.
    sum as u32
}

// ---------------------------------------------------------------------------
// StandardRules
// ---------------------------------------------------------------------------

/// Rules for a plain crop driven entirely by its data.
///
/// Grows until max size, can be harvested only at max size (which is also
/// the optimal size), and yields one unit of a named produce item per
/// gain drop. All other formulas are the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StandardRules {
    gain_item: Option<String>,
}

impl StandardRules {
    /// Rules yielding `gain_item` on harvest, or nothing when `None`.
    pub fn new(gain_item: Option<&str>) -> Self {
        Self {
            gain_item: gain_item.map(String::from),
        }
    }

    /// The produce item this species yields.
    pub fn gain_item(&self) -> Option<&str> {
        self.gain_item.as_deref()
    }
}

impl SpeciesRules for StandardRules {
    fn can_grow(&self, tile: &TileState) -> bool {
        tile.size() < tile.species().max_size()
    }

    fn optimal_harvest_size(&self, tile: &TileState) -> u8 {
        tile.species().max_size()
    }

    fn can_be_harvested(&self, tile: &TileState) -> bool {
        tile.size() == tile.species().max_size()
    }

    fn gain(&self, _tile: &TileState) -> Option<ItemStack> {
        self.gain_item
            .as_ref()
            .map(|name| ItemStack::produce(name.as_str(), 1))
    }
}
