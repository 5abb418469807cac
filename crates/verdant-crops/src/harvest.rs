//! Harvest and pick resolution.
//!
//! Harvesting (right-click, or an automated harvester) collects gain drops
//! and cuts the plant back to `size_after_harvest`. Picking (left-click)
//! collects seed drops and clears the location.
//!
//! Drop chances are expected counts: the whole part is always dropped and
//! the fractional part is a single roll for one more.

use std::sync::Arc;

use rand::{Rng, RngCore};
use verdant_types::{HarvestMode, ItemStack};

use crate::error::CropError;
use crate::tile::TileState;

/// Upper bound on drops from a single action.
pub const MAX_DROPS_PER_ACTION: u32 = 64;

/// Result of a player or harvester action on a tile.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionOutcome {
    /// Whether the tile state changed. When `false` the host should fall
    /// through to its default click handling.
    pub changed: bool,
    /// Whether the location is now empty.
    pub cleared: bool,
    /// Items to hand to the host's drop mechanism.
    pub drops: Vec<ItemStack>,
}

impl ActionOutcome {
    /// An outcome that changed nothing.
    pub const fn unchanged() -> Self {
        Self {
            changed: false,
            cleared: false,
            drops: Vec::new(),
        }
    }

    /// Total number of items across all drops.
    pub fn item_count(&self) -> u32 {
        self.drops
            .iter()
            .fold(0_u32, |total, stack| total.saturating_add(stack.count))
    }
}

/// Turn an expected drop count into an actual one.
///
/// Non-finite and non-positive chances drop nothing.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::arithmetic_side_effects
)]
pub fn roll_drop_count(chance: f64, rng: &mut dyn RngCore) -> u32 {
    if !chance.is_finite() || chance <= 0.0 {
        return 0;
    }
    let capped = chance.min(f64::from(MAX_DROPS_PER_ACTION));
    let whole = capped.trunc();
    let fraction = capped - whole;

    let mut count = whole as u32;
    if fraction > 0.0 && rng.random::<f64>() < fraction {
        count = count.saturating_add(1);
    }
    count.min(MAX_DROPS_PER_ACTION)
}

/// Harvest a tile.
///
/// Returns an unchanged outcome when the species refuses the harvest, or
/// in [`HarvestMode::Optimal`] when the tile is below its optimal size.
///
/// # Errors
///
/// Returns [`CropError::SizeOutOfRange`] only if the species reports a
/// post-harvest size it cannot hold, which is clamped first and so does not
/// happen for well-formed descriptors.
pub fn harvest(
    tile: &mut TileState,
    mode: HarvestMode,
    rng: &mut dyn RngCore,
) -> Result<ActionOutcome, CropError> {
    let species = Arc::clone(tile.species());
    if !species.can_be_harvested(tile) {
        return Ok(ActionOutcome::unchanged());
    }
    if mode == HarvestMode::Optimal && tile.size() < species.optimal_harvest_size(tile) {
        return Ok(ActionOutcome::unchanged());
    }

    let rolls = roll_drop_count(species.drop_gain_chance(), rng);
    let drops: Vec<ItemStack> = (0..rolls).filter_map(|_| species.gain(tile)).collect();

    let after = species.size_after_harvest(tile).min(species.max_size());
    tile.set_size(after)?;
    tile.set_growth_points(0);

    tracing::debug!(
        species = %species.identity(),
        ?mode,
        drops = drops.len(),
        size = after,
        "Tile harvested"
    );

    Ok(ActionOutcome {
        changed: true,
        cleared: after == 0,
        drops,
    })
}

/// Pick a tile, dropping seeds and clearing the location.
///
/// Picking an empty location changes nothing.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the signature aligned with
/// [`harvest`] for the click hooks.
pub fn pick(tile: &mut TileState, rng: &mut dyn RngCore) -> Result<ActionOutcome, CropError> {
    if tile.is_empty() {
        return Ok(ActionOutcome::unchanged());
    }
    let species = Arc::clone(tile.species());

    let rolls = roll_drop_count(species.drop_seed_chance(tile), rng);
    let drops: Vec<ItemStack> = (0..rolls).filter_map(|_| species.seeds(tile)).collect();
    tile.clear();

    tracing::debug!(
        species = %species.identity(),
        drops = drops.len(),
        "Tile picked"
    );

    Ok(ActionOutcome {
        changed: true,
        cleared: true,
        drops,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::unreachable)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use verdant_types::{CropStats, ItemKind, StatVector};

    use super::*;
    use crate::rules::{SpeciesRules, StandardRules};
    use crate::species::{Namespace, SpeciesDefinition, SpeciesDescriptor};

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn species(tier: u8, rules: Box<dyn SpeciesRules>) -> Arc<SpeciesDescriptor> {
        let def = SpeciesDefinition {
            name: String::from("berry"),
            tier,
            stats: StatVector::default(),
            attributes: Vec::new(),
            max_size: 4,
            ..SpeciesDefinition::default()
        };
        Arc::new(SpeciesDescriptor::new(&Namespace::new("test"), def, rules).unwrap())
    }

    fn berry(tier: u8) -> Arc<SpeciesDescriptor> {
        species(tier, Box::new(StandardRules::new(Some("berry"))))
    }

    /// Always yields a fixed number of drops and regrows to size 2.
    #[derive(Debug)]
    struct Bountiful {
        chance: f64,
    }

    impl SpeciesRules for Bountiful {
        fn can_grow(&self, tile: &TileState) -> bool {
            tile.size() < tile.species().max_size()
        }
        fn optimal_harvest_size(&self, _tile: &TileState) -> u8 {
            3
        }
        fn can_be_harvested(&self, tile: &TileState) -> bool {
            tile.size() >= 2
        }
        fn gain(&self, _tile: &TileState) -> Option<ItemStack> {
            Some(ItemStack::produce("berry", 1))
        }
        fn drop_gain_chance(&self, _species: &SpeciesDescriptor) -> f64 {
            self.chance
        }
        fn drop_seed_chance(&self, _tile: &TileState) -> f64 {
            self.chance
        }
        fn size_after_harvest(&self, _tile: &TileState) -> u8 {
            2
        }
    }

    #[test]
    fn whole_chances_are_exact() {
        let mut rng = rng();
        assert_eq!(roll_drop_count(0.0, &mut rng), 0);
        assert_eq!(roll_drop_count(-1.0, &mut rng), 0);
        assert_eq!(roll_drop_count(f64::NAN, &mut rng), 0);
        assert_eq!(roll_drop_count(1.0, &mut rng), 1);
        assert_eq!(roll_drop_count(3.0, &mut rng), 3);
        assert_eq!(roll_drop_count(1e9, &mut rng), MAX_DROPS_PER_ACTION);
    }

    #[test]
    fn fractional_chances_average_out() {
        let mut rng = rng();
        let total: u32 = (0..10_000).map(|_| roll_drop_count(1.25, &mut rng)).sum();
        // Expected 12 500.
        assert!((12_000..13_000).contains(&total), "total {total}");
    }

    #[test]
    fn harvest_at_max_size() {
        let mut rng = rng();
        let mut tile = TileState::with_size(berry(0), CropStats::default(), 4).unwrap();
        tile.set_growth_points(50);

        let outcome = harvest(&mut tile, HarvestMode::Manual, &mut rng).unwrap();
        assert!(outcome.changed);
        assert!(!outcome.cleared);
        // Tier 0: chance 1.0, exactly one drop.
        assert_eq!(outcome.drops, vec![ItemStack::produce("berry", 1)]);
        assert_eq!(tile.size(), 1);
        assert_eq!(tile.growth_points(), 0);
    }

    #[test]
    fn harvest_before_maturity_is_refused() {
        let mut rng = rng();
        let mut tile = TileState::with_size(berry(1), CropStats::default(), 3).unwrap();
        let outcome = harvest(&mut tile, HarvestMode::Manual, &mut rng).unwrap();
        assert_eq!(outcome, ActionOutcome::unchanged());
        assert_eq!(tile.size(), 3);
    }

    #[test]
    fn optimal_mode_waits_for_optimal_size() {
        let mut rng = rng();
        let bountiful = species(1, Box::new(Bountiful { chance: 2.0 }));

        let mut early =
            TileState::with_size(Arc::clone(&bountiful), CropStats::default(), 2).unwrap();
        let skipped = harvest(&mut early, HarvestMode::Optimal, &mut rng).unwrap();
        assert!(!skipped.changed);

        // Manual harvest accepts anything the species allows.
        let manual = harvest(&mut early, HarvestMode::Manual, &mut rng).unwrap();
        assert!(manual.changed);
        assert_eq!(manual.item_count(), 2);

        let mut ripe = TileState::with_size(bountiful, CropStats::default(), 3).unwrap();
        let outcome = harvest(&mut ripe, HarvestMode::Optimal, &mut rng).unwrap();
        assert!(outcome.changed);
        assert_eq!(ripe.size(), 2);
    }

    #[test]
    fn species_without_gain_still_resets() {
        let mut rng = rng();
        let bare = species(0, Box::new(StandardRules::new(None)));
        let mut tile = TileState::with_size(bare, CropStats::default(), 4).unwrap();
        let outcome = harvest(&mut tile, HarvestMode::Manual, &mut rng).unwrap();
        assert!(outcome.changed);
        assert!(outcome.drops.is_empty());
        assert_eq!(tile.size(), 1);
    }

    #[test]
    fn pick_clears_and_drops_seeds() {
        let mut rng = rng();
        let bountiful = species(1, Box::new(Bountiful { chance: 2.0 }));
        let mut tile = TileState::with_size(bountiful, CropStats::new(4, 5, 6), 3).unwrap();

        let outcome = pick(&mut tile, &mut rng).unwrap();
        assert!(outcome.changed);
        assert!(outcome.cleared);
        assert_eq!(outcome.drops.len(), 2);
        for stack in &outcome.drops {
            let ItemKind::Seed(seed) = &stack.item else {
                unreachable!("default seeds are seed bags");
            };
            assert_eq!(seed.stats, CropStats::new(4, 5, 6));
        }
        assert!(tile.is_empty());
        assert_eq!(tile.growth_points(), 0);
    }

    #[test]
    fn pick_at_size_one_drops_nothing() {
        let mut rng = rng();
        let mut tile = TileState::plant(berry(1), CropStats::default());
        let outcome = pick(&mut tile, &mut rng).unwrap();
        assert!(outcome.cleared);
        assert!(outcome.drops.is_empty());
    }

    #[test]
    fn pick_on_empty_tile_is_a_no_op() {
        let mut rng = rng();
        let mut tile = TileState::probe(berry(1));
        assert_eq!(pick(&mut tile, &mut rng).unwrap(), ActionOutcome::unchanged());
    }

    #[test]
    fn clicks_route_through_species_rules() {
        /// Right-click does nothing; left-click is the default pick.
        #[derive(Debug)]
        struct Stubborn;
        impl SpeciesRules for Stubborn {
            fn can_grow(&self, _tile: &TileState) -> bool {
                false
            }
            fn optimal_harvest_size(&self, _tile: &TileState) -> u8 {
                4
            }
            fn can_be_harvested(&self, _tile: &TileState) -> bool {
                true
            }
            fn gain(&self, _tile: &TileState) -> Option<ItemStack> {
                Some(ItemStack::produce("stone", 1))
            }
            fn right_click(
                &self,
                _tile: &mut TileState,
                _rng: &mut dyn RngCore,
            ) -> Result<ActionOutcome, CropError> {
                Ok(ActionOutcome::unchanged())
            }
        }

        let mut rng = rng();
        let stubborn = species(1, Box::new(Stubborn));
        let mut tile = TileState::with_size(stubborn, CropStats::default(), 4).unwrap();
        assert!(!tile.right_click(&mut rng).unwrap().changed);
        assert_eq!(tile.size(), 4);

        assert!(tile.left_click(&mut rng).unwrap().cleared);
        assert!(tile.is_empty());
    }

    #[test]
    fn default_right_click_harvests() {
        let mut rng = rng();
        let mut tile = TileState::with_size(berry(0), CropStats::default(), 4).unwrap();
        let outcome = tile.right_click(&mut rng).unwrap();
        assert_eq!(outcome.item_count(), 1);
        assert_eq!(tile.size(), 1);
    }

    #[test]
    fn weed_cannot_be_harvested_and_picks_clean() {
        let mut rng = rng();
        let weed = Arc::new(crate::weed::species().unwrap());
        let mut tile = TileState::with_size(weed, CropStats::default(), 5).unwrap();
        assert!(!tile.right_click(&mut rng).unwrap().changed);
        let picked = tile.left_click(&mut rng).unwrap();
        assert!(picked.cleared);
        assert!(picked.drops.is_empty());
    }
}
