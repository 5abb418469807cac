//! Cross-breeding eligibility.
//!
//! The host's pairing process picks partners and offspring species by stat
//! and attribute similarity. This module only answers whether a tile may
//! take part at all. The answer comes straight from the species'
//! `can_cross` formula and is never cached, so a tile that grows or is
//! harvested is judged by its current state on the next check.

use crate::tile::TileState;

/// Whether a tile may act as a cross-breeding parent.
pub fn can_cross(tile: &TileState) -> bool {
    tile.species().can_cross(tile)
}

/// Filter candidate tiles down to eligible parents.
pub fn eligible_parents<'a, I>(tiles: I) -> impl Iterator<Item = &'a TileState>
where
    I: IntoIterator<Item = &'a TileState>,
{
    tiles.into_iter().filter(|tile| can_cross(tile))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use verdant_types::{CropStats, Environment, ItemStack, StatVector};

    use super::*;
    use crate::growth;
    use crate::rules::{SpeciesRules, StandardRules};
    use crate::species::{Namespace, SpeciesDefinition, SpeciesDescriptor};

    fn species(rules: Box<dyn SpeciesRules>) -> Arc<SpeciesDescriptor> {
        let def = SpeciesDefinition {
            name: String::from("crop"),
            tier: 1,
            stats: StatVector::default(),
            attributes: Vec::new(),
            max_size: 5,
            ..SpeciesDefinition::default()
        };
        Arc::new(SpeciesDescriptor::new(&Namespace::new("test"), def, rules).unwrap())
    }

    #[test]
    fn default_gate_opens_at_size_three() {
        let s = species(Box::new(StandardRules::new(None)));
        for size in 0..=5 {
            let tile = TileState::with_size(Arc::clone(&s), CropStats::default(), size).unwrap();
            assert_eq!(can_cross(&tile), size >= 3, "size {size}");
        }
    }

    #[test]
    fn gate_reflects_growth_immediately() {
        let s = species(Box::new(StandardRules::new(None)));
        let mut tile = TileState::with_size(s, CropStats::default(), 2).unwrap();
        assert!(!can_cross(&tile));

        tile.set_growth_points(199);
        let outcome = growth::evaluate(&mut tile, Environment::new(1.0, 0.0, 0.0)).unwrap();
        assert!(outcome.advanced());
        assert!(can_cross(&tile));
    }

    #[test]
    fn overridden_gate_is_respected() {
        #[derive(Debug)]
        struct Sterile;
        impl SpeciesRules for Sterile {
            fn can_grow(&self, _tile: &TileState) -> bool {
                true
            }
            fn optimal_harvest_size(&self, _tile: &TileState) -> u8 {
                5
            }
            fn can_be_harvested(&self, _tile: &TileState) -> bool {
                false
            }
            fn gain(&self, _tile: &TileState) -> Option<ItemStack> {
                None
            }
            fn can_cross(&self, _tile: &TileState) -> bool {
                false
            }
        }

        let tile =
            TileState::with_size(species(Box::new(Sterile)), CropStats::default(), 5).unwrap();
        assert!(!can_cross(&tile));
    }

    #[test]
    fn eligible_parents_filters_candidates() {
        let s = species(Box::new(StandardRules::new(None)));
        let tiles: Vec<TileState> = (0..=5)
            .map(|size| TileState::with_size(Arc::clone(&s), CropStats::default(), size).unwrap())
            .collect();
        let sizes: Vec<u8> = eligible_parents(&tiles).map(TileState::size).collect();
        assert_eq!(sizes, vec![3, 4, 5]);
    }
}
