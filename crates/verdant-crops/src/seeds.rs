//! Seed generation.
//!
//! A seed bag carries the species identity plus the genetics of the plant
//! it was picked from, so planting it reproduces that plant.

use verdant_types::{ItemStack, SeedData};

use crate::tile::TileState;

/// Seed data describing the plant on `tile`.
pub fn seed_data(tile: &TileState) -> SeedData {
    SeedData {
        species: tile.species().identity().clone(),
        stats: tile.stats(),
        scan_level: tile.scan_level(),
    }
}

/// One seed bag from `tile`.
pub fn generate(tile: &TileState) -> ItemStack {
    ItemStack::seed(seed_data(tile))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::unreachable)]
mod tests {
    use std::sync::Arc;

    use verdant_types::{CropStats, ItemKind, SpeciesIdentity};

    use super::*;

    #[test]
    fn seeds_carry_identity_and_genetics() {
        let weed = Arc::new(crate::weed::species().unwrap());
        let mut tile = TileState::with_size(weed, CropStats::new(7, 8, 9), 3).unwrap();
        tile.set_scan_level(2);

        let stack = generate(&tile);
        assert_eq!(stack.count, 1);
        let ItemKind::Seed(seed) = stack.item else {
            unreachable!("generate always yields a seed bag");
        };
        assert_eq!(seed.species, SpeciesIdentity::new("verdant", "weed"));
        assert_eq!(seed.stats, CropStats::new(7, 8, 9));
        assert_eq!(seed.scan_level, 2);
    }
}
