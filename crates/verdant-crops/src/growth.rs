//! Per-tick growth evaluation.
//!
//! Each tick the host hands every planted tile the environment sample for
//! its location. The tile accumulates `weight_influences` growth points;
//! once `can_grow` holds and the accumulator reaches `growth_duration`, the
//! accumulator resets and the tile advances one stage.
//!
//! Only tiles with `1 <= size < max_size` grow through this path. Spreading
//! onto an empty location is decided by the host's colonisation process,
//! which asks [`can_colonize`].

use std::sync::Arc;

use verdant_types::Environment;

use crate::error::CropError;
use crate::species::SpeciesDescriptor;
use crate::tile::TileState;

/// What one growth evaluation did to a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthOutcome {
    /// The tile is empty or already at max size; nothing changed.
    Skipped,
    /// Growth points were added but the tile did not advance.
    Accumulated {
        /// Accumulator after this tick.
        growth_points: u32,
    },
    /// The tile advanced one stage and its accumulator was reset.
    Advanced {
        /// Size after this tick.
        size: u8,
    },
}

impl GrowthOutcome {
    /// Whether the tile changed stage.
    pub const fn advanced(self) -> bool {
        matches!(self, Self::Advanced { .. })
    }
}

/// Evaluate one tick of growth for a tile.
///
/// The accumulator saturates at `u32::MAX`, so any non-negative
/// environment is accepted.
///
/// # Errors
///
/// Returns [`CropError::SizeOutOfRange`] only if the species' max size
/// changed under the tile, which descriptors do not allow.
pub fn evaluate(tile: &mut TileState, env: Environment) -> Result<GrowthOutcome, CropError> {
    let species = Arc::clone(tile.species());
    let max_size = species.max_size();
    if tile.is_empty() || tile.size() >= max_size {
        return Ok(GrowthOutcome::Skipped);
    }

    let influence = species.weight_influences(tile, env);
    let points = tile.growth_points().saturating_add(influence);
    tile.set_growth_points(points);

    if species.can_grow(tile) && points >= species.growth_duration(tile) {
        let size = tile.size().saturating_add(1).min(max_size);
        tile.set_size(size)?;
        tile.set_growth_points(0);
        tracing::debug!(
            species = %species.identity(),
            size,
            "Tile advanced a growth stage"
        );
        return Ok(GrowthOutcome::Advanced { size });
    }

    Ok(GrowthOutcome::Accumulated {
        growth_points: points,
    })
}

/// Run the species' tick hook, then evaluate growth.
///
/// # Errors
///
/// Same as [`evaluate`].
pub fn tick(tile: &mut TileState, env: Environment) -> Result<GrowthOutcome, CropError> {
    tile.run_tick_hook();
    evaluate(tile, env)
}

/// Whether `species` may spread onto an empty location.
///
/// Asks `can_grow` about a size-0 probe tile.
pub fn can_colonize(species: &Arc<SpeciesDescriptor>) -> bool {
    let probe = TileState::probe(Arc::clone(species));
    species.can_grow(&probe)
}
