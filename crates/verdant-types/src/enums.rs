//! Enumeration types for the crop rule engine.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Species stat slots
// ---------------------------------------------------------------------------

/// One of the five fixed slots of a species stat vector.
///
/// Stats describe a species for cross-breeding: species sharing stats and
/// attributes tend to cross more often. The discriminant is the slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum StatKind {
    /// Industrial uses based on chemical plant components.
    Chemistry = 0,
    /// Food, potion ingredients, anything meant to be eaten.
    Consumable = 1,
    /// Damaging, explosive or otherwise special abilities.
    Defensive = 2,
    /// Aesthetic value, dye plants and plants without real effects.
    Colorful = 3,
    /// Unwanted, quick-spreading behaviour. Rare breeds score low here.
    WeedLike = 4,
}

impl StatKind {
    /// All slots in index order.
    pub const ALL: [Self; 5] = [
        Self::Chemistry,
        Self::Consumable,
        Self::Defensive,
        Self::Colorful,
        Self::WeedLike,
    ];

    /// Map a slot index to its stat, `None` past the last slot.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Chemistry),
            1 => Some(Self::Consumable),
            2 => Some(Self::Defensive),
            3 => Some(Self::Colorful),
            4 => Some(Self::WeedLike),
            _ => None,
        }
    }

    /// Slot index of this stat.
    pub const fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// Render capability
// ---------------------------------------------------------------------------

/// Whether the calling context can allocate and draw sprites.
///
/// Headless hosts (servers, tests, batch simulation) never build sprite
/// tables; the same descriptor type is used in both contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum RenderCapability {
    /// No rendering. Sprite queries return nothing.
    #[default]
    Headless,
    /// Sprite tables are built and consulted.
    Render,
}

impl RenderCapability {
    /// Whether sprite tables should be built.
    pub const fn can_render(self) -> bool {
        matches!(self, Self::Render)
    }
}

// ---------------------------------------------------------------------------
// Harvest mode
// ---------------------------------------------------------------------------

/// Who is harvesting a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum HarvestMode {
    /// A player click. Harvests whenever the species allows it.
    #[default]
    Manual,
    /// An automated harvester. Additionally waits for the species'
    /// optimal harvest size.
    Optimal,
}
