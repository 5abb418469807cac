//! Core data structs shared between the rule core and its host.
//!
//! Covers species identity and stat vectors, the per-plant genetic stats,
//! environmental input, collision context, item and seed stacks, and the
//! persisted form of a tile.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::StatKind;
use crate::ids::LegacyId;

/// Upper bound of each per-plant genetic stat (growth, gain, resistance).
pub const STAT_MAX: u8 = 31;

// ---------------------------------------------------------------------------
// Species identity
// ---------------------------------------------------------------------------

/// Unique identity of a species: the owning extension's namespace plus a
/// name unique within that namespace.
///
/// Saved tiles refer to their species by identity, so renaming either part
/// orphans existing tiles of that species.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SpeciesIdentity {
    /// Namespace of the extension that owns the species.
    pub owner: String,
    /// Name unique within `owner`.
    pub name: String,
}

impl SpeciesIdentity {
    /// Build an identity from its two parts.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl core::fmt::Display for SpeciesIdentity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}", self.owner, self.name)
    }
}

// ---------------------------------------------------------------------------
// Stat vector
// ---------------------------------------------------------------------------

/// The five breeding-similarity stats of a species.
///
/// Only used as a similarity signal by the external partner-selection
/// process; the rule core itself never reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StatVector {
    /// Chemical / industrial value.
    pub chemistry: u32,
    /// Food value.
    pub consumable: u32,
    /// Defensive or special abilities.
    pub defensive: u32,
    /// Aesthetic value.
    pub colorful: u32,
    /// How weed-like the species behaves.
    pub weed_like: u32,
}

impl StatVector {
    /// Build a stat vector from values in slot order.
    pub const fn new(
        chemistry: u32,
        consumable: u32,
        defensive: u32,
        colorful: u32,
        weed_like: u32,
    ) -> Self {
        Self {
            chemistry,
            consumable,
            defensive,
            colorful,
            weed_like,
        }
    }

    /// Value of a named slot.
    pub const fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Chemistry => self.chemistry,
            StatKind::Consumable => self.consumable,
            StatKind::Defensive => self.defensive,
            StatKind::Colorful => self.colorful,
            StatKind::WeedLike => self.weed_like,
        }
    }

    /// Value at a raw slot index; `None` when the index is out of range.
    pub const fn by_index(&self, index: usize) -> Option<u32> {
        match StatKind::from_index(index) {
            Some(kind) => Some(self.get(kind)),
            None => None,
        }
    }
}

impl From<[u32; 5]> for StatVector {
    fn from(v: [u32; 5]) -> Self {
        let [chemistry, consumable, defensive, colorful, weed_like] = v;
        Self::new(chemistry, consumable, defensive, colorful, weed_like)
    }
}

// ---------------------------------------------------------------------------
// Per-plant genetic stats
// ---------------------------------------------------------------------------

/// Genetic stats of one planted crop, each in `0..=STAT_MAX`.
///
/// Carried by the tile and by the seeds it drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CropStats {
    /// Growth-rate stat. High values make a plant weed-like.
    pub growth: u8,
    /// Gain stat, the yield quality passed on to seeds.
    pub gain: u8,
    /// Resistance stat.
    pub resistance: u8,
}

impl CropStats {
    /// Build a stat triple, clamping each value to [`STAT_MAX`].
    pub fn new(growth: u8, gain: u8, resistance: u8) -> Self {
        Self {
            growth: growth.min(STAT_MAX),
            gain: gain.min(STAT_MAX),
            resistance: resistance.min(STAT_MAX),
        }
    }
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Environmental signal supplied by the host for one tile on one tick.
///
/// Each value conventionally ranges over 0--30. Any non-negative value is
/// accepted; negative values are treated as zero by the growth formula.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Environment {
    /// Ground humidity, raised by hydration.
    pub humidity: f32,
    /// Nutrient quality of the ground, raised by fertilizer.
    pub nutrients: f32,
    /// Air quality, raised by open space around the plant.
    pub air: f32,
}

impl Environment {
    /// Build an environment sample.
    pub const fn new(humidity: f32, nutrients: f32, air: f32) -> Self {
        Self {
            humidity,
            nutrients,
            air,
        }
    }
}

// ---------------------------------------------------------------------------
// Collision context
// ---------------------------------------------------------------------------

/// What the host knows about an entity that walked into a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EntityContact {
    /// The entity is a living creature (not an item, projectile, cart...).
    pub living: bool,
    /// The entity is sprinting.
    pub sprinting: bool,
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Seed bag contents: which species and the genetics it will plant with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SeedData {
    /// Species the seed plants.
    pub species: SpeciesIdentity,
    /// Genetic stats inherited from the picked plant.
    pub stats: CropStats,
    /// How far the seed has been analysed.
    pub scan_level: u8,
}

/// What an item stack contains.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ItemKind {
    /// A harvested product, named by the host's item catalogue.
    Produce {
        /// Host item name.
        name: String,
    },
    /// A seed bag.
    Seed(SeedData),
}

/// A stack of identical items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ItemStack {
    /// What the stack holds.
    pub item: ItemKind,
    /// How many.
    pub count: u32,
}

impl ItemStack {
    /// A stack of a named produce item.
    pub fn produce(name: impl Into<String>, count: u32) -> Self {
        Self {
            item: ItemKind::Produce { name: name.into() },
            count,
        }
    }

    /// A single seed bag.
    pub const fn seed(seed: SeedData) -> Self {
        Self {
            item: ItemKind::Seed(seed),
            count: 1,
        }
    }

    /// Whether this stack is a seed bag.
    pub const fn is_seed(&self) -> bool {
        matches!(self.item, ItemKind::Seed(_))
    }
}

// ---------------------------------------------------------------------------
// Tile record
// ---------------------------------------------------------------------------

/// Persisted form of a tile.
///
/// New records are written with `identity` set and `legacy_id` empty. Old
/// saves may carry only a `legacy_id`; it is read for compatibility and
/// never written going forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TileRecord {
    /// Species identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<SpeciesIdentity>,
    /// Save-compatibility species id from before identities existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<LegacyId>,
    /// Growth stage.
    pub size: u8,
    /// Accumulated growth points toward the next stage.
    pub growth_points: u32,
    /// Genetic stats.
    pub stats: CropStats,
    /// How far the plant has been analysed.
    pub scan_level: u8,
}
