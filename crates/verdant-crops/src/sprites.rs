//! Per-species sprite tables.
//!
//! A species has one sprite per growth stage. Tables are only built when
//! the host can render; a headless host never asks for textures.

use verdant_types::RenderCapability;

use crate::species::SpeciesDescriptor;
use crate::tile::TileState;

/// Texture key of one growth stage, `"{owner}:crop/{name}.{stage}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpriteKey(String);

impl SpriteKey {
    /// Key for `stage` (1-based) of `species`.
    pub fn for_stage(species: &SpeciesDescriptor, stage: u8) -> Self {
        Self(format!(
            "{}:crop/{}.{stage}",
            species.owner(),
            species.name()
        ))
    }

    /// The key as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for SpriteKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sprite table index for a tile size; `None` for size 0 or past the last
/// stage.
pub fn sprite_index(size: u8, max_size: u8) -> Option<usize> {
    if size == 0 || size > max_size {
        return None;
    }
    Some(usize::from(size.saturating_sub(1)))
}

/// One sprite per growth stage of a species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteTable {
    max_size: u8,
    sprites: Vec<SpriteKey>,
}

impl SpriteTable {
    /// Build the table, or `None` when the host cannot render.
    pub fn for_species(species: &SpeciesDescriptor, capability: RenderCapability) -> Option<Self> {
        if !capability.can_render() {
            return None;
        }
        let sprites = (1..=species.max_size())
            .map(|stage| SpriteKey::for_stage(species, stage))
            .collect();
        Some(Self {
            max_size: species.max_size(),
            sprites,
        })
    }

    /// Sprite for a tile size.
    pub fn sprite(&self, size: u8) -> Option<&SpriteKey> {
        sprite_index(size, self.max_size).and_then(|index| self.sprites.get(index))
    }

    /// Sprite for a tile's current size.
    pub fn sprite_for(&self, tile: &TileState) -> Option<&SpriteKey> {
        self.sprite(tile.size())
    }

    /// Number of stages.
    pub const fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Whether the table is empty.
    pub const fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
