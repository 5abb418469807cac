//! Mutable per-location plant state.
//!
//! A [`TileState`] is owned by exactly one world location. It references
//! its species through a shared [`Arc`] and carries the stage (`size`), the
//! growth accumulator, the plant's genetic stats and its scan level.
//!
//! Invariant: `size <= species.max_size()`. Size 0 means the location
//! holds no visible plant.

use std::sync::Arc;

use rand::RngCore;
use verdant_types::{CropStats, SeedData, TileRecord};

use crate::error::CropError;
use crate::harvest::ActionOutcome;
use crate::registry::SpeciesRegistry;
use crate::species::SpeciesDescriptor;

/// Plant state at one world location.
#[derive(Debug, Clone)]
pub struct TileState {
    species: Arc<SpeciesDescriptor>,
    size: u8,
    growth_points: u32,
    stats: CropStats,
    scan_level: u8,
}

impl TileState {
    /// A freshly planted tile at size 1.
    pub const fn plant(species: Arc<SpeciesDescriptor>, stats: CropStats) -> Self {
        Self {
            species,
            size: 1,
            growth_points: 0,
            stats,
            scan_level: 0,
        }
    }

    /// A tile at an explicit size.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::SizeOutOfRange`] if `size` exceeds the species'
    /// max size.
    pub fn with_size(
        species: Arc<SpeciesDescriptor>,
        stats: CropStats,
        size: u8,
    ) -> Result<Self, CropError> {
        let mut tile = Self::plant(species, stats);
        tile.set_size(size)?;
        Ok(tile)
    }

    /// A size-0 probe used to ask whether `species` may spread onto an
    /// empty location.
    pub const fn probe(species: Arc<SpeciesDescriptor>) -> Self {
        Self {
            species,
            size: 0,
            growth_points: 0,
            stats: CropStats {
                growth: 0,
                gain: 0,
                resistance: 0,
            },
            scan_level: 0,
        }
    }

    /// Plant a seed bag.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::NotFound`] if the seed's species is not
    /// registered.
    pub fn from_seed(seed: &SeedData, registry: &SpeciesRegistry) -> Result<Self, CropError> {
        let species = registry.get(&seed.species)?;
        let mut tile = Self::plant(Arc::clone(species), seed.stats);
        tile.scan_level = seed.scan_level;
        Ok(tile)
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    /// The species growing here.
    pub const fn species(&self) -> &Arc<SpeciesDescriptor> {
        &self.species
    }

    /// Current growth stage.
    pub const fn size(&self) -> u8 {
        self.size
    }

    /// Growth points accumulated toward the next stage.
    pub const fn growth_points(&self) -> u32 {
        self.growth_points
    }

    /// The plant's genetic stats.
    pub const fn stats(&self) -> CropStats {
        self.stats
    }

    /// Resistance stat.
    pub const fn resistance(&self) -> u8 {
        self.stats.resistance
    }

    /// How far the plant has been analysed.
    pub const fn scan_level(&self) -> u8 {
        self.scan_level
    }

    /// Whether the location holds no visible plant.
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Whether the plant has reached its species' max size.
    pub fn is_mature(&self) -> bool {
        self.size >= self.species.max_size()
    }

    // -------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------

    /// Set the growth stage.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::SizeOutOfRange`] if `size` exceeds the species'
    /// max size; the tile is left unchanged.
    pub fn set_size(&mut self, size: u8) -> Result<(), CropError> {
        let max_size = self.species.max_size();
        if size > max_size {
            return Err(CropError::SizeOutOfRange {
                species: self.species.identity().clone(),
                size,
                max_size,
            });
        }
        self.size = size;
        Ok(())
    }

    /// Overwrite the growth accumulator.
    pub const fn set_growth_points(&mut self, points: u32) {
        self.growth_points = points;
    }

    /// Record a deeper analysis of the plant.
    pub const fn set_scan_level(&mut self, level: u8) {
        self.scan_level = level;
    }

    /// Revert to the empty (picked) state.
    pub const fn clear(&mut self) {
        self.size = 0;
        self.growth_points = 0;
    }

    // -------------------------------------------------------------------
    // Input dispatch
    // -------------------------------------------------------------------

    /// Route a player right-click to the species.
    pub fn right_click(&mut self, rng: &mut dyn RngCore) -> Result<ActionOutcome, CropError> {
        let species = Arc::clone(&self.species);
        species.rules().right_click(self, rng)
    }

    /// Route a player left-click to the species.
    pub fn left_click(&mut self, rng: &mut dyn RngCore) -> Result<ActionOutcome, CropError> {
        let species = Arc::clone(&self.species);
        species.rules().left_click(self, rng)
    }

    /// Run the species' per-tick hook.
    pub fn run_tick_hook(&mut self) {
        let species = Arc::clone(&self.species);
        species.rules().on_tick(self);
    }

    /// Notify the species that a neighbouring block changed.
    pub fn neighbour_changed(&self) {
        self.species.rules().on_neighbour_change(self);
    }

    /// Notify the species that the host is removing this tile.
    pub fn destroyed(&self) {
        self.species.rules().on_destroyed(self);
    }

    // -------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------

    /// The record to persist for this tile. Never carries a legacy id.
    pub fn to_record(&self) -> TileRecord {
        TileRecord {
            identity: Some(self.species.identity().clone()),
            legacy_id: None,
            size: self.size,
            growth_points: self.growth_points,
            stats: self.stats,
            scan_level: self.scan_level,
        }
    }

    /// Restore a tile from a record, resolving its species through the
    /// registry. An identity takes precedence over a legacy id.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::MissingSpecies`] if the record names no
    /// species, [`CropError::NotFound`] if it is not registered, or
    /// [`CropError::SizeOutOfRange`] if the stored size is too large.
    pub fn from_record(record: &TileRecord, registry: &SpeciesRegistry) -> Result<Self, CropError> {
        let species = match (&record.identity, record.legacy_id) {
            (Some(identity), _) => registry.get(identity)?,
            (None, Some(id)) => registry.lookup_legacy(id)?,
            (None, None) => return Err(CropError::MissingSpecies),
        };
        let mut tile = Self::with_size(Arc::clone(species), record.stats, record.size)?;
        tile.growth_points = record.growth_points;
        tile.scan_level = record.scan_level;
        Ok(tile)
    }
}
