//! A small field of plots driven by the crop engine.
//!
//! Each plot pairs a host-side [`TileId`] with a [`TileState`]. Per tick
//! the field samples a noisy environment for every plot, runs the species'
//! tick hook and growth, then applies the configured automation: optimal
//! harvesting, weeding, and weed colonisation of empty plots.

use std::sync::Arc;

use rand::Rng;
use rand::rngs::SmallRng;
use verdant_crops::{SpeciesDescriptor, SpeciesRegistry, SpriteTable, TileState, growth, harvest};
use verdant_types::{
    CropStats, Environment, HarvestMode, RenderCapability, STAT_MAX, TileId, TileRecord,
};

use crate::config::{EnvironmentConfig, FieldConfig};
use crate::error::SimError;

/// One plot of the field.
#[derive(Debug, Clone)]
pub struct Plot {
    id: TileId,
    tile: TileState,
}

impl Plot {
    /// Host-side handle of the plot.
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// Plant state of the plot.
    pub const fn tile(&self) -> &TileState {
        &self.tile
    }
}

/// Counters for one tick, or a whole run when accumulated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Plots that advanced a growth stage.
    pub advanced: u32,
    /// Plots harvested by the automated harvester.
    pub harvested: u32,
    /// Items dropped by harvests and picks.
    pub items: u32,
    /// Plots picked because they were spreading weed.
    pub weeded: u32,
    /// Empty plots taken over by weed.
    pub colonised: u32,
}

impl TickReport {
    /// Add another report's counters to this one.
    pub const fn absorb(&mut self, other: Self) {
        self.advanced = self.advanced.saturating_add(other.advanced);
        self.harvested = self.harvested.saturating_add(other.harvested);
        self.items = self.items.saturating_add(other.items);
        self.weeded = self.weeded.saturating_add(other.weeded);
        self.colonised = self.colonised.saturating_add(other.colonised);
    }

    /// Whether anything happened.
    pub const fn is_quiet(&self) -> bool {
        self.advanced == 0
            && self.harvested == 0
            && self.items == 0
            && self.weeded == 0
            && self.colonised == 0
    }
}

/// The simulated field.
#[derive(Debug)]
pub struct Field {
    plots: Vec<Plot>,
    environment: EnvironmentConfig,
    auto_harvest: bool,
    weeding: bool,
    weed_chance: f64,
    weed: Option<Arc<SpeciesDescriptor>>,
}

impl Field {
    /// Plant a field, cycling through the configured species.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoSpecies`] if the field lists no species,
    /// [`SimError::InvalidSpecies`] for a malformed reference, or a
    /// [`SimError::Crop`] lookup error for an unregistered one.
    pub fn plant(
        registry: &SpeciesRegistry,
        config: &FieldConfig,
        environment: EnvironmentConfig,
        rng: &mut SmallRng,
    ) -> Result<Self, SimError> {
        let species = config
            .species
            .iter()
            .map(|reference| resolve(registry, reference))
            .collect::<Result<Vec<_>, _>>()?;
        if species.is_empty() {
            return Err(SimError::NoSpecies);
        }

        let plots = species
            .iter()
            .cycle()
            .take(usize::try_from(config.plots).unwrap_or(usize::MAX))
            .map(|s| Plot {
                id: TileId::new(),
                tile: TileState::plant(Arc::clone(s), random_stats(rng)),
            })
            .collect::<Vec<_>>();

        tracing::info!(
            plots = plots.len(),
            species = species.len(),
            "Field planted"
        );

        Ok(Self {
            plots,
            environment,
            auto_harvest: config.auto_harvest,
            weeding: config.weeding,
            weed_chance: probability(config.weed_chance),
            weed: registry.weed().cloned(),
        })
    }

    /// Advance every plot by one tick.
    ///
    /// # Errors
    ///
    /// Propagates crop engine errors.
    pub fn tick(&mut self, rng: &mut SmallRng) -> Result<TickReport, SimError> {
        let mut report = TickReport::default();

        for plot in &mut self.plots {
            if plot.tile.is_empty() {
                let chance = self.weed_chance;
                let colonist = self
                    .weed
                    .as_ref()
                    .filter(|weed| growth::can_colonize(weed) && rng.random_bool(chance));
                if let Some(weed) = colonist {
                    plot.tile = TileState::plant(Arc::clone(weed), CropStats::default());
                    report.colonised = report.colonised.saturating_add(1);
                    tracing::debug!(tile = %plot.id, "Weed colonised empty plot");
                }
                continue;
            }

            let env = sample_environment(&self.environment, rng);
            if growth::tick(&mut plot.tile, env)?.advanced() {
                report.advanced = report.advanced.saturating_add(1);
            }

            let species = Arc::clone(plot.tile.species());
            if self.weeding && species.is_weed(&plot.tile) {
                let outcome = plot.tile.left_click(rng)?;
                if outcome.cleared {
                    plot.tile.destroyed();
                }
                report.weeded = report.weeded.saturating_add(1);
                report.items = report.items.saturating_add(outcome.item_count());
                tracing::debug!(tile = %plot.id, species = %species.identity(), "Plot weeded");
                continue;
            }

            if self.auto_harvest {
                let outcome = harvest::harvest(&mut plot.tile, HarvestMode::Optimal, rng)?;
                if outcome.changed {
                    report.harvested = report.harvested.saturating_add(1);
                    report.items = report.items.saturating_add(outcome.item_count());
                }
            }
        }

        Ok(report)
    }

    /// All plots in planting order.
    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    /// Persistable records of every plot.
    pub fn records(&self) -> Vec<(TileId, TileRecord)> {
        self.plots
            .iter()
            .map(|plot| (plot.id, plot.tile.to_record()))
            .collect()
    }

    /// Current sprite of every plot, `None` for headless hosts and empty
    /// plots.
    pub fn sprites(&self, capability: RenderCapability) -> Vec<(TileId, Option<String>)> {
        self.plots
            .iter()
            .map(|plot| {
                let sprite = SpriteTable::for_species(plot.tile.species(), capability)
                    .and_then(|table| table.sprite_for(&plot.tile).map(ToString::to_string));
                (plot.id, sprite)
            })
            .collect()
    }
}

/// Resolve an `owner:name` reference.
fn resolve(
    registry: &SpeciesRegistry,
    reference: &str,
) -> Result<Arc<SpeciesDescriptor>, SimError> {
    let (owner, name) = reference
        .split_once(':')
        .ok_or_else(|| SimError::InvalidSpecies {
            value: reference.to_owned(),
        })?;
    Ok(Arc::clone(registry.lookup(owner, name)?))
}

/// Clamp a configured chance into `0..=1`; non-finite values disable it.
fn probability(chance: f64) -> f64 {
    if chance.is_finite() {
        chance.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn random_stats(rng: &mut SmallRng) -> CropStats {
    CropStats::new(
        rng.random_range(1..=STAT_MAX),
        rng.random_range(1..=STAT_MAX),
        rng.random_range(1..=STAT_MAX),
    )
}

fn sample_environment(config: &EnvironmentConfig, rng: &mut SmallRng) -> Environment {
    let mut noise = || {
        if config.jitter.is_finite() && config.jitter > 0.0 {
            rng.random_range(-config.jitter..=config.jitter)
        } else {
            0.0
        }
    };
    Environment::new(
        config.humidity + noise(),
        config.nutrients + noise(),
        config.air + noise(),
    )
}
