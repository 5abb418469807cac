//! Headless host for the Verdant crop engine.
//!
//! Loads `verdant.yaml`, registers the catalogue, plants a field and runs
//! it for the configured number of ticks, logging what the crop engine
//! decided along the way.
//!
//! # Startup Sequence
//!
//! 1. Load configuration (first argument, else `verdant.yaml`, else defaults)
//! 2. Initialize structured logging (tracing)
//! 3. Build the species registry from the catalogue
//! 4. Plant the field
//! 5. Run the tick loop
//! 6. Log totals and final plot state

mod config;
mod error;
mod field;

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingConfig, SimConfig};
use crate::error::SimError;
use crate::field::{Field, TickReport};

/// Default configuration path.
const CONFIG_PATH: &str = "verdant.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, registration or a tick fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, loaded_from) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("verdant-sim starting");
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        ticks = config.world.ticks,
        render = ?config.world.render,
        source = loaded_from.as_deref().unwrap_or("defaults"),
        "Configuration loaded"
    );

    // 3. Build the species registry.
    let registry = config.catalogue.build_registry().map_err(SimError::from)?;
    for (legacy_id, species) in registry.iter() {
        debug!(
            %legacy_id,
            species = %species.identity(),
            tier = species.tier(),
            max_size = species.max_size(),
            description = species.desc(0),
            "Registered species"
        );
    }

    // 4. Plant the field.
    let mut rng = SmallRng::seed_from_u64(config.world.seed);
    let mut field = Field::plant(
        &registry,
        &config.field,
        config.environment.clone(),
        &mut rng,
    )?;

    // 5. Run the tick loop.
    let mut totals = TickReport::default();
    for tick in 1..=config.world.ticks {
        let report = field.tick(&mut rng)?;
        if !report.is_quiet() {
            debug!(
                tick,
                advanced = report.advanced,
                harvested = report.harvested,
                weeded = report.weeded,
                colonised = report.colonised,
                items = report.items,
                "Tick complete"
            );
        }
        totals.absorb(report);
    }

    // 6. Log the result.
    info!(
        ticks = config.world.ticks,
        advanced = totals.advanced,
        harvested = totals.harvested,
        weeded = totals.weeded,
        colonised = totals.colonised,
        items = totals.items,
        "Simulation finished"
    );
    let sprites = field.sprites(config.world.render);
    for (plot, (_, sprite)) in field.plots().iter().zip(sprites) {
        let tile = plot.tile();
        info!(
            tile = %plot.id(),
            species = %tile.species().identity(),
            size = tile.size(),
            growth_points = tile.growth_points(),
            sprite = sprite.as_deref().unwrap_or("-"),
            "Final plot state"
        );
    }
    debug!(records = field.records().len(), "Plot records ready to persist");

    Ok(())
}

/// Load configuration from the first argument or `verdant.yaml`.
///
/// Falls back to defaults when no file exists. Returns the path the
/// configuration was read from, if any.
fn load_config() -> Result<(SimConfig, Option<String>), SimError> {
    let path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(CONFIG_PATH), PathBuf::from);
    if path.exists() {
        let config = SimConfig::from_file(&path)?;
        Ok((config, Some(path.display().to_string())))
    } else {
        let mut config = SimConfig::default();
        config.world.apply_env_overrides();
        Ok((config, None))
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
