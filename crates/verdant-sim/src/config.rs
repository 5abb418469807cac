//! Configuration for the simulation host.
//!
//! The host reads `verdant.yaml` (or the path given as the first argument).
//! Every section is optional and falls back to the defaults below; the
//! embedded `catalogue` section is a [`CatalogueConfig`].

use std::path::Path;

use serde::Deserialize;
use verdant_crops::{CatalogueConfig, ConfigError};
use verdant_types::RenderCapability;

/// Environment variable that overrides `world.seed`.
pub const SEED_ENV_VAR: &str = "VERDANT_SEED";

/// Top-level host configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimConfig {
    /// Run length, seed and render capability.
    #[serde(default)]
    pub world: WorldConfig,

    /// Environment sampled for every plot each tick.
    #[serde(default)]
    pub environment: EnvironmentConfig,

    /// Plot layout and automation.
    #[serde(default)]
    pub field: FieldConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Species to register.
    #[serde(default)]
    pub catalogue: CatalogueConfig,
}

impl SimConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.world.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.world.apply_env_overrides();
        Ok(config)
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable run name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// RNG seed for stats, environment noise and drop rolls.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of ticks to simulate.
    #[serde(default = "default_ticks")]
    pub ticks: u64,

    /// Whether to build sprite tables.
    #[serde(default)]
    pub render: RenderCapability,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            ticks: default_ticks(),
            render: RenderCapability::default(),
        }
    }
}

impl WorldConfig {
    /// Override fields from environment variables when set.
    pub fn apply_env_overrides(&mut self) {
        self.apply_seed_override(std::env::var(SEED_ENV_VAR).ok().as_deref());
    }

    /// Replace the seed with `raw` when it parses as an integer.
    pub fn apply_seed_override(&mut self, raw: Option<&str>) {
        if let Some(seed) = raw.and_then(|value| value.trim().parse().ok()) {
            self.seed = seed;
        }
    }
}

fn default_world_name() -> String {
    "Verdant Field".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_ticks() -> u64 {
    200
}

/// Environment around every plot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnvironmentConfig {
    /// Base humidity.
    #[serde(default = "default_humidity")]
    pub humidity: f32,

    /// Base nutrients.
    #[serde(default = "default_nutrients")]
    pub nutrients: f32,

    /// Base air quality.
    #[serde(default = "default_air")]
    pub air: f32,

    /// Maximum per-term noise added each tick.
    #[serde(default = "default_jitter")]
    pub jitter: f32,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            humidity: default_humidity(),
            nutrients: default_nutrients(),
            air: default_air(),
            jitter: default_jitter(),
        }
    }
}

const fn default_humidity() -> f32 {
    8.0
}

const fn default_nutrients() -> f32 {
    6.0
}

const fn default_air() -> f32 {
    4.0
}

const fn default_jitter() -> f32 {
    2.0
}

/// Plot layout and automation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldConfig {
    /// Number of plots.
    #[serde(default = "default_plots")]
    pub plots: u32,

    /// Species planted round-robin across plots, as `owner:name`.
    #[serde(default = "default_field_species")]
    pub species: Vec<String>,

    /// Harvest with an automated harvester once plots reach optimal size.
    #[serde(default = "default_true")]
    pub auto_harvest: bool,

    /// Pick plots that have started spreading weed.
    #[serde(default = "default_true")]
    pub weeding: bool,

    /// Per-tick chance that weed colonises an empty plot.
    #[serde(default = "default_weed_chance")]
    pub weed_chance: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            plots: default_plots(),
            species: default_field_species(),
            auto_harvest: default_true(),
            weeding: default_true(),
            weed_chance: default_weed_chance(),
        }
    }
}

const fn default_plots() -> u32 {
    9
}

fn default_field_species() -> Vec<String> {
    vec!["verdant:weed".to_owned()]
}

const fn default_true() -> bool {
    true
}

const fn default_weed_chance() -> f64 {
    0.05
}

/// Log output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sane_values() {
        let config = SimConfig::default();
        assert_eq!(config.world.seed, 42);
        assert_eq!(config.world.ticks, 200);
        assert_eq!(config.world.render, RenderCapability::Headless);
        assert_eq!(config.field.plots, 9);
        assert_eq!(config.field.species, vec!["verdant:weed"]);
        assert!(config.catalogue.include_weed);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
world:
  name: Test Field
  seed: 7
  ticks: 50
  render: Render
environment:
  humidity: 10
  nutrients: 5
  air: 2.5
  jitter: 0
field:
  plots: 4
  species: ['farmcraft:wheat']
  auto_harvest: false
  weed_chance: 0.5
logging:
  level: debug
  json: true
catalogue:
  namespace: farmcraft
  species:
    - { name: wheat, tier: 1, max_size: 4, gain_item: wheat }
";
        let config = SimConfig::parse(yaml).unwrap();
        assert_eq!(config.world.name, "Test Field");
        assert_eq!(config.world.ticks, 50);
        assert_eq!(config.world.render, RenderCapability::Render);
        assert_eq!(config.environment.air, 2.5);
        assert_eq!(config.environment.jitter, 0.0);
        assert_eq!(config.field.plots, 4);
        assert!(!config.field.auto_harvest);
        assert!(config.field.weeding);
        assert_eq!(config.field.weed_chance, 0.5);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.catalogue.species.len(), 1);
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = SimConfig::parse("field:\n  plots: 2\n").unwrap();
        assert_eq!(config.field.plots, 2);
        assert_eq!(config.environment, EnvironmentConfig::default());
    }

    #[test]
    fn seed_override() {
        let mut world = WorldConfig::default();
        world.apply_seed_override(Some(" 99 "));
        assert_eq!(world.seed, 99);
        world.apply_seed_override(Some("not-a-number"));
        assert_eq!(world.seed, 99);
        world.apply_seed_override(None);
        assert_eq!(world.seed, 99);
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        assert!(matches!(
            SimConfig::parse("world: [unclosed"),
            Err(ConfigError::Yaml { .. })
        ));
    }
}
