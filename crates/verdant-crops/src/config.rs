//! Data-driven species catalogues.
//!
//! Hosts that do not need custom formulas can describe plain crops in YAML
//! and register them with [`StandardRules`]:
//!
//! ```yaml
//! namespace: farmcraft
//! species:
//!   - name: wheat
//!     tier: 1
//!     stats: [0, 4, 0, 0, 2]
//!     attributes: [Yellow, Food, Wheat]
//!     max_size: 7
//!     gain_item: wheat
//! ```

use std::path::Path;

use serde::Deserialize;
use verdant_types::{LegacyId, StatVector};

use crate::error::CropError;
use crate::registry::{RegistryBuilder, SpeciesRegistry};
use crate::rules::StandardRules;
use crate::species::{Namespace, SpeciesDefinition, SpeciesDescriptor};

/// Errors that can occur when loading a catalogue.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the catalogue file from disk.
    #[error("failed to read catalogue file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse catalogue YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// A YAML species catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogueConfig {
    /// Namespace for entries that do not name their own.
    #[serde(default)]
    pub namespace: Option<String>,

    /// Register the built-in weed before the catalogue's species.
    #[serde(default = "default_include_weed")]
    pub include_weed: bool,

    /// Species in registration order.
    #[serde(default)]
    pub species: Vec<SpeciesEntry>,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            namespace: None,
            include_weed: default_include_weed(),
            species: Vec::new(),
        }
    }
}

const fn default_include_weed() -> bool {
    true
}

/// One data-driven species.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpeciesEntry {
    /// Owning namespace, overriding the catalogue's.
    #[serde(default)]
    pub namespace: Option<String>,

    /// Species name.
    pub name: String,

    /// Tier, `0..=16`.
    #[serde(default)]
    pub tier: u8,

    /// Chemistry, consumable, defensive, colorful and weed-like stats.
    #[serde(default)]
    pub stats: [u32; 5],

    /// Attribute tags.
    #[serde(default)]
    pub attributes: Vec<String>,

    /// Number of growth stages.
    pub max_size: u8,

    /// Produce item yielded per gain drop.
    #[serde(default)]
    pub gain_item: Option<String>,

    /// Label shown to players.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Discovery credit.
    #[serde(default)]
    pub discovered_by: Option<String>,
}

impl SpeciesEntry {
    /// Build the descriptor for this entry.
    ///
    /// Without a namespace on either the entry or the catalogue, the
    /// species is owned by the fallback namespace.
    ///
    /// # Errors
    ///
    /// Propagates descriptor validation errors.
    pub fn descriptor(
        &self,
        default_namespace: Option<&str>,
    ) -> Result<SpeciesDescriptor, CropError> {
        let namespace = Namespace::from_context(self.namespace.as_deref().or(default_namespace));
        let definition = SpeciesDefinition {
            name: self.name.clone(),
            tier: self.tier,
            stats: StatVector::from(self.stats),
            attributes: self.attributes.clone(),
            max_size: self.max_size,
            display_name: self.display_name.clone(),
            discovered_by: self.discovered_by.clone(),
        };
        SpeciesDescriptor::new(
            &namespace,
            definition,
            Box::new(StandardRules::new(self.gain_item.as_deref())),
        )
    }
}

impl CatalogueConfig {
    /// Load a catalogue from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&contents)?;
        Ok(config)
    }

    /// Parse a catalogue from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Register every entry, in order, and return their legacy ids.
    ///
    /// The weed is not registered here even when `include_weed` is set;
    /// use [`Self::build_registry`] or [`RegistryBuilder::with_builtins`].
    ///
    /// # Errors
    ///
    /// Stops at the first invalid or duplicate entry.
    pub fn register_into(&self, builder: &mut RegistryBuilder) -> Result<Vec<LegacyId>, CropError> {
        let ids = self
            .species
            .iter()
            .map(|entry| builder.register(entry.descriptor(self.namespace.as_deref())?))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(species = ids.len(), "Catalogue registered");
        Ok(ids)
    }

    /// Build a sealed registry from this catalogue.
    ///
    /// # Errors
    ///
    /// Same as [`Self::register_into`].
    pub fn build_registry(&self) -> Result<SpeciesRegistry, CropError> {
        let mut builder = if self.include_weed {
            RegistryBuilder::with_builtins()?
        } else {
            RegistryBuilder::new()
        };
        self.register_into(&mut builder)?;
        Ok(builder.build())
    }
}
