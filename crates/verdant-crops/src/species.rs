//! Species descriptors: the immutable rule set of one plant kind.
//!
//! A [`SpeciesDescriptor`] pairs per-species data (identity, tier, stats,
//! attributes, max size) with a boxed [`SpeciesRules`] implementation that
//! supplies the formulas. Descriptors are built once during host start-up,
//! registered, and shared by every tile of that species through an
//! [`Arc`](std::sync::Arc).

use verdant_types::{EntityContact, Environment, ItemStack, SpeciesIdentity, StatVector};

use crate::error::CropError;
use crate::rules::SpeciesRules;
use crate::tile::TileState;
use crate::weed;

/// Highest permitted species tier. Tier 0 is the weed.
pub const MAX_TIER: u8 = 16;

// ---------------------------------------------------------------------------
// Namespace
// ---------------------------------------------------------------------------

/// The extension namespace that owns a species.
///
/// Hosts pass the namespace explicitly when building descriptors. When the
/// host has no active extension to attribute a species to, it uses
/// [`Namespace::from_context`] with `None` and gets the
/// [`UNKNOWN`](Self::UNKNOWN) sentinel, which is flagged on every
/// descriptor built with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    id: String,
    fallback: bool,
}

impl Namespace {
    /// Sentinel owner for species built without an owning extension.
    pub const UNKNOWN: &'static str = "unknown";

    /// A namespace for a known extension id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fallback: false,
        }
    }

    /// Resolve the namespace from the host's active extension, if any.
    ///
    /// A missing or blank id is a configuration fault, not a failure: the
    /// sentinel is returned and a warning is logged so the plant simulation
    /// stays playable.
    pub fn from_context(active: Option<&str>) -> Self {
        match active.map(str::trim) {
            Some(id) if !id.is_empty() => Self::new(id),
            _ => {
                tracing::warn!(
                    fallback = Self::UNKNOWN,
                    "No active extension while building a species; using fallback owner"
                );
                Self {
                    id: String::from(Self::UNKNOWN),
                    fallback: true,
                }
            }
        }
    }

    /// The namespace id.
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Whether this is the sentinel produced by a missing context.
    pub const fn is_fallback(&self) -> bool {
        self.fallback
    }
}

// ---------------------------------------------------------------------------
// SpeciesDefinition
// ---------------------------------------------------------------------------

/// The data every species must supply.
///
/// `display_name` and `discovered_by` are optional and default to the
/// species name and `"unknown"` respectively.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpeciesDefinition {
    /// Name, unique within the owning namespace and used for saving.
    pub name: String,
    /// Rarity / power rank, `0..=MAX_TIER`.
    pub tier: u8,
    /// Breeding-similarity stats.
    pub stats: StatVector,
    /// Free-form tags, shown to players and used as a breeding signal.
    pub attributes: Vec<String>,
    /// Number of growth stages; also the largest tile size.
    pub max_size: u8,
    /// Translation key or label shown to players.
    pub display_name: Option<String>,
    /// Credit shown when analysing seeds.
    pub discovered_by: Option<String>,
}

// ---------------------------------------------------------------------------
// SpeciesDescriptor
// ---------------------------------------------------------------------------

/// Immutable rule set of one species, shared by all of its tiles.
#[derive(Debug)]
pub struct SpeciesDescriptor {
    identity: SpeciesIdentity,
    fallback_owner: bool,
    display_name: Option<String>,
    discovered_by: Option<String>,
    tier: u8,
    stats: StatVector,
    attributes: Vec<String>,
    max_size: u8,
    rules: Box<dyn SpeciesRules>,
}

impl SpeciesDescriptor {
    /// Build a descriptor owned by `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::EmptyName`], [`CropError::InvalidTier`] or
    /// [`CropError::InvalidMaxSize`] when the definition is unusable.
    pub fn new(
        namespace: &Namespace,
        definition: SpeciesDefinition,
        rules: Box<dyn SpeciesRules>,
    ) -> Result<Self, CropError> {
        let SpeciesDefinition {
            name,
            tier,
            stats,
            attributes,
            max_size,
            display_name,
            discovered_by,
        } = definition;

        if name.trim().is_empty() {
            return Err(CropError::EmptyName);
        }
        if tier > MAX_TIER {
            return Err(CropError::InvalidTier {
                name,
                tier,
                max: MAX_TIER,
            });
        }
        if max_size == 0 {
            return Err(CropError::InvalidMaxSize { name });
        }

        Ok(Self {
            identity: SpeciesIdentity::new(namespace.as_str(), name),
            fallback_owner: namespace.is_fallback(),
            display_name,
            discovered_by,
            tier,
            stats,
            attributes,
            max_size,
            rules,
        })
    }

    // -------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------

    /// `(owner, name)` identity.
    pub const fn identity(&self) -> &SpeciesIdentity {
        &self.identity
    }

    /// Owning namespace.
    pub fn owner(&self) -> &str {
        &self.identity.owner
    }

    /// Species name within its namespace.
    pub fn name(&self) -> &str {
        &self.identity.name
    }

    /// Whether the owner is the sentinel from a missing extension context.
    pub const fn has_fallback_owner(&self) -> bool {
        self.fallback_owner
    }

    /// Label shown to players; the name unless overridden.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identity.name)
    }

    /// Who discovered the species.
    pub fn discovered_by(&self) -> &str {
        self.discovered_by.as_deref().unwrap_or("unknown")
    }

    /// Tier, `0..=MAX_TIER`.
    pub const fn tier(&self) -> u8 {
        self.tier
    }

    /// The full stat vector.
    pub const fn stats(&self) -> &StatVector {
        &self.stats
    }

    /// One stat by slot index; `None` past the last slot.
    pub const fn stat(&self, index: usize) -> Option<u32> {
        self.stats.by_index(index)
    }

    /// Attribute tags in declaration order.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Largest tile size, also the number of growth stages.
    pub const fn max_size(&self) -> u8 {
        self.max_size
    }

    /// Whether this is the built-in weed species.
    pub fn is_weed_species(&self) -> bool {
        self.identity.owner == weed::WEED_OWNER && self.identity.name == weed::WEED_NAME
    }

    /// The species' rule implementation.
    pub fn rules(&self) -> &dyn SpeciesRules {
        self.rules.as_ref()
    }

    /// One line of the short description shown to players.
    pub fn desc(&self, line: usize) -> String {
        self.rules.description(self, line)
    }

    // -------------------------------------------------------------------
    // Formulas
    // -------------------------------------------------------------------

    /// Growth points needed per size increment.
    pub fn growth_duration(&self, tile: &TileState) -> u32 {
        self.rules.growth_duration(tile)
    }

    /// Growth points gained this tick from the environment.
    pub fn weight_influences(&self, tile: &TileState, env: Environment) -> u32 {
        self.rules.weight_influences(tile, env)
    }

    /// Whether the tile may grow (or be colonised, at size 0).
    pub fn can_grow(&self, tile: &TileState) -> bool {
        self.rules.can_grow(tile)
    }

    /// Whether the tile may act as a cross-breeding parent.
    pub fn can_cross(&self, tile: &TileState) -> bool {
        self.rules.can_cross(tile)
    }

    /// Expected gain drops per harvest.
    pub fn drop_gain_chance(&self) -> f64 {
        self.rules.drop_gain_chance(self)
    }

    /// Expected seed drops per pick.
    pub fn drop_seed_chance(&self, tile: &TileState) -> f64 {
        self.rules.drop_seed_chance(tile)
    }

    /// Tile size after a harvest.
    pub fn size_after_harvest(&self, tile: &TileState) -> u8 {
        self.rules.size_after_harvest(tile)
    }

    /// Size an automated harvester waits for.
    pub fn optimal_harvest_size(&self, tile: &TileState) -> u8 {
        self.rules.optimal_harvest_size(tile)
    }

    /// Whether the tile can be harvested in its current state.
    pub fn can_be_harvested(&self, tile: &TileState) -> bool {
        self.rules.can_be_harvested(tile)
    }

    /// One gain drop.
    pub fn gain(&self, tile: &TileState) -> Option<ItemStack> {
        self.rules.gain(tile)
    }

    /// One seed drop.
    pub fn seeds(&self, tile: &TileState) -> Option<ItemStack> {
        self.rules.seeds(tile)
    }

    /// Redstone signal strength emitted by the tile.
    pub fn emit_redstone(&self, tile: &TileState) -> u8 {
        self.rules.emit_redstone(tile)
    }

    /// Light level emitted by the tile.
    pub fn emitted_light(&self, tile: &TileState) -> u8 {
        self.rules.emitted_light(tile)
    }

    /// Whether the host should run trample handling for this contact.
    pub fn on_entity_collision(&self, tile: &TileState, contact: EntityContact) -> bool {
        self.rules.on_entity_collision(tile, contact)
    }

    /// Whether the tile spreads weed to its neighbours.
    pub fn is_weed(&self, tile: &TileState) -> bool {
        self.rules.is_weed(tile)
    }

    /// How many blocks below the tile the host should inspect.
    pub fn root_length(&self, tile: &TileState) -> u8 {
        self.rules.root_length(tile)
    }
}

// ---------------------------------------------------------------------------
// Description lines
// ---------------------------------------------------------------------------

/// Render one description line from attribute tags, two tags per line.
///
/// Line 0 shows the first two tags, with a trailing comma when a third
/// follows. Line 1 shows the third and fourth. Any other line is empty.
pub fn attribute_description(attributes: &[String], line: usize) -> String {
    match (line, attributes) {
        (0, [first]) => first.clone(),
        (0, [first, second]) => format!("{first}, {second}"),
        (0, [first, second, _, ..]) => format!("{first}, {second},"),
        (1, [_, _, third]) => third.clone(),
        (1, [_, _, third, fourth, ..]) => format!("{third}, {fourth}"),
        _ => String::new(),
    }
}
