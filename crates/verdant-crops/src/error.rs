//! Error types for the `verdant-crops` crate.
//!
//! Registry collisions and lookup misses are recoverable and reported to
//! the caller. Out-of-range stat and sprite queries are not errors at all;
//! they return `None`.

use verdant_types::{LegacyId, SpeciesIdentity};

/// Key used to look a species up in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeciesKey {
    /// Lookup by `(owner, name)`.
    Identity(SpeciesIdentity),
    /// Lookup by save-compatibility id.
    Legacy(LegacyId),
}

impl core::fmt::Display for SpeciesKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Identity(identity) => write!(f, "{identity}"),
            Self::Legacy(id) => write!(f, "legacy id {id}"),
        }
    }
}

/// Errors that can occur in species registration, tile construction and
/// rule evaluation.
#[derive(Debug, thiserror::Error)]
pub enum CropError {
    /// A species with the same `(owner, name)` is already registered.
    #[error("duplicate species identity: {0}")]
    DuplicateIdentity(SpeciesIdentity),

    /// No species is registered under the key.
    #[error("species not found: {0}")]
    NotFound(SpeciesKey),

    /// A tile record names neither an identity nor a legacy id.
    #[error("tile record does not name a species")]
    MissingSpecies,

    /// A species definition has an empty name.
    #[error("species name must not be empty")]
    EmptyName,

    /// A species tier is outside `0..=MAX_TIER`.
    #[error("species {name} has tier {tier}, expected 0..={max}")]
    InvalidTier {
        /// Species name.
        name: String,
        /// The rejected tier.
        tier: u8,
        /// Highest permitted tier.
        max: u8,
    },

    /// A species declares a max size of zero.
    #[error("species {name} must have a max size of at least 1")]
    InvalidMaxSize {
        /// Species name.
        name: String,
    },

    /// A tile size exceeds its species' max size.
    #[error("size {size} exceeds max size {max_size} of {species}")]
    SizeOutOfRange {
        /// The species of the tile.
        species: SpeciesIdentity,
        /// The rejected size.
        size: u8,
        /// The species' max size.
        max_size: u8,
    },

    /// Every legacy id has been handed out.
    #[error("species registry is full")]
    RegistryFull,
}
