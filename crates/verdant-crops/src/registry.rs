//! Write-once species catalogue.
//!
//! Registration happens during host start-up through a [`RegistryBuilder`],
//! the single writer. [`RegistryBuilder::build`] consumes the builder and
//! yields a [`SpeciesRegistry`], which has no mutating methods and can be
//! shared freely across tick workers.
//!
//! Every species also gets a [`LegacyId`] in registration order. Legacy ids
//! exist only to read saves from before identities; they are never reused.

use std::collections::BTreeMap;
use std::sync::Arc;

use verdant_types::{LegacyId, SpeciesIdentity};

use crate::error::{CropError, SpeciesKey};
use crate::species::SpeciesDescriptor;
use crate::weed;

// ---------------------------------------------------------------------------
// RegistryBuilder
// ---------------------------------------------------------------------------

/// Collects species during start-up.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    /// Identity -> legacy id.
    by_identity: BTreeMap<SpeciesIdentity, LegacyId>,
    /// Descriptors indexed by legacy id.
    species: Vec<Arc<SpeciesDescriptor>>,
}

impl RegistryBuilder {
    /// An empty builder.
    pub const fn new() -> Self {
        Self {
            by_identity: BTreeMap::new(),
            species: Vec::new(),
        }
    }

    /// A builder with the built-in weed already registered under legacy
    /// id 0.
    ///
    /// # Errors
    ///
    /// Propagates weed construction and registration errors.
    pub fn with_builtins() -> Result<Self, CropError> {
        let mut builder = Self::new();
        builder.register(weed::species()?)?;
        Ok(builder)
    }

    /// Register a species and return its legacy id.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::DuplicateIdentity`] if a species with the same
    /// `(owner, name)` is already registered, or
    /// [`CropError::RegistryFull`] once every legacy id is taken.
    pub fn register(&mut self, descriptor: SpeciesDescriptor) -> Result<LegacyId, CropError> {
        let identity = descriptor.identity().clone();
        if self.by_identity.contains_key(&identity) {
            return Err(CropError::DuplicateIdentity(identity));
        }

        let id = u16::try_from(self.species.len())
            .map(LegacyId)
            .map_err(|_overflow| CropError::RegistryFull)?;

        if descriptor.has_fallback_owner() {
            tracing::warn!(
                species = %identity,
                "Registering species with fallback owner; check the owning extension"
            );
        }
        tracing::debug!(
            species = %identity,
            legacy_id = %id,
            tier = descriptor.tier(),
            "Species registered"
        );

        self.by_identity.insert(identity, id);
        self.species.push(Arc::new(descriptor));
        Ok(id)
    }

    /// Whether a species with this identity is already registered.
    pub fn contains(&self, identity: &SpeciesIdentity) -> bool {
        self.by_identity.contains_key(identity)
    }

    /// Number of species registered so far.
    pub const fn len(&self) -> usize {
        self.species.len()
    }

    /// Whether nothing has been registered.
    pub const fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Finish registration.
    pub fn build(self) -> SpeciesRegistry {
        tracing::info!(species = self.species.len(), "Species registry sealed");
        SpeciesRegistry {
            by_identity: self.by_identity,
            species: self.species,
        }
    }
}

// ---------------------------------------------------------------------------
// SpeciesRegistry
// ---------------------------------------------------------------------------

/// Read-only species catalogue.
#[derive(Debug, Default)]
pub struct SpeciesRegistry {
    by_identity: BTreeMap<SpeciesIdentity, LegacyId>,
    species: Vec<Arc<SpeciesDescriptor>>,
}

impl SpeciesRegistry {
    /// Look a species up by owner and name.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::NotFound`] for an unknown identity.
    pub fn lookup(&self, owner: &str, name: &str) -> Result<&Arc<SpeciesDescriptor>, CropError> {
        self.get(&SpeciesIdentity::new(owner, name))
    }

    /// Look a species up by identity.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::NotFound`] for an unknown identity.
    pub fn get(&self, identity: &SpeciesIdentity) -> Result<&Arc<SpeciesDescriptor>, CropError> {
        self.by_identity
            .get(identity)
            .and_then(|id| self.species.get(usize::from(id.get())))
            .ok_or_else(|| CropError::NotFound(SpeciesKey::Identity(identity.clone())))
    }

    /// Look a species up by legacy id, for reading old saves.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::NotFound`] for an unassigned id.
    pub fn lookup_legacy(&self, id: LegacyId) -> Result<&Arc<SpeciesDescriptor>, CropError> {
        self.species
            .get(usize::from(id.get()))
            .ok_or(CropError::NotFound(SpeciesKey::Legacy(id)))
    }

    /// Legacy id of a registered descriptor, `None` if this exact
    /// descriptor is not the registered one.
    ///
    /// Only for writing into formats that predate identities.
    pub fn legacy_id_of(&self, descriptor: &SpeciesDescriptor) -> Option<LegacyId> {
        let id = *self.by_identity.get(descriptor.identity())?;
        let registered = self.species.get(usize::from(id.get()))?;
        core::ptr::eq(Arc::as_ptr(registered), descriptor).then_some(id)
    }

    /// The built-in weed, if it was registered.
    pub fn weed(&self) -> Option<&Arc<SpeciesDescriptor>> {
        self.lookup(weed::WEED_OWNER, weed::WEED_NAME).ok()
    }

    /// Whether a species with this identity is registered.
    pub fn contains(&self, identity: &SpeciesIdentity) -> bool {
        self.by_identity.contains_key(identity)
    }

    /// Iterate over all species in legacy-id order.
    pub fn iter(&self) -> impl Iterator<Item = (LegacyId, &Arc<SpeciesDescriptor>)> {
        self.species
            .iter()
            .enumerate()
            .filter_map(|(index, s)| u16::try_from(index).ok().map(|id| (LegacyId(id), s)))
    }

    /// Number of registered species.
    pub const fn len(&self) -> usize {
        self.species.len()
    }

    /// Whether the registry is empty.
    pub const fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}
