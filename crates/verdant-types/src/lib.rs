//! Shared type definitions for the Verdant crop rule engine.
//!
//! This crate holds the plain data that flows between the rule core and the
//! host simulation: species identities, stat vectors, items and seeds, and
//! the persisted form of a tile. Types defined here flow downstream to
//! `TypeScript` via `ts-rs` for tooling that inspects saves and catalogues.
//!
//! # Modules
//!
//! - [`ids`] -- Tile handles and legacy species ids
//! - [`enums`] -- Stat slots, render capability, harvest mode
//! - [`structs`] -- Identities, stat vectors, items, seeds, tile records

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{HarvestMode, RenderCapability, StatKind};
pub use ids::{LegacyId, TileId};
pub use structs::{
    CropStats, EntityContact, Environment, ItemKind, ItemStack, STAT_MAX, SeedData,
    SpeciesIdentity, StatVector, TileRecord,
};

#[cfg(test)]
mod tests {
    //! Binding generation for all exported types.

    #[test]
    fn export_bindings() {
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::TileId::export_all();
        let _ = crate::ids::LegacyId::export_all();

        // Enums
        let _ = crate::enums::StatKind::export_all();
        let _ = crate::enums::RenderCapability::export_all();
        let _ = crate::enums::HarvestMode::export_all();

        // Structs
        let _ = crate::structs::SpeciesIdentity::export_all();
        let _ = crate::structs::StatVector::export_all();
        let _ = crate::structs::CropStats::export_all();
        let _ = crate::structs::Environment::export_all();
        let _ = crate::structs::EntityContact::export_all();
        let _ = crate::structs::SeedData::export_all();
        let _ = crate::structs::ItemKind::export_all();
        let _ = crate::structs::ItemStack::export_all();
        let _ = crate::structs::TileRecord::export_all();
    }
}
