//! End-to-end plant lifecycle tests for `verdant-crops`.
//!
//! Each test builds a registry from a YAML catalogue and walks tiles
//! through planting, growth, breeding checks, harvest, picking, and
//! persistence the way a host would.

// Integration tests use unwrap extensively for clarity -- panicking on
// failure is the correct behavior in test code.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::unreachable
)]

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use verdant_crops::{
    CatalogueConfig, GrowthOutcome, RegistryBuilder, SpeciesRegistry, SpriteTable, TileState,
    breeding, growth,
};
use verdant_types::{
    CropStats, Environment, HarvestMode, ItemKind, LegacyId, RenderCapability, SeedData,
    SpeciesIdentity, TileRecord,
};

const CATALOGUE: &str = r"
namespace: farmcraft
species:
  - name: wheat
    tier: 1
    stats: [0, 4, 0, 0, 2]
    attributes: [Yellow, Food, Wheat]
    max_size: 4
    gain_item: wheat
  - name: melon
    tier: 3
    stats: [0, 4, 0, 2, 0]
    attributes: [Green, Food, Stem]
    max_size: 4
    gain_item: melon
";

const FERTILE: Environment = Environment::new(10.0, 10.0, 10.0);

fn registry() -> SpeciesRegistry {
    CatalogueConfig::parse(CATALOGUE)
        .unwrap()
        .build_registry()
        .unwrap()
}

fn grow_to_maturity(tile: &mut TileState) -> u32 {
    let mut ticks = 0;
    while !tile.is_mature() {
        growth::tick(tile, FERTILE).unwrap();
        ticks += 1;
        assert!(ticks < 10_000, "tile never matured");
    }
    ticks
}

#[test]
fn seed_to_harvest_to_seed() {
    let registry = registry();
    let mut rng = SmallRng::seed_from_u64(7);

    let seed = SeedData {
        species: SpeciesIdentity::new("farmcraft", "wheat"),
        stats: CropStats::new(5, 5, 5),
        scan_level: 1,
    };
    let mut tile = TileState::from_seed(&seed, &registry).unwrap();
    assert_eq!(tile.size(), 1);

    // Tier 1 needs 200 points per stage; 30 per tick -> 7 ticks per stage.
    assert_eq!(grow_to_maturity(&mut tile), 21);
    assert!(breeding::can_cross(&tile));

    let harvested = tile.right_click(&mut rng).unwrap();
    assert!(harvested.changed);
    assert!(harvested.item_count() <= 1);
    assert_eq!(tile.size(), 1);
    assert!(!breeding::can_cross(&tile));

    grow_to_maturity(&mut tile);
    let picked = tile.left_click(&mut rng).unwrap();
    assert!(picked.cleared);
    assert!(tile.is_empty());
    for stack in &picked.drops {
        let ItemKind::Seed(dropped) = &stack.item else {
            unreachable!("picks only drop seeds");
        };
        assert_eq!(dropped, &seed);
    }
}

#[test]
fn higher_tiers_grow_slower() {
    let registry = registry();
    let wheat = registry.lookup("farmcraft", "wheat").unwrap();
    let melon = registry.lookup("farmcraft", "melon").unwrap();

    let mut a = TileState::plant(Arc::clone(wheat), CropStats::default());
    let mut b = TileState::plant(Arc::clone(melon), CropStats::default());
    assert!(grow_to_maturity(&mut b) > grow_to_maturity(&mut a));
}

#[test]
fn optimal_harvest_waits_for_maturity() {
    let registry = registry();
    let mut rng = SmallRng::seed_from_u64(1);
    let wheat = registry.lookup("farmcraft", "wheat").unwrap();

    let mut tile = TileState::with_size(Arc::clone(wheat), CropStats::default(), 3).unwrap();
    let early = verdant_crops::harvest::harvest(&mut tile, HarvestMode::Optimal, &mut rng).unwrap();
    assert!(!early.changed);

    while growth::evaluate(&mut tile, FERTILE).unwrap() != (GrowthOutcome::Advanced { size: 4 }) {}
    let ripe = verdant_crops::harvest::harvest(&mut tile, HarvestMode::Optimal, &mut rng).unwrap();
    assert!(ripe.changed);
}

#[test]
fn eligible_parents_in_a_field() {
    let registry = registry();
    let wheat = registry.lookup("farmcraft", "wheat").unwrap();
    let field: Vec<TileState> = (1..=4)
        .map(|size| TileState::with_size(Arc::clone(wheat), CropStats::default(), size).unwrap())
        .collect();
    assert_eq!(breeding::eligible_parents(&field).count(), 2);
}

#[test]
fn weed_colonises_and_chokes() {
    let registry = registry();
    let weed = registry.weed().unwrap();
    assert!(growth::can_colonize(weed));

    let mut tile = TileState::plant(Arc::clone(weed), CropStats::default());
    assert!(!weed.is_weed(&tile));
    grow_to_maturity(&mut tile);
    assert!(weed.is_weed(&tile));
}

#[test]
fn saves_survive_a_reload_and_legacy_saves_still_load() {
    let registry = registry();
    let melon = registry.lookup("farmcraft", "melon").unwrap();
    let mut tile = TileState::with_size(Arc::clone(melon), CropStats::new(1, 2, 3), 2).unwrap();
    tile.set_growth_points(42);

    let saved = serde_json::to_string(&tile.to_record()).unwrap();
    assert!(!saved.contains("legacy_id"));
    let restored =
        TileState::from_record(&serde_json::from_str::<TileRecord>(&saved).unwrap(), &registry)
            .unwrap();
    assert!(Arc::ptr_eq(restored.species(), melon));
    assert_eq!(restored.growth_points(), 42);

    // Weed is 0, wheat 1, melon 2.
    let legacy = r#"{
        "legacy_id": 2,
        "size": 3,
        "growth_points": 0,
        "stats": { "growth": 0, "gain": 0, "resistance": 0 },
        "scan_level": 0
    }"#;
    let record: TileRecord = serde_json::from_str(legacy).unwrap();
    let old = TileState::from_record(&record, &registry).unwrap();
    assert_eq!(old.species().name(), "melon");
    assert_eq!(registry.legacy_id_of(old.species()), Some(LegacyId(2)));
}

#[test]
fn extensions_can_share_a_registry() {
    let mut builder = RegistryBuilder::with_builtins().unwrap();
    let first = CatalogueConfig::parse(CATALOGUE).unwrap();
    first.register_into(&mut builder).unwrap();

    let second = CatalogueConfig::parse(
        "namespace: othermod
include_weed: false
species:
  - { name: wheat, tier: 2, max_size: 5 }
",
    )
    .unwrap();
    let ids = second.register_into(&mut builder).unwrap();
    assert_eq!(ids, vec![LegacyId(3)]);

    let registry = builder.build();
    let ours = registry.lookup("farmcraft", "wheat").unwrap();
    let theirs = registry.lookup("othermod", "wheat").unwrap();
    assert!(!Arc::ptr_eq(ours, theirs));
    assert_eq!(theirs.max_size(), 5);
}

#[test]
fn sprites_follow_growth() {
    let registry = registry();
    let wheat = registry.lookup("farmcraft", "wheat").unwrap();
    assert!(SpriteTable::for_species(wheat, RenderCapability::Headless).is_none());

    let table = SpriteTable::for_species(wheat, RenderCapability::Render).unwrap();
    let mut tile = TileState::plant(Arc::clone(wheat), CropStats::default());
    let mut seen = vec![table.sprite_for(&tile).unwrap().to_string()];
    while !tile.is_mature() {
        if growth::evaluate(&mut tile, FERTILE).unwrap().advanced() {
            seen.push(table.sprite_for(&tile).unwrap().to_string());
        }
    }
    assert_eq!(
        seen,
        vec![
            "farmcraft:crop/wheat.1",
            "farmcraft:crop/wheat.2",
            "farmcraft:crop/wheat.3",
            "farmcraft:crop/wheat.4",
        ]
    );
}
