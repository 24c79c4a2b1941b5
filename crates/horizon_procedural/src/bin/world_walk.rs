//! # World Walk
//!
//! Flies an observer across the streamed world and reports what the
//! streamer did along the way.
//!
//! Usage: `world_walk [config.toml] [catalog.toml]`
//!
//! Without arguments the bundled defaults are used with a random seed.

use std::path::Path;
use std::process;
use std::time::Instant;

use horizon_procedural::seed::resolve_seed;
use horizon_procedural::{
    ChunkState, EntityCategory, NoiseTerrain, StaticCatalog, WorldConfig, WorldSeed, WorldStreamer,
};
use horizon_shared::{Vec2, Vec3};

/// Cruise speed in world units per second.
const SPEED: f32 = 250.0;
/// Flight heading in degrees.
const HEADING: f32 = 30.0;
/// Simulated seconds.
const DURATION_SECS: u32 = 240;
/// Simulation rate.
const TICK_RATE: u32 = 60;

fn main() {
    let mut args = std::env::args().skip(1);

    let mut config = match args.next() {
        Some(path) => WorldConfig::load(Path::new(&path)).unwrap_or_else(|err| fail(&err)),
        None => WorldConfig::default(),
    };
    let catalog = match args.next() {
        Some(path) => std::fs::read_to_string(&path)
            .map_err(|err| err.to_string())
            .and_then(|text| StaticCatalog::from_toml_str(&text).map_err(|err| err.to_string()))
            .unwrap_or_else(|err| fail(&err)),
        None => StaticCatalog::uniform(4),
    };
    for category in catalog.missing_categories() {
        println!("note: catalog has no templates for {category}");
    }

    config.seed = resolve_seed(config.seed);
    let terrain = NoiseTerrain::new(WorldSeed::from_global(config.seed), 40.0, 300.0);

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         HORIZON - WORLD WALK                                     ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();
    println!("┌─ CONFIGURATION ─────────────────────────────────────────────────┐");
    println!("│ Seed:               {}", config.seed);
    println!("│ Chunk Size:         {} units", config.chunk_size);
    println!("│ View Distance:      {} chunks", config.view_distance);
    println!("│ Unload Distance:    {} chunks", config.unload_distance);
    println!("│ Check Interval:     {} s", config.check_interval_secs);
    println!("│ Flight:             {SPEED} u/s at {HEADING} deg for {DURATION_SECS} s");
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    let mut world = WorldStreamer::new(config, Box::new(catalog), Some(Box::new(terrain)))
        .unwrap_or_else(|err| fail(&err));

    let start = Instant::now();
    let dt = 1.0 / TICK_RATE as f32;
    let direction = Vec2::from_heading(HEADING);
    let mut position = Vec2::ZERO;

    world.refresh(Vec3::ZERO);
    let mut peak_resident = world.loaded_chunk_count();
    let mut peak_entities = world.entity_count();

    for _ in 0..DURATION_SECS * TICK_RATE {
        position = position + direction * (SPEED * dt);
        if let Some(report) = world.update(position.with_height(500.0), dt) {
            println!(
                "  chunk {:>10}  +{:<3} -{:<3} resident {:<4} entities {}",
                report.center.to_string(),
                report.generated,
                report.unloaded,
                world.loaded_chunk_count(),
                world.entity_count()
            );
        }
        world.tick_animation(dt);
        peak_resident = peak_resident.max(world.loaded_chunk_count());
        peak_entities = peak_entities.max(world.entity_count());
    }
    let elapsed = start.elapsed();

    let mut per_category = [0usize; EntityCategory::ALL.len()];
    for chunk in world.chunks().filter(|c| c.state() == ChunkState::Loaded) {
        for (_, entity) in world.chunk_entities(chunk.coord()) {
            per_category[entity.category as usize] += 1;
        }
    }

    let stats = world.stats();
    println!();
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                    WALK RESULTS                                  ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!("  Wall time:            {elapsed:?}");
    println!("  Final position:       ({:.0}, {:.0})", position.x, position.z);
    println!("  Streaming checks:     {}", stats.checks_performed);
    println!("  Chunks generated:     {}", stats.generated_this_session);
    println!("  Protected chunks:     {}", stats.protected_this_session);
    println!("  Chunks unloaded:      {}", stats.unloaded_this_session);
    println!("  Entities spawned:     {}", stats.entities_spawned);
    println!("  Entities destroyed:   {}", stats.entities_destroyed);
    println!("  Peak resident chunks: {peak_resident}");
    println!("  Peak live entities:   {peak_entities}");
    println!();
    println!("  Live entities by category:");
    for category in EntityCategory::ALL {
        println!("    {:<18} {}", category.name(), per_category[category as usize]);
    }
}

fn fail(err: &dyn std::fmt::Display) -> ! {
    eprintln!("error: {err}");
    process::exit(1);
}
