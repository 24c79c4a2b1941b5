//! # World Streaming
//!
//! Keeps the world populated around a moving observer.
//!
//! ## Lifecycle
//!
//! ```text
//! Unloaded --(inside view square)--> Loaded --(beyond unload radius)--> Unloaded
//! Unloaded --(inside view square, protected)--> Protected (forever)
//! ```
//!
//! - Loading uses the Chebyshev view square (`view_distance`).
//! - Unloading uses the Euclidean `unload_distance`, which must exceed the
//!   view distance. Chunks between the two radii stay as they are, so an
//!   observer circling a chunk border does not regenerate anything.
//! - A chunk owns every entity generated for it. Unloading destroys exactly
//!   that set; protected chunks own nothing and are never unloaded.
//!
//! Generation is synchronous: a check returns once every new chunk is
//! fully populated.

use std::collections::HashMap;

use horizon_core::{EntityArena, EntityId};
use horizon_shared::Vec3;
use tracing::{debug, info};

use crate::catalog::TemplateCatalog;
use crate::chunk::{Chunk, ChunkState, Rotor};
use crate::config::WorldConfig;
use crate::coord::ChunkCoord;
use crate::entity::PlacedEntity;
use crate::error::ConfigResult;
use crate::generators::WorldGenerator;
use crate::protected::ProtectedZone;
use crate::terrain::TerrainHeight;

/// Session counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Streaming checks performed.
    pub checks_performed: u64,
    /// Chunks generated and populated.
    pub generated_this_session: u64,
    /// Protected chunks registered.
    pub protected_this_session: u64,
    /// Chunks unloaded.
    pub unloaded_this_session: u64,
    /// Entities spawned into the arena.
    pub entities_spawned: u64,
    /// Entities destroyed (chunk unloads and external despawns).
    pub entities_destroyed: u64,
}

/// What one streaming check changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamReport {
    /// Observer chunk the check ran for.
    pub center: ChunkCoord,
    /// Chunks generated.
    pub generated: usize,
    /// Protected chunks registered.
    pub protected: usize,
    /// Chunks unloaded.
    pub unloaded: usize,
}

impl StreamReport {
    /// Returns true if the check changed nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.generated == 0 && self.protected == 0 && self.unloaded == 0
    }
}

/// Chunk streaming manager.
///
/// Owns the world grid, the protected zone and the entity arena.
pub struct WorldStreamer {
    generator: WorldGenerator,
    grid: HashMap<ChunkCoord, Chunk>,
    protected: ProtectedZone,
    arena: EntityArena<PlacedEntity>,
    observer_chunk: Option<ChunkCoord>,
    since_check: f32,
    stats: StreamStats,
}

impl WorldStreamer {
    /// Validates `config` and builds an empty world.
    ///
    /// Nothing is generated until the first [`WorldStreamer::refresh`] or
    /// [`WorldStreamer::update`].
    ///
    /// # Errors
    ///
    /// Returns the first validation error of `config`.
    pub fn new(
        config: WorldConfig,
        catalog: Box<dyn TemplateCatalog>,
        terrain: Option<Box<dyn TerrainHeight>>,
    ) -> ConfigResult<Self> {
        let generator = WorldGenerator::new(config, catalog, terrain)?;
        let config = generator.config();
        let protected = ProtectedZone::from_config(&config.protected_zone, config.chunk_size);

        info!(
            seed = generator.seed(),
            chunk_size = config.chunk_size,
            view_distance = config.view_distance,
            unload_distance = config.unload_distance,
            check_interval_secs = config.check_interval_secs,
            "world streamer ready"
        );

        Ok(Self {
            generator,
            grid: HashMap::new(),
            protected,
            arena: EntityArena::new(),
            observer_chunk: None,
            since_check: 0.0,
            stats: StreamStats::default(),
        })
    }

    /// Per-frame entry point.
    ///
    /// Accumulates `dt`; once `check_interval_secs` have passed, runs a
    /// streaming check if the observer has moved to another chunk since the
    /// previous check. Returns the check's report if one ran.
    pub fn update(&mut self, observer: Vec3, dt: f32) -> Option<StreamReport> {
        if dt.is_finite() && dt > 0.0 {
            self.since_check += dt;
        }
        if self.since_check < self.config().check_interval_secs {
            return None;
        }
        self.since_check = 0.0;

        let center = ChunkCoord::from_world(observer, self.config().chunk_size);
        if self.observer_chunk == Some(center) {
            return None;
        }
        Some(self.check(center))
    }

    /// Runs a streaming check immediately (startup, teleports).
    pub fn refresh(&mut self, observer: Vec3) -> StreamReport {
        let center = ChunkCoord::from_world(observer, self.config().chunk_size);
        self.since_check = 0.0;
        self.check(center)
    }

    fn check(&mut self, center: ChunkCoord) -> StreamReport {
        let view = self.config().view_distance;
        let mut report = StreamReport {
            center,
            ..StreamReport::default()
        };
        self.stats.checks_performed += 1;
        self.observer_chunk = Some(center);

        for coord in center.square_around(view) {
            if self.grid.contains_key(&coord) {
                continue;
            }
            if self.protected.contains(coord) {
                let seed = crate::seed::chunk_seed(self.generator.seed(), coord);
                self.grid.insert(coord, Chunk::protected(coord, seed));
                self.stats.protected_this_session += 1;
                report.protected += 1;
                debug!(chunk = %coord, "registered protected chunk");
            } else {
                self.load_chunk(coord);
                report.generated += 1;
            }
        }

        let unload_distance = self.config().unload_distance;
        let mut stale: Vec<ChunkCoord> = self
            .grid
            .values()
            .filter(|chunk| chunk.state() == ChunkState::Loaded)
            .map(Chunk::coord)
            .filter(|&coord| {
                coord.chebyshev_distance(center) > view
                    && coord.euclidean_distance(center) > unload_distance
            })
            .collect();
        stale.sort_unstable();
        for coord in stale {
            self.unload_chunk(coord);
            report.unloaded += 1;
        }

        if !report.is_empty() {
            info!(
                center = %center,
                generated = report.generated,
                protected = report.protected,
                unloaded = report.unloaded,
                resident = self.grid.len(),
                entities = self.arena.len(),
                "streaming check"
            );
        }
        report
    }

    fn load_chunk(&mut self, coord: ChunkCoord) {
        let generated = self.generator.generate(coord);

        let ids: Vec<EntityId> = generated
            .entities
            .into_iter()
            .map(|entity| self.arena.spawn(entity))
            .collect();
        let rotors = generated
            .rotors
            .iter()
            .filter_map(|rotor| ids.get(rotor.entity).map(|&id| Rotor::new(id, rotor.speed)))
            .collect();

        self.stats.generated_this_session += 1;
        self.stats.entities_spawned += ids.len() as u64;

        let chunk = Chunk::loaded(
            coord,
            generated.seed,
            generated.classification,
            generated.landmarks,
            ids,
            rotors,
        );
        self.grid.insert(coord, chunk);
    }

    fn unload_chunk(&mut self, coord: ChunkCoord) {
        let Some(chunk) = self.grid.remove(&coord) else {
            return;
        };
        let destroyed = self.arena.despawn_all(chunk.into_entities());
        self.stats.unloaded_this_session += 1;
        self.stats.entities_destroyed += destroyed as u64;
        debug!(chunk = %coord, destroyed, "unloaded chunk");
    }

    /// Advances every windmill rotor by `dt` seconds.
    ///
    /// Rotors of externally despawned windmills stay still.
    pub fn tick_animation(&mut self, dt: f32) {
        if !dt.is_finite() {
            return;
        }
        let arena = &self.arena;
        for chunk in self.grid.values_mut() {
            for rotor in chunk.rotors_mut() {
                if arena.contains(rotor.entity) {
                    rotor.advance(dt);
                }
            }
        }
    }

    /// Destroys one entity ahead of its chunk.
    ///
    /// The owning chunk keeps the stale handle; unloading it later skips
    /// the entity. Returns the removed record, or `None` if it was already
    /// gone.
    pub fn despawn_entity(&mut self, id: EntityId) -> Option<PlacedEntity> {
        let removed = self.arena.despawn(id)?;
        self.stats.entities_destroyed += 1;
        Some(removed)
    }

    /// Unloads every non-protected chunk.
    ///
    /// The next [`WorldStreamer::update`] repopulates the view square.
    pub fn clear(&mut self) {
        let mut loaded: Vec<ChunkCoord> = self
            .grid
            .values()
            .filter(|chunk| !chunk.is_protected())
            .map(Chunk::coord)
            .collect();
        loaded.sort_unstable();
        for coord in loaded {
            self.unload_chunk(coord);
        }
        self.observer_chunk = None;
    }

    /// Resident chunk at `coord`.
    #[must_use]
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.grid.get(&coord)
    }

    /// Lifecycle state of `coord`.
    #[must_use]
    pub fn chunk_state(&self, coord: ChunkCoord) -> ChunkState {
        self.grid.get(&coord).map_or(ChunkState::Unloaded, Chunk::state)
    }

    /// Resident chunks (loaded and protected).
    #[must_use]
    pub fn loaded_chunk_count(&self) -> usize {
        self.grid.len()
    }

    /// Every resident chunk, in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.grid.values()
    }

    /// Live entities owned by `coord`, in generation order.
    pub fn chunk_entities(&self, coord: ChunkCoord) -> impl Iterator<Item = (EntityId, &PlacedEntity)> + '_ {
        self.grid
            .get(&coord)
            .into_iter()
            .flat_map(|chunk| chunk.entities().iter())
            .filter_map(|&id| self.arena.get(id).map(|entity| (id, entity)))
    }

    /// Entity record behind a handle, if it is still alive.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&PlacedEntity> {
        self.arena.get(id)
    }

    /// Live entities across the whole world.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.arena.len()
    }

    /// Session counters.
    #[must_use]
    pub const fn stats(&self) -> &StreamStats {
        &self.stats
    }

    /// Observer chunk of the most recent check.
    #[must_use]
    pub const fn observer_chunk(&self) -> Option<ChunkCoord> {
        self.observer_chunk
    }

    /// The protected zone.
    #[must_use]
    pub const fn protected_zone(&self) -> &ProtectedZone {
        &self.protected
    }

    /// Effective global seed (after resolving a configured `0`).
    #[must_use]
    pub const fn seed(&self) -> i32 {
        self.generator.seed()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        self.generator.config()
    }

    /// The chunk generator.
    #[must_use]
    pub const fn generator(&self) -> &WorldGenerator {
        &self.generator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;

    fn streamer(config: WorldConfig) -> WorldStreamer {
        WorldStreamer::new(config, Box::new(StaticCatalog::uniform(2)), None).unwrap()
    }

    #[test]
    fn test_update_waits_for_interval() {
        let mut world = streamer(WorldConfig::test());
        assert!(world.update(Vec3::ZERO, 0.2).is_none());
        assert_eq!(world.loaded_chunk_count(), 0);

        let report = world.update(Vec3::ZERO, 0.3).unwrap();
        assert_eq!(report.generated + report.protected, 49);
        assert_eq!(world.stats().checks_performed, 1);
    }

    #[test]
    fn test_update_skips_same_chunk() {
        let mut world = streamer(WorldConfig::test());
        world.refresh(Vec3::ZERO);
        assert!(world.update(Vec3::new(500.0, 0.0, 500.0), 1.0).is_none());
        assert_eq!(world.stats().checks_performed, 1);

        let report = world.update(Vec3::new(2500.0, 0.0, 500.0), 1.0).unwrap();
        assert_eq!(report.center, ChunkCoord::new(1, 0));
        assert_eq!(report.generated, 7);
    }

    #[test]
    fn test_view_corners_not_unloaded_with_tight_radius() {
        // Corner of the 7x7 square is 4.24 chunks away, beyond 3.5
        let config = WorldConfig {
            unload_distance: 3.5,
            ..WorldConfig::test()
        };
        let mut world = streamer(config);
        let report = world.refresh(Vec3::ZERO);
        assert_eq!(report.unloaded, 0);
        assert_eq!(world.chunk_state(ChunkCoord::new(3, 3)), ChunkState::Loaded);
    }

    #[test]
    fn test_tick_animation_advances_rotors() {
        let mut config = WorldConfig::test();
        config.noise.windmill.threshold = 0.0;
        config.noise.city.threshold = 1.0;
        config.protected_zone.enabled = false;
        let mut world = streamer(config);
        world.refresh(Vec3::ZERO);

        let chunk = world.chunk(ChunkCoord::new(0, 0)).unwrap();
        let rotor = chunk.rotors()[0];
        world.tick_animation(0.5);
        let advanced = world.chunk(ChunkCoord::new(0, 0)).unwrap().rotors()[0];
        assert!((advanced.angle_degrees - rotor.speed * 0.5).abs() < 1e-3);
        assert_eq!(world.entity(rotor.entity).unwrap().category, crate::EntityCategory::Windmill);
    }

    #[test]
    fn test_clear_keeps_protected() {
        let mut world = streamer(WorldConfig::test());
        world.refresh(Vec3::ZERO);
        world.clear();

        assert_eq!(world.loaded_chunk_count(), 1);
        assert_eq!(world.chunk_state(ChunkCoord::new(0, 0)), ChunkState::Protected);
        assert_eq!(world.entity_count(), 0);
        assert_eq!(world.observer_chunk(), None);
    }

    #[test]
    fn test_stats_balance() {
        let mut world = streamer(WorldConfig::test());
        world.refresh(Vec3::ZERO);
        world.refresh(Vec3::new(40_000.0, 0.0, 0.0));

        let stats = *world.stats();
        assert_eq!(
            stats.entities_spawned - stats.entities_destroyed,
            world.entity_count() as u64
        );
        assert_eq!(stats.unloaded_this_session, 48);
    }
}
