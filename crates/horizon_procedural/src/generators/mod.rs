//! # Content Generators
//!
//! [`WorldGenerator`] turns one chunk coordinate into a list of
//! [`PlacedEntity`] records. Generation is a pure function of the global
//! seed, the configuration and the coordinate: it never looks at
//! neighboring chunks or at anything already loaded.
//!
//! Pass order inside a chunk:
//!
//! 1. Airport
//! 2. City
//! 3. Lakes
//! 4. Windmills
//! 5. Country roads, then farm roads
//! 6. Connection roads (airport to the nearest primary intersection)
//!
//! Every pass draws from its own [`GenStream`], so disabling one pass never
//! changes what the others produce.

pub mod airport;
pub mod city;
pub mod lake;
pub mod roads;
pub mod windmill;

use horizon_shared::{Pose, Rect, Vec2, Vec3};
use rand::Rng;
use tracing::{debug, warn};

use crate::catalog::TemplateCatalog;
use crate::classifier::{ChunkClassifier, Classification};
use crate::config::WorldConfig;
use crate::coord::ChunkCoord;
use crate::entity::{EntityCategory, PlacedEntity};
use crate::error::ConfigResult;
use crate::seed::{chunk_seed, resolve_seed, ChunkSeed, GenStream, WorldSeed};
use crate::terrain::{HeightSampler, TerrainHeight};

pub use airport::AirportSite;
pub use city::CitySite;
pub use lake::LakeSite;
pub use roads::RoadNetwork;

/// Shared state handed to every generator pass of one chunk.
pub struct GenContext<'a> {
    /// Chunk being generated.
    pub coord: ChunkCoord,
    /// World-space area of the chunk.
    pub bounds: Rect,
    /// Candidate budget per requested item for the placement solver.
    pub attempts_per_item: u32,
    terrain: &'a HeightSampler,
    catalog: &'a dyn TemplateCatalog,
    out: &'a mut Vec<PlacedEntity>,
    /// Categories already reported as missing (bit per discriminant).
    warned: u16,
}

impl<'a> GenContext<'a> {
    /// Creates a context writing into `out`.
    pub fn new(
        coord: ChunkCoord,
        bounds: Rect,
        attempts_per_item: u32,
        terrain: &'a HeightSampler,
        catalog: &'a dyn TemplateCatalog,
        out: &'a mut Vec<PlacedEntity>,
    ) -> Self {
        Self {
            coord,
            bounds,
            attempts_per_item,
            terrain,
            catalog,
            out,
            warned: 0,
        }
    }

    /// Ground height at a position.
    #[must_use]
    pub fn height_at(&self, pos: Vec2) -> f32 {
        self.terrain.height_at(pos)
    }

    /// Entities emitted so far.
    #[must_use]
    pub fn emitted(&self) -> usize {
        self.out.len()
    }

    /// Returns true if `category` has at least one template.
    ///
    /// Logs a warning the first time a category turns out to be empty.
    pub fn has_templates(&mut self, category: EntityCategory) -> bool {
        if self.catalog.template_count(category) > 0 {
            return true;
        }
        let bit = 1u16 << (category as u8);
        if self.warned & bit == 0 {
            self.warned |= bit;
            warn!(chunk = %self.coord, %category, "no templates for category, skipping");
        }
        false
    }

    /// Records one entity on the ground at `at`.
    ///
    /// Returns its index in the chunk's entity list, or `None` if the
    /// category has no templates.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        category: EntityCategory,
        at: Vec2,
        yaw_degrees: f32,
        scale: Vec3,
    ) -> Option<usize> {
        if !self.has_templates(category) {
            return None;
        }
        let count = self
            .catalog
            .template_count(category)
            .min(usize::from(u16::MAX) + 1);
        let template = u16::try_from(rng.gen_range(0..count)).unwrap_or(u16::MAX);
        let position = at.with_height(self.height_at(at));

        self.out.push(PlacedEntity {
            category,
            template,
            pose: Pose::new(position, yaw_degrees, scale),
        });
        Some(self.out.len() - 1)
    }
}

/// Rotor of one generated windmill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotorSpec {
    /// Index of the windmill in [`GeneratedChunk::entities`].
    pub entity: usize,
    /// Blade angular speed in degrees per second.
    pub speed: f32,
}

/// Hand-off points generated landmarks expose to road networks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmarks {
    /// Airport, if the chunk has one.
    pub airport: Option<AirportSite>,
    /// City, if the chunk has one.
    pub city: Option<CitySite>,
}

/// Everything generated for one chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedChunk {
    /// Chunk coordinate.
    pub coord: ChunkCoord,
    /// Chunk seed every pass was keyed with.
    pub seed: ChunkSeed,
    /// Classifier output.
    pub classification: Classification,
    /// Placed entities in generation order.
    pub entities: Vec<PlacedEntity>,
    /// Windmill rotors.
    pub rotors: Vec<RotorSpec>,
    /// Landmark connection points.
    pub landmarks: Landmarks,
}

impl GeneratedChunk {
    /// Canonical byte encoding of the entity list.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        crate::entity::encode_entities(&self.entities)
    }

    /// Number of entities of one category.
    #[must_use]
    pub fn count(&self, category: EntityCategory) -> usize {
        self.entities.iter().filter(|e| e.category == category).count()
    }
}

/// Classifies and populates chunks.
pub struct WorldGenerator {
    seed: i32,
    config: WorldConfig,
    classifier: ChunkClassifier,
    catalog: Box<dyn TemplateCatalog>,
    terrain: HeightSampler,
}

impl WorldGenerator {
    /// Validates `config` and builds a generator.
    ///
    /// A configured seed of `0` is replaced by a random non-zero seed.
    ///
    /// # Errors
    ///
    /// Returns the first validation error of `config`.
    pub fn new(
        config: WorldConfig,
        catalog: Box<dyn TemplateCatalog>,
        terrain: Option<Box<dyn TerrainHeight>>,
    ) -> ConfigResult<Self> {
        config.validate()?;
        let seed = resolve_seed(config.seed);
        let classifier = ChunkClassifier::new(WorldSeed::from_global(seed), &config.noise);
        let terrain = HeightSampler::new(terrain, config.default_height);

        Ok(Self {
            seed,
            config,
            classifier,
            catalog,
            terrain,
        })
    }

    /// Effective global seed.
    #[must_use]
    pub const fn seed(&self) -> i32 {
        self.seed
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Chunk classifier.
    #[must_use]
    pub const fn classifier(&self) -> &ChunkClassifier {
        &self.classifier
    }

    /// Generates the content of one chunk.
    #[must_use]
    pub fn generate(&self, coord: ChunkCoord) -> GeneratedChunk {
        let config = &self.config;
        let seed = chunk_seed(self.seed, coord);
        let classification = self.classifier.classify(coord);
        let membership = classification.membership;

        let mut entities = Vec::new();
        let mut rotors = Vec::new();
        let mut landmarks = Landmarks::default();
        let mut ctx = GenContext::new(
            coord,
            coord.world_bounds(config.chunk_size),
            config.placement.attempts_per_item,
            &self.terrain,
            self.catalog.as_ref(),
            &mut entities,
        );

        if membership.airport {
            landmarks.airport =
                airport::generate(&mut ctx, &mut seed.rng(GenStream::Airport), &config.airport);
        }
        if membership.city {
            landmarks.city = Some(city::generate(&mut ctx, &mut seed.rng(GenStream::City), &config.city));
        }
        if membership.lake {
            lake::generate(&mut ctx, &mut seed.rng(GenStream::Lake), &config.lakes, &[]);
        }
        if membership.windmill {
            rotors = windmill::generate(
                &mut ctx,
                &mut seed.rng(GenStream::Windmill),
                &mut seed.rng(GenStream::Rotor),
                &config.windmills,
            );
        }

        let mut intersections = Vec::new();
        if membership.country_road {
            let network = roads::generate(
                &mut ctx,
                &mut seed.rng(GenStream::CountryRoads),
                &config.country_roads,
            );
            intersections.extend(network.intersections);
        }
        if membership.farm_road {
            let network =
                roads::generate(&mut ctx, &mut seed.rng(GenStream::FarmRoads), &config.farm_roads);
            intersections.extend(network.intersections);
        }

        if let Some(site) = landmarks.airport.filter(|_| config.airport.connect_to_roads) {
            if let Some(nearest) = nearest(site.connection, &intersections) {
                roads::connect_points(
                    &mut ctx,
                    &mut seed.rng(GenStream::Connections),
                    config.country_roads.segment_length,
                    &[site.connection, nearest],
                );
            }
        }

        debug!(
            chunk = %coord,
            seed = seed.value(),
            content = %membership,
            entities = entities.len(),
            "generated chunk"
        );

        GeneratedChunk {
            coord,
            seed,
            classification,
            entities,
            rotors,
            landmarks,
        }
    }
}

/// Closest point of `candidates` to `target`.
fn nearest(target: Vec2, candidates: &[Vec2]) -> Option<Vec2> {
    candidates.iter().copied().min_by(|a, b| {
        a.distance_squared(target)
            .total_cmp(&b.distance_squared(target))
    })
}

/// Uniform heading in `[0, 360)`.
pub(crate) fn random_heading<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>() * 360.0
}

/// Heading snapped to a multiple of 90 degrees.
pub(crate) fn right_angle_heading<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    f32::from(rng.gen_range(0u8..4)) * 90.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::terrain::FlatTerrain;

    fn generator(config: WorldConfig) -> WorldGenerator {
        WorldGenerator::new(config, Box::new(StaticCatalog::uniform(3)), None).unwrap()
    }

    /// Config where every field fires and nothing is suppressed but the city.
    fn everything() -> WorldConfig {
        let mut config = WorldConfig::test();
        config.noise.airport.threshold = 0.0;
        config.noise.lake.threshold = 0.0;
        config.noise.windmill.threshold = 0.0;
        config.noise.country_road.threshold = 0.0;
        config.noise.farm_road.threshold = 0.0;
        config
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generator(everything());
        let b = generator(everything());

        for x in -3..=3 {
            for z in -3..=3 {
                let coord = ChunkCoord::new(x, z);
                let (first, second) = (a.generate(coord), b.generate(coord));
                assert_eq!(first.to_bytes(), second.to_bytes());
                assert_eq!(first.rotors, second.rotors);
            }
        }
    }

    #[test]
    fn test_generation_ignores_history() {
        let generator = generator(everything());
        let coord = ChunkCoord::new(2, -1);
        let before = generator.generate(coord).to_bytes();
        for x in -5..5 {
            let _ = generator.generate(ChunkCoord::new(x, x));
        }
        assert_eq!(generator.generate(coord).to_bytes(), before);
    }

    #[test]
    fn test_all_passes_run() {
        let generator = generator(everything());
        let chunk = generator.generate(ChunkCoord::new(0, 0));

        assert!(chunk.classification.membership.airport);
        assert!(!chunk.classification.membership.city);
        assert_eq!(chunk.count(EntityCategory::Airport), 1);
        assert!(chunk.count(EntityCategory::LakeWaterPatch) > 0);
        assert!(chunk.count(EntityCategory::Windmill) > 0);
        assert_eq!(chunk.rotors.len(), chunk.count(EntityCategory::Windmill));
        assert!(chunk.count(EntityCategory::RoadSegment) > 0);
        assert!(chunk.count(EntityCategory::Intersection) > 0);
        assert!(chunk.landmarks.airport.is_some());
    }

    #[test]
    fn test_empty_chunk_has_no_entities() {
        let mut config = WorldConfig::test();
        for layer in [
            &mut config.noise.city,
            &mut config.noise.lake,
            &mut config.noise.windmill,
            &mut config.noise.country_road,
            &mut config.noise.farm_road,
            &mut config.noise.airport,
        ] {
            layer.threshold = 1.0;
        }
        let generator = generator(config);
        let chunk = generator.generate(ChunkCoord::new(4, 4));
        assert!(chunk.classification.membership.is_empty());
        assert!(chunk.entities.is_empty());
    }

    #[test]
    fn test_missing_templates_skip_category() {
        let catalog = StaticCatalog::uniform(2).without(EntityCategory::Tree);
        let generator = WorldGenerator::new(everything(), Box::new(catalog), None).unwrap();
        let chunk = generator.generate(ChunkCoord::new(1, 1));

        assert_eq!(chunk.count(EntityCategory::Tree), 0);
        assert!(chunk.count(EntityCategory::Bush) > 0);
    }

    #[test]
    fn test_terrain_height_applied() {
        let generator =
            WorldGenerator::new(everything(), Box::new(StaticCatalog::uniform(1)), Some(Box::new(FlatTerrain(42.0))))
                .unwrap();
        let chunk = generator.generate(ChunkCoord::new(0, 0));
        assert!(!chunk.entities.is_empty());
        assert!(chunk.entities.iter().all(|e| e.pose.position.y == 42.0));
    }

    #[test]
    fn test_entities_carry_valid_templates() {
        let generator = generator(everything());
        let chunk = generator.generate(ChunkCoord::new(-2, 3));
        assert!(chunk.entities.iter().all(|e| e.template < 3));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WorldConfig {
            chunk_size: 0.0,
            ..WorldConfig::test()
        };
        assert!(WorldGenerator::new(config, Box::new(StaticCatalog::uniform(1)), None).is_err());
    }

    #[test]
    fn test_nearest() {
        let points = [Vec2::new(10.0, 0.0), Vec2::new(2.0, 1.0), Vec2::new(-5.0, 0.0)];
        assert_eq!(nearest(Vec2::ZERO, &points), Some(Vec2::new(2.0, 1.0)));
        assert_eq!(nearest(Vec2::ZERO, &[]), None);
    }
}
