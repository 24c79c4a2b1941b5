//! # City Generator
//!
//! A square grid of blocks centered on the chunk. Every block gets a ground
//! tile and a spaced scatter of buildings; blocks near the center lean
//! towards taller buildings. Streets run along the internal grid lines and
//! every grid vertex gets an intersection.

use horizon_shared::{Rect, Vec2, Vec3};
use rand::Rng;

use super::{right_angle_heading, GenContext};
use crate::config::CityConfig;
use crate::entity::EntityCategory;
use crate::placement::{scatter, ScatterParams, ScatterRegion};

/// A generated city.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CitySite {
    /// Grid center.
    pub center: Vec2,
    /// Middle of the southern (-Z) grid edge, where outside roads join.
    pub connection: Vec2,
}

/// Building category for a block at `closeness` (1 at the center, 0 at the
/// outermost block).
fn building_category<R: Rng + ?Sized>(rng: &mut R, config: &CityConfig, closeness: f32) -> EntityCategory {
    let p_skyscraper = config.skyscraper_chance * closeness * closeness;
    let p_medium = config.medium_chance * (0.5 + 0.5 * closeness);
    let roll = rng.gen::<f32>();

    if roll < p_skyscraper {
        EntityCategory::Skyscraper
    } else if roll < p_skyscraper + p_medium {
        EntityCategory::BuildingMedium
    } else {
        EntityCategory::BuildingSmall
    }
}

/// Block `(i, j)` of a grid whose minimum corner is `origin`.
fn block_rect(config: &CityConfig, origin: Vec2, i: u32, j: u32) -> Rect {
    let pitch = config.pitch();
    let half_street = config.street_width * 0.5;
    let min = Vec2::new(
        origin.x + i as f32 * pitch + half_street,
        origin.z + j as f32 * pitch + half_street,
    );
    Rect::new(min, Vec2::new(min.x + config.block_size, min.z + config.block_size))
}

/// Populates a city chunk.
pub fn generate<R: Rng + ?Sized>(ctx: &mut GenContext<'_>, rng: &mut R, config: &CityConfig) -> CitySite {
    let n = config.blocks_per_side;
    let pitch = config.pitch();
    let footprint = config.footprint();
    let center = ctx.bounds.center();
    let origin = Vec2::new(center.x - footprint * 0.5, center.z - footprint * 0.5);

    // Distance from the center to the corner block's center
    let max_distance = n.saturating_sub(1) as f32 * 0.5 * pitch * std::f32::consts::SQRT_2;

    for j in 0..n {
        for i in 0..n {
            let block = block_rect(config, origin, i, j);
            let block_center = block.center();
            ctx.spawn(rng, EntityCategory::GroundTile, block_center, 0.0, Vec3::ONE);

            let closeness = if max_distance > 0.0 {
                (1.0 - block_center.distance(center) / max_distance).clamp(0.0, 1.0)
            } else {
                1.0
            };

            let params = ScatterParams::new(
                config.buildings_in_block.sample(rng),
                config.min_building_spacing,
                ctx.attempts_per_item,
            );
            let lots = scatter(rng, ScatterRegion::Rect(block.inset(config.building_margin)), &params, |_| true);

            for lot in lots {
                let category = building_category(rng, config, closeness);
                let yaw = right_angle_heading(rng);
                let scale = 1.0 + rng.gen_range(-config.scale_jitter..=config.scale_jitter);
                ctx.spawn(rng, category, lot, yaw, Vec3::splat(scale));
            }
        }
    }

    // Streets on internal grid lines, one segment per block span
    for k in 1..n {
        let line = k as f32 * pitch;
        for span in 0..n {
            let mid = (span as f32 + 0.5) * pitch;
            ctx.spawn(rng, EntityCategory::RoadSegment, Vec2::new(origin.x + line, origin.z + mid), 0.0, Vec3::ONE);
            ctx.spawn(rng, EntityCategory::RoadSegment, Vec2::new(origin.x + mid, origin.z + line), 90.0, Vec3::ONE);
        }
    }

    for j in 0..=n {
        for i in 0..=n {
            let vertex = Vec2::new(origin.x + i as f32 * pitch, origin.z + j as f32 * pitch);
            ctx.spawn(rng, EntityCategory::Intersection, vertex, 0.0, Vec3::ONE);
        }
    }

    CitySite {
        center,
        connection: Vec2::new(center.x, origin.z),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::config::Span;
    use crate::coord::ChunkCoord;
    use crate::entity::PlacedEntity;
    use crate::terrain::HeightSampler;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const SIZE: f32 = 2000.0;

    fn run(config: &CityConfig, coord: ChunkCoord, seed: u64) -> (CitySite, Vec<PlacedEntity>) {
        let terrain = HeightSampler::new(None, 0.0);
        let catalog = StaticCatalog::uniform(4);
        let mut out = Vec::new();
        let mut ctx = GenContext::new(coord, coord.world_bounds(SIZE), 10, &terrain, &catalog, &mut out);
        let site = generate(&mut ctx, &mut ChaCha8Rng::seed_from_u64(seed), config);
        (site, out)
    }

    fn count(entities: &[PlacedEntity], category: EntityCategory) -> usize {
        entities.iter().filter(|e| e.category == category).count()
    }

    #[test]
    fn test_grid_structure() {
        let config = CityConfig::default();
        let (site, out) = run(&config, ChunkCoord::new(1, 1), 9);
        let n = config.blocks_per_side as usize;

        assert_eq!(site.center, ChunkCoord::new(1, 1).world_center(SIZE));
        assert_eq!(count(&out, EntityCategory::GroundTile), n * n);
        assert_eq!(count(&out, EntityCategory::Intersection), (n + 1) * (n + 1));
        assert_eq!(count(&out, EntityCategory::RoadSegment), 2 * (n - 1) * n);
        assert!(site.connection.z < site.center.z);
    }

    #[test]
    fn test_buildings_stay_in_their_blocks() {
        let config = CityConfig::default();
        let coord = ChunkCoord::new(-4, 2);
        let (_, out) = run(&config, coord, 1);
        let center = coord.world_center(SIZE);
        let half = config.footprint() * 0.5;
        let grid = Rect::centered(center, half);

        for entity in out.iter().filter(|e| e.category.is_building()) {
            let pos = entity.pose.position.ground();
            assert!(grid.contains(pos));
            assert_eq!(entity.pose.yaw_degrees % 90.0, 0.0);
            let scale = entity.pose.scale.x;
            assert!((1.0 - config.scale_jitter..=1.0 + config.scale_jitter).contains(&scale));
        }
    }

    #[test]
    fn test_dense_block_spacing() {
        // 50..80 buildings requested per block, none closer than 5 units
        let config = CityConfig {
            blocks_per_side: 2,
            buildings_in_block: Span::new(50, 80),
            min_building_spacing: 5.0,
            ..CityConfig::default()
        };
        let coord = ChunkCoord::new(0, 0);
        let origin = coord.world_center(SIZE) - Vec2::new(config.footprint() * 0.5, config.footprint() * 0.5);

        for seed in 0..5 {
            let (_, out) = run(&config, coord, seed);
            for j in 0..2 {
                for i in 0..2 {
                    let block = block_rect(&config, origin, i, j);
                    let buildings: Vec<Vec2> = out
                        .iter()
                        .filter(|e| e.category.is_building())
                        .map(|e| e.pose.position.ground())
                        .filter(|p| block.contains(*p))
                        .collect();
                    assert!(buildings.len() <= 80);
                    for (a_idx, a) in buildings.iter().enumerate() {
                        for b in &buildings[a_idx + 1..] {
                            assert!(a.distance(*b) >= 5.0);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_center_is_taller_than_edge() {
        let config = CityConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let (mut center_tall, mut edge_tall) = (0, 0);
        for _ in 0..2000 {
            if building_category(&mut rng, &config, 1.0) == EntityCategory::Skyscraper {
                center_tall += 1;
            }
            if building_category(&mut rng, &config, 0.0) == EntityCategory::Skyscraper {
                edge_tall += 1;
            }
        }
        assert_eq!(edge_tall, 0);
        assert!(center_tall > 1000);
    }

    #[test]
    fn test_single_block_city() {
        let config = CityConfig {
            blocks_per_side: 1,
            ..CityConfig::default()
        };
        let (_, out) = run(&config, ChunkCoord::new(0, 0), 3);
        assert_eq!(count(&out, EntityCategory::GroundTile), 1);
        assert_eq!(count(&out, EntityCategory::Intersection), 4);
        assert_eq!(count(&out, EntityCategory::RoadSegment), 0);
    }

    #[test]
    fn test_empty_grid_does_not_panic() {
        let config = CityConfig {
            blocks_per_side: 0,
            ..CityConfig::default()
        };
        let (site, out) = run(&config, ChunkCoord::new(2, -1), 5);
        assert_eq!(site.center, ChunkCoord::new(2, -1).world_center(SIZE));
        assert_eq!(count(&out, EntityCategory::GroundTile), 0);
        assert!(out.iter().all(|e| !e.category.is_building()));
        assert_eq!(count(&out, EntityCategory::Intersection), 1);
    }
}
