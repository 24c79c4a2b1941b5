//! # Road Networks
//!
//! One generator, two configurations (country roads and farm tracks).
//!
//! - **Primary roads** follow a fixed orthogonal grid anchored in world
//!   space, so the grid lines of neighboring chunks meet at the border.
//! - **Secondary roads** start near a random primary intersection and wander
//!   off in a random direction until their length is used up or they reach
//!   the chunk edge.
//! - [`connect_points`] joins arbitrary waypoints with straight roads.
//!
//! Every road is a chain of straight segments; a segment's yaw is the
//! heading of its own direction vector.

use std::collections::BTreeSet;

use horizon_shared::{Vec2, Vec3};
use rand::Rng;
use tracing::debug;

use super::{random_heading, GenContext};
use crate::config::RoadConfig;
use crate::entity::EntityCategory;

/// Primary intersections of one generated network.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoadNetwork {
    /// Primary grid vertices inside the chunk.
    pub intersections: Vec<Vec2>,
}

/// World coordinates of the grid lines `offset + k * spacing` in `[min, max)`.
fn grid_lines(min: f32, max: f32, spacing: f32, offset: f32) -> Vec<f32> {
    let first = ((f64::from(min) - f64::from(offset)) / f64::from(spacing)).ceil();
    let mut lines = Vec::new();
    let mut k = first;
    loop {
        let line = (f64::from(offset) + k * f64::from(spacing)) as f32;
        if line >= max {
            break;
        }
        if line >= min {
            lines.push(line);
        }
        k += 1.0;
    }
    lines
}

/// Generates the road network of one chunk.
pub fn generate<R: Rng + ?Sized>(ctx: &mut GenContext<'_>, rng: &mut R, config: &RoadConfig) -> RoadNetwork {
    let bounds = ctx.bounds;
    let xs = grid_lines(bounds.min.x, bounds.max.x, config.primary_spacing, config.grid_offset.x);
    let zs = grid_lines(bounds.min.z, bounds.max.z, config.primary_spacing, config.grid_offset.z);

    let steps_z = (bounds.depth() / config.segment_length).floor() as u32;
    let steps_x = (bounds.width() / config.segment_length).floor() as u32;
    for &x in &xs {
        for step in 0..steps_z {
            let z = bounds.min.z + (step as f32 + 0.5) * config.segment_length;
            ctx.spawn(rng, EntityCategory::RoadSegment, Vec2::new(x, z), 0.0, Vec3::ONE);
        }
    }
    for &z in &zs {
        for step in 0..steps_x {
            let x = bounds.min.x + (step as f32 + 0.5) * config.segment_length;
            ctx.spawn(rng, EntityCategory::RoadSegment, Vec2::new(x, z), 90.0, Vec3::ONE);
        }
    }

    let mut intersections = Vec::with_capacity(xs.len() * zs.len());
    for &z in &zs {
        for &x in &xs {
            let vertex = Vec2::new(x, z);
            ctx.spawn(rng, EntityCategory::Intersection, vertex, 0.0, Vec3::ONE);
            intersections.push(vertex);
        }
    }

    if intersections.is_empty() {
        debug!(chunk = %ctx.coord, "no primary intersection in chunk, skipping secondary roads");
    } else {
        for _ in 0..config.secondary_count {
            secondary_road(ctx, rng, config, &intersections);
        }
    }

    RoadNetwork { intersections }
}

/// Lays one wandering secondary road.
fn secondary_road<R: Rng + ?Sized>(ctx: &mut GenContext<'_>, rng: &mut R, config: &RoadConfig, anchors: &[Vec2]) {
    let anchor = anchors[rng.gen_range(0..anchors.len())];
    let jitter = config.start_jitter;
    let mut pos = anchor
        + Vec2::new(
            rng.gen_range(-jitter..=jitter),
            rng.gen_range(-jitter..=jitter),
        );
    let mut heading = random_heading(rng);
    let mut remaining = config.secondary_length.sample(rng);
    let wander = config.heading_wander_degrees;

    if !ctx.bounds.contains(pos) {
        return;
    }

    while remaining > 0.0 {
        let step = remaining.min(config.segment_length);
        heading += rng.gen_range(-wander..=wander);
        let next = pos + Vec2::from_heading(heading) * step;
        if !ctx.bounds.contains(next) {
            break;
        }
        lay_segment(ctx, rng, pos, next);
        pos = next;
        remaining -= step;
    }
}

/// One straight segment from `from` to `to`, rotated along its direction.
fn lay_segment<R: Rng + ?Sized>(ctx: &mut GenContext<'_>, rng: &mut R, from: Vec2, to: Vec2) {
    let mid = (from + to) * 0.5;
    let yaw = (to - from).heading_degrees();
    ctx.spawn(rng, EntityCategory::RoadSegment, mid, yaw, Vec3::ONE);
}

/// Links every waypoint to its nearest neighbor with a straight road.
///
/// Each unordered pair is connected at most once. Returns the number of
/// roads laid.
pub fn connect_points<R: Rng + ?Sized>(
    ctx: &mut GenContext<'_>,
    rng: &mut R,
    segment_length: f32,
    points: &[Vec2],
) -> usize {
    let mut pairs = BTreeSet::new();
    for (i, &point) in points.iter().enumerate() {
        let nearest = points
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .min_by(|(_, a), (_, b)| {
                a.distance_squared(point)
                    .total_cmp(&b.distance_squared(point))
            })
            .map(|(j, _)| j);
        if let Some(j) = nearest {
            pairs.insert((i.min(j), i.max(j)));
        }
    }

    for &(a, b) in &pairs {
        let (from, to) = (points[a], points[b]);
        let distance = from.distance(to);
        if distance <= 0.0 {
            continue;
        }
        let steps = (distance / segment_length).ceil().max(1.0) as u32;
        let delta = (to - from) * (1.0 / steps as f32);
        for step in 0..steps {
            let start = from + delta * step as f32;
            lay_segment(ctx, rng, start, start + delta);
        }
    }
    pairs.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::coord::ChunkCoord;
    use crate::entity::PlacedEntity;
    use crate::terrain::HeightSampler;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const SIZE: f32 = 2000.0;

    fn with_ctx<T>(coord: ChunkCoord, f: impl FnOnce(&mut GenContext<'_>) -> T) -> (T, Vec<PlacedEntity>) {
        let terrain = HeightSampler::new(None, 0.0);
        let catalog = StaticCatalog::uniform(2);
        let mut out = Vec::new();
        let mut ctx = GenContext::new(coord, coord.world_bounds(SIZE), 10, &terrain, &catalog, &mut out);
        let result = f(&mut ctx);
        (result, out)
    }

    #[test]
    fn test_grid_lines() {
        assert_eq!(grid_lines(0.0, 2000.0, 500.0, 250.0), vec![250.0, 750.0, 1250.0, 1750.0]);
        assert_eq!(grid_lines(-2000.0, 0.0, 500.0, 250.0), vec![-1750.0, -1250.0, -750.0, -250.0]);
        assert_eq!(grid_lines(0.0, 100.0, 500.0, 250.0), Vec::<f32>::new());
        assert_eq!(grid_lines(0.0, 1000.0, 500.0, 0.0), vec![0.0, 500.0]);
    }

    #[test]
    fn test_primary_grid() {
        let config = RoadConfig {
            secondary_count: 0,
            ..RoadConfig::country()
        };
        let (network, out) = with_ctx(ChunkCoord::new(0, 0), |ctx| {
            generate(ctx, &mut ChaCha8Rng::seed_from_u64(1), &config)
        });

        assert_eq!(network.intersections.len(), 16);
        let segments = out.iter().filter(|e| e.category == EntityCategory::RoadSegment).count();
        // 4 lines per axis, 40 segments per line
        assert_eq!(segments, 2 * 4 * 40);
        assert!(network.intersections.contains(&Vec2::new(250.0, 1750.0)));
    }

    #[test]
    fn test_secondary_roads_stay_in_chunk() {
        let config = RoadConfig::country();
        let coord = ChunkCoord::new(-3, 5);
        let bounds = coord.world_bounds(SIZE);
        for seed in 0..10 {
            let (_, out) = with_ctx(coord, |ctx| {
                generate(ctx, &mut ChaCha8Rng::seed_from_u64(seed), &config)
            });
            for entity in &out {
                assert!(bounds.contains(entity.pose.position.ground()));
            }
        }
    }

    #[test]
    fn test_secondary_segment_yaw_follows_direction() {
        let config = RoadConfig {
            secondary_count: 0,
            ..RoadConfig::farm()
        };
        let (_, out) = with_ctx(ChunkCoord::new(0, 0), |ctx| {
            let anchors = [Vec2::new(1000.0, 1000.0)];
            let mut rng = ChaCha8Rng::seed_from_u64(5);
            secondary_road(ctx, &mut rng, &config, &anchors);
            assert!(ctx.emitted() > 0);
        });

        // Without wander every segment of the chain shares one heading
        let first = out[0].pose.yaw_degrees;
        assert!(out.iter().all(|e| (e.pose.yaw_degrees - first).abs() < 1e-3));
        for pair in out.windows(2) {
            let dir = pair[1].pose.position.ground() - pair[0].pose.position.ground();
            let diff = (dir.heading_degrees() - first).abs();
            assert!(diff < 0.1 || (360.0 - diff) < 0.1);
        }
    }

    #[test]
    fn test_connect_points_pairs_once() {
        let points = [Vec2::new(100.0, 100.0), Vec2::new(300.0, 100.0), Vec2::new(1500.0, 1500.0)];
        let (roads, out) = with_ctx(ChunkCoord::new(0, 0), |ctx| {
            connect_points(ctx, &mut ChaCha8Rng::seed_from_u64(2), 50.0, &points)
        });

        // 0<->1 mutual nearest; 2 links to 1
        assert_eq!(roads, 2);
        let expected = 4 + (points[1].distance(points[2]) / 50.0).ceil() as usize;
        assert_eq!(out.len(), expected);
        assert!(out.iter().all(|e| e.category == EntityCategory::RoadSegment));
        // East-west road
        assert!((out[0].pose.yaw_degrees - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_connect_single_point_is_noop() {
        let (roads, out) = with_ctx(ChunkCoord::new(0, 0), |ctx| {
            connect_points(ctx, &mut ChaCha8Rng::seed_from_u64(2), 50.0, &[Vec2::ZERO])
        });
        assert_eq!(roads, 0);
        assert!(out.is_empty());
    }
}
