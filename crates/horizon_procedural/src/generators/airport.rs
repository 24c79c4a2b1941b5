//! Airport placer: one airfield at the chunk center.

use horizon_shared::{Vec2, Vec3};
use rand::Rng;

use super::{right_angle_heading, GenContext};
use crate::config::AirportConfig;
use crate::entity::EntityCategory;

/// A placed airport and its road hand-off point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AirportSite {
    /// Airport position on the ground plane.
    pub position: Vec2,
    /// Runway heading, a multiple of 90 degrees.
    pub heading_degrees: f32,
    /// Point `connection_offset` ahead of the airport along its heading.
    pub connection: Vec2,
}

/// Places the airport of an airport chunk.
///
/// Returns `None` if the catalog has no airport template.
pub fn generate<R: Rng + ?Sized>(
    ctx: &mut GenContext<'_>,
    rng: &mut R,
    config: &AirportConfig,
) -> Option<AirportSite> {
    let position = ctx.bounds.center();
    let heading_degrees = right_angle_heading(rng);

    ctx.spawn(rng, EntityCategory::Airport, position, heading_degrees, Vec3::ONE)?;

    Some(AirportSite {
        position,
        heading_degrees,
        connection: position + Vec2::from_heading(heading_degrees) * config.connection_offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::coord::ChunkCoord;
    use crate::terrain::HeightSampler;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_airport_at_center_with_snapped_heading() {
        let terrain = HeightSampler::new(None, 0.0);
        let catalog = StaticCatalog::uniform(2);
        let coord = ChunkCoord::new(3, -2);
        let config = AirportConfig::default();

        for seed in 0..20 {
            let mut out = Vec::new();
            let mut ctx = GenContext::new(coord, coord.world_bounds(2000.0), 10, &terrain, &catalog, &mut out);
            let site = generate(&mut ctx, &mut ChaCha8Rng::seed_from_u64(seed), &config).unwrap();

            assert_eq!(site.position, coord.world_center(2000.0));
            assert_eq!(site.heading_degrees % 90.0, 0.0);
            assert!((site.position.distance(site.connection) - 350.0).abs() < 1e-2);
            assert_eq!(out.len(), 1);
            assert_eq!(out[0].category, EntityCategory::Airport);
            assert_eq!(out[0].pose.yaw_degrees, site.heading_degrees);
        }
    }

    #[test]
    fn test_no_template_no_airport() {
        let terrain = HeightSampler::new(None, 0.0);
        let catalog = StaticCatalog::uniform(1).without(EntityCategory::Airport);
        let coord = ChunkCoord::new(0, 0);
        let mut out = Vec::new();
        let mut ctx = GenContext::new(coord, coord.world_bounds(2000.0), 10, &terrain, &catalog, &mut out);

        let site = generate(&mut ctx, &mut ChaCha8Rng::seed_from_u64(1), &AirportConfig::default());
        assert!(site.is_none());
        assert!(out.is_empty());
    }
}
