//! # Lake Generator
//!
//! Lakes are built from overlapping circular water patches: one central
//! patch plus a few smaller ones around it to break up the outline. Trees,
//! bushes and rocks are then scattered on rings around the shore.

use horizon_shared::{Vec2, Vec3};
use rand::Rng;

use super::{random_heading, GenContext};
use crate::config::{LakeConfig, VegetationRing};
use crate::entity::EntityCategory;
use crate::placement::{scatter_avoiding, AvoidList, ScatterParams, ScatterRegion};

/// One generated lake.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LakeSite {
    /// Center of the main patch.
    pub center: Vec2,
    /// Radius of the main patch.
    pub radius: f32,
}

/// Populates a lake chunk.
///
/// Lake centers keep `min_lake_spacing` from each other and from every
/// point in `exclusions`.
pub fn generate<R: Rng + ?Sized>(
    ctx: &mut GenContext<'_>,
    rng: &mut R,
    config: &LakeConfig,
    exclusions: &[Vec2],
) -> Vec<LakeSite> {
    if !ctx.has_templates(EntityCategory::LakeWaterPatch) {
        return Vec::new();
    }

    let region = ScatterRegion::Rect(ctx.bounds.inset(config.base_radius.max));
    let params = ScatterParams::new(config.count, config.min_lake_spacing, ctx.attempts_per_item);
    let avoid = AvoidList {
        points: exclusions,
        distance: config.min_lake_spacing,
    };
    let centers = scatter_avoiding(rng, region, &params, avoid, |_| true);

    let mut lakes = Vec::with_capacity(centers.len());
    for center in centers {
        let radius = config.base_radius.sample(rng);
        water_patch(ctx, rng, center, radius);

        for _ in 0..config.extra_patches.sample(rng) {
            let patch_radius = radius * config.patch_radius_fraction.sample(rng);
            let distance = radius * config.patch_offset_fraction.sample(rng);
            let at = center + Vec2::from_heading(random_heading(rng)) * distance;
            water_patch(ctx, rng, at, patch_radius);
        }

        shore_ring(ctx, rng, EntityCategory::Tree, &config.trees, center, radius, config.irregularity);
        shore_ring(ctx, rng, EntityCategory::Bush, &config.bushes, center, radius, config.irregularity);
        shore_ring(ctx, rng, EntityCategory::Rock, &config.rocks, center, radius, config.irregularity);

        lakes.push(LakeSite { center, radius });
    }
    lakes
}

/// Unit-radius disc template scaled to `radius`.
fn water_patch<R: Rng + ?Sized>(ctx: &mut GenContext<'_>, rng: &mut R, at: Vec2, radius: f32) {
    ctx.spawn(rng, EntityCategory::LakeWaterPatch, at, 0.0, Vec3::new(radius, 1.0, radius));
}

fn shore_ring<R: Rng + ?Sized>(
    ctx: &mut GenContext<'_>,
    rng: &mut R,
    category: EntityCategory,
    ring: &VegetationRing,
    center: Vec2,
    radius: f32,
    irregularity: f32,
) {
    if ring.count == 0 || !ctx.has_templates(category) {
        return;
    }
    for _ in 0..ring.count {
        let angle = random_heading(rng);
        let distance = radius + ring.offset.sample(rng) + rng.gen_range(-irregularity..=irregularity);
        let at = center + Vec2::from_heading(angle) * distance;
        let yaw = random_heading(rng);
        ctx.spawn(rng, category, at, yaw, Vec3::ONE);
    }
}
