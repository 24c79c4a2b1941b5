//! # Windmill Fields
//!
//! Spaced windmills, each optionally fenced in and surrounded by a little
//! vegetation. Rotor speeds come from their own random stream: the rotors
//! are purely visual and must never shift where anything is placed.

use horizon_shared::{Vec2, Vec3};
use rand::Rng;

use super::{random_heading, GenContext, RotorSpec};
use crate::config::WindmillConfig;
use crate::entity::EntityCategory;
use crate::placement::{scatter, ScatterParams, ScatterRegion};

/// Populates a windmill chunk and returns one rotor per windmill.
pub fn generate<R, S>(
    ctx: &mut GenContext<'_>,
    rng: &mut R,
    rotor_rng: &mut S,
    config: &WindmillConfig,
) -> Vec<RotorSpec>
where
    R: Rng + ?Sized,
    S: Rng + ?Sized,
{
    if !ctx.has_templates(EntityCategory::Windmill) {
        return Vec::new();
    }

    let fence_radius = if config.fence.enabled { config.fence.radius } else { 0.0 };
    let region = ScatterRegion::Rect(ctx.bounds.inset(fence_radius));
    let params = ScatterParams::new(config.count, config.min_spacing, ctx.attempts_per_item);
    let sites = {
        let terrain_ok = |p: Vec2| !config.prefer_high_ground || ctx.height_at(p) >= config.min_height;
        scatter(rng, region, &params, terrain_ok)
    };

    let mut rotors = Vec::with_capacity(sites.len());
    for site in sites {
        let yaw = random_heading(rng);
        let Some(entity) = ctx.spawn(rng, EntityCategory::Windmill, site, yaw, Vec3::ONE) else {
            continue;
        };
        rotors.push(RotorSpec {
            entity,
            speed: config.rotor_speed.sample(rotor_rng),
        });

        if config.fence.enabled {
            fence_ring(ctx, rng, site, config.fence.radius, config.fence.segments);
        }

        for _ in 0..config.vegetation.count {
            let category = if rng.gen_bool(0.5) {
                EntityCategory::Tree
            } else {
                EntityCategory::Bush
            };
            let distance = fence_radius + config.vegetation.offset.sample(rng);
            let at = site + Vec2::from_heading(random_heading(rng)) * distance;
            let yaw = random_heading(rng);
            ctx.spawn(rng, category, at, yaw, Vec3::ONE);
        }
    }
    rotors
}

/// `segments` fence pieces on a circle, each tangent to it.
fn fence_ring<R: Rng + ?Sized>(ctx: &mut GenContext<'_>, rng: &mut R, center: Vec2, radius: f32, segments: u32) {
    let step = 360.0 / segments as f32;
    for i in 0..segments {
        let angle = i as f32 * step;
        let at = center + Vec2::from_heading(angle) * radius;
        ctx.spawn(rng, EntityCategory::Fence, at, angle + 90.0, Vec3::ONE);
    }
}
