//! # Placement Constraint Solver
//!
//! Rejection sampling shared by every generator that scatters things:
//! buildings in a block, lakes in a chunk, windmills in a field.
//!
//! Candidates are drawn uniformly from a [`ScatterRegion`] and rejected when
//! they come closer than `min_spacing` to a point accepted earlier in the same
//! call, fail the caller's predicate, or come too close to an external avoid
//! list. Spacing is a soft constraint: when the attempt budget runs out the
//! points placed so far are returned.

use horizon_shared::{Rect, Vec2};
use rand::Rng;
use tracing::debug;

/// Area candidates are drawn from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScatterRegion {
    /// Axis-aligned rectangle (uniform over its area).
    Rect(Rect),
    /// Filled circle (uniform over its area).
    Disc {
        /// Circle center.
        center: Vec2,
        /// Circle radius.
        radius: f32,
    },
    /// Ring between two radii (uniform over its area).
    Annulus {
        /// Ring center.
        center: Vec2,
        /// Inner radius.
        inner: f32,
        /// Outer radius.
        outer: f32,
    },
}

impl ScatterRegion {
    /// Draws one candidate.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        match *self {
            Self::Rect(rect) => Vec2::new(
                rect.min.x + rng.gen::<f32>() * rect.width(),
                rect.min.z + rng.gen::<f32>() * rect.depth(),
            ),
            Self::Disc { center, radius } => polar(rng, center, 0.0, radius),
            Self::Annulus {
                center,
                inner,
                outer,
            } => polar(rng, center, inner, outer),
        }
    }
}

/// Area-uniform polar sample between two radii.
fn polar<R: Rng + ?Sized>(rng: &mut R, center: Vec2, inner: f32, outer: f32) -> Vec2 {
    let heading = rng.gen::<f32>() * 360.0;
    let (inner_sq, outer_sq) = (inner * inner, outer * outer);
    let radius = (inner_sq + rng.gen::<f32>() * (outer_sq - inner_sq)).max(0.0).sqrt();
    center + Vec2::from_heading(heading) * radius
}

/// How many points to place and how hard to try.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScatterParams {
    /// Points requested.
    pub count: u32,
    /// Minimum pairwise distance between accepted points.
    pub min_spacing: f32,
    /// Candidate budget for the whole call.
    pub max_attempts: u32,
}

impl ScatterParams {
    /// Default candidate budget per requested point.
    pub const DEFAULT_ATTEMPTS_PER_ITEM: u32 = 10;

    /// Creates parameters with a budget of `count * attempts_per_item`.
    #[must_use]
    pub const fn new(count: u32, min_spacing: f32, attempts_per_item: u32) -> Self {
        Self {
            count,
            min_spacing,
            max_attempts: count.saturating_mul(attempts_per_item),
        }
    }

    /// Overrides the candidate budget.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// External keep-out points for [`scatter_avoiding`].
#[derive(Clone, Copy, Debug)]
pub struct AvoidList<'a> {
    /// Points to stay away from.
    pub points: &'a [Vec2],
    /// Minimum distance to every point.
    pub distance: f32,
}

impl AvoidList<'static> {
    /// No keep-out points.
    pub const NONE: Self = Self {
        points: &[],
        distance: 0.0,
    };
}

impl AvoidList<'_> {
    fn blocks(&self, candidate: Vec2) -> bool {
        let limit = self.distance * self.distance;
        self.points
            .iter()
            .any(|p| p.distance_squared(candidate) < limit)
    }
}

/// Places up to `params.count` mutually spaced points in `region`.
///
/// `accept` can veto individual candidates (terrain checks and the like).
pub fn scatter<R, F>(rng: &mut R, region: ScatterRegion, params: &ScatterParams, accept: F) -> Vec<Vec2>
where
    R: Rng + ?Sized,
    F: FnMut(Vec2) -> bool,
{
    scatter_avoiding(rng, region, params, AvoidList::NONE, accept)
}

/// [`scatter`] that also keeps away from an external point list.
pub fn scatter_avoiding<R, F>(
    rng: &mut R,
    region: ScatterRegion,
    params: &ScatterParams,
    avoid: AvoidList<'_>,
    mut accept: F,
) -> Vec<Vec2>
where
    R: Rng + ?Sized,
    F: FnMut(Vec2) -> bool,
{
    let wanted = params.count as usize;
    let mut placed: Vec<Vec2> = Vec::with_capacity(wanted);
    if wanted == 0 {
        return placed;
    }

    let spacing_sq = params.min_spacing * params.min_spacing;
    let mut attempts = 0;
    while placed.len() < wanted && attempts < params.max_attempts {
        attempts += 1;
        let candidate = region.sample(rng);

        if placed.iter().any(|p| p.distance_squared(candidate) < spacing_sq) {
            continue;
        }
        if avoid.blocks(candidate) || !accept(candidate) {
            continue;
        }
        placed.push(candidate);
    }

    if placed.len() < wanted {
        debug!(
            placed = placed.len(),
            requested = wanted,
            attempts,
            "placement budget exhausted"
        );
    }
    placed
}
