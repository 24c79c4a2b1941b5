//! # Terrain Height
//!
//! Generators never own terrain. They ask an injected [`TerrainHeight`]
//! provider for the ground height under each placement and fall back to the
//! configured default height when there is no provider or it cannot answer.
//!
//! Two providers ship with the crate: [`FlatTerrain`] for tests and tools,
//! and [`NoiseTerrain`], a fractal heightfield for standalone runs.

use horizon_shared::Vec2;
use tracing::trace;

use crate::noise::SimplexNoise;
use crate::seed::WorldSeed;

/// External terrain-height query.
pub trait TerrainHeight {
    /// Ground height at world `(x, z)`, or `None` if the provider has no
    /// data there (not streamed in, out of bounds, ...).
    fn sample_height(&self, x: f32, z: f32) -> Option<f32>;
}

/// Constant-height terrain.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlatTerrain(pub f32);

impl TerrainHeight for FlatTerrain {
    fn sample_height(&self, _x: f32, _z: f32) -> Option<f32> {
        Some(self.0)
    }
}

/// Fractal heightfield: rolling lowlands with ridged hills on top.
pub struct NoiseTerrain {
    /// Base elevation noise.
    elevation: SimplexNoise,
    /// Ridge noise for hills.
    ridges: SimplexNoise,
    /// Height of elevation 0.
    base_height: f32,
    /// Height difference between elevation 0 and 1.
    amplitude: f32,
}

impl NoiseTerrain {
    /// World-units to noise-space scale (one feature every ~2.5 km).
    const ELEVATION_SCALE: f64 = 0.0004;

    /// Creates a heightfield from a world seed.
    #[must_use]
    pub fn new(seed: WorldSeed, base_height: f32, amplitude: f32) -> Self {
        Self {
            elevation: SimplexNoise::new(seed.derive(0x7E44)),
            ridges: SimplexNoise::new(seed.derive(0x7E45)),
            base_height,
            amplitude,
        }
    }

    /// Normalized elevation in roughly `[-1, 1]`.
    #[must_use]
    pub fn elevation(&self, x: f32, z: f32) -> f64 {
        let (x, z) = (f64::from(x), f64::from(z));
        let base = self.elevation.octaved(
            x * Self::ELEVATION_SCALE,
            z * Self::ELEVATION_SCALE,
            4,
            0.5,
            2.0,
        );
        let ridged = self.ridges.ridged(
            x * Self::ELEVATION_SCALE * 1.5,
            z * Self::ELEVATION_SCALE * 1.5,
            3,
            0.5,
            2.0,
        );
        apply_terrain_curve(base * 0.8 + ridged * 0.2)
    }
}

impl TerrainHeight for NoiseTerrain {
    fn sample_height(&self, x: f32, z: f32) -> Option<f32> {
        Some(self.base_height + self.elevation(x, z) as f32 * self.amplitude)
    }
}

/// Flattens lowlands for airfields and farmland, keeps hills steep.
fn apply_terrain_curve(elevation: f64) -> f64 {
    if elevation < -0.1 {
        elevation * 0.5 - 0.05
    } else if elevation < 0.3 {
        // Map [-0.1, 0.3] to [-0.1, 0.05]
        let t = (elevation + 0.1) / 0.4;
        -0.1 + t * 0.15
    } else {
        // Map [0.3, 1.0] to [0.05, 1.0]
        let t = (elevation - 0.3) / 0.7;
        0.05 + t * 0.95
    }
}

/// Terrain query with a guaranteed answer.
///
/// Wraps an optional provider; missing providers, `None` answers and
/// non-finite heights all resolve to `fallback`.
pub struct HeightSampler {
    provider: Option<Box<dyn TerrainHeight>>,
    fallback: f32,
}

impl HeightSampler {
    /// Creates a sampler.
    #[must_use]
    pub fn new(provider: Option<Box<dyn TerrainHeight>>, fallback: f32) -> Self {
        Self { provider, fallback }
    }

    /// Returns true if a terrain provider is attached.
    #[must_use]
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Ground height at a ground-plane position.
    #[must_use]
    pub fn height_at(&self, pos: Vec2) -> f32 {
        let Some(provider) = &self.provider else {
            return self.fallback;
        };
        match provider.sample_height(pos.x, pos.z) {
            Some(height) if height.is_finite() => height,
            other => {
                trace!(x = pos.x, z = pos.z, ?other, "terrain query failed, using fallback height");
                self.fallback
            }
        }
    }
}
