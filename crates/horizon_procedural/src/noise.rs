//! # Coherent Noise
//!
//! Seeded 2D simplex noise and the normalized noise fields the classifier
//! samples per chunk.
//!
//! Given the same [`WorldSeed`], every function here produces exactly the
//! same values on every run: the permutation table is shuffled with an
//! integer xorshift, never with platform RNG state.

use horizon_shared::Vec2;

use crate::config::NoiseLayer;
use crate::coord::ChunkCoord;
use crate::seed::WorldSeed;

/// Pre-computed permutation table for noise.
struct PermutationTable {
    /// 512-entry permutation table (256 entries, doubled for overflow handling).
    perm: [u8; 512],
}

impl PermutationTable {
    /// 12 gradient vectors for 2D simplex.
    const GRADIENTS: [[i8; 2]; 12] = [
        [1, 0], [1, 1], [0, 1], [-1, 1],
        [-1, 0], [-1, -1], [0, -1], [1, -1],
        [1, 0], [0, 1], [-1, 0], [0, -1],
    ];

    fn new(seed: WorldSeed) -> Self {
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().take(256).enumerate() {
            *slot = i as u8;
        }

        // Fisher-Yates with xorshift64; a zero state would never advance
        let mut state = seed.value() | 1;
        for i in (1..256).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let j = (state % (i as u64 + 1)) as usize;
            perm.swap(i, j);
        }

        let (low, high) = perm.split_at_mut(256);
        high.copy_from_slice(low);

        Self { perm }
    }

    #[inline]
    fn get(&self, index: usize) -> u8 {
        self.perm[index & 511]
    }

    #[inline]
    fn gradient(hash: u8) -> [i8; 2] {
        Self::GRADIENTS[(hash % 12) as usize]
    }
}

/// 2D simplex noise generator.
///
/// Produces smooth, continuous values in `[-1, 1]`.
pub struct SimplexNoise {
    perm_table: PermutationTable,
}

impl SimplexNoise {
    /// Skewing factor for 2D simplex grid: `(sqrt(3) - 1) / 2`.
    const F2: f64 = 0.366_025_403_784_439;
    /// Unskewing factor for 2D simplex grid: `(3 - sqrt(3)) / 6`.
    const G2: f64 = 0.211_324_865_405_187;

    /// Creates a new simplex noise generator from a seed.
    #[must_use]
    pub fn new(seed: WorldSeed) -> Self {
        Self {
            perm_table: PermutationTable::new(seed),
        }
    }

    /// Samples noise at `(x, y)`; result in `[-1, 1]`.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let skew = (x + y) * Self::F2;
        let i = fast_floor(x + skew);
        let j = fast_floor(y + skew);

        let unskew = f64::from(i.wrapping_add(j)) * Self::G2;
        let x0 = x - (f64::from(i) - unskew);
        let y0 = y - (f64::from(j) - unskew);

        // Upper or lower triangle of the skewed cell
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - f64::from(i1) + Self::G2;
        let y1 = y0 - f64::from(j1) + Self::G2;
        let x2 = x0 - 1.0 + 2.0 * Self::G2;
        let y2 = y0 - 1.0 + 2.0 * Self::G2;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let (i1, j1) = (i1 as usize, j1 as usize);

        let table = &self.perm_table;
        let g0 = table.get(ii + table.get(jj) as usize);
        let g1 = table.get(ii + i1 + table.get(jj + j1) as usize);
        let g2 = table.get(ii + 1 + table.get(jj + 1) as usize);

        // 70 scales the corner sum into [-1, 1]
        70.0 * (corner(x0, y0, g0) + corner(x1, y1, g1) + corner(x2, y2, g2))
    }

    /// Fractal sum of `octaves` layers; result roughly in `[-1, 1]`.
    #[must_use]
    pub fn octaved(&self, x: f64, y: f64, octaves: u32, persistence: f64, lacunarity: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..octaves {
            total += self.sample(x * frequency, y * frequency) * amplitude;
            max_amplitude += amplitude;
            amplitude *= persistence;
            frequency *= lacunarity;
        }

        if max_amplitude > 0.0 {
            total / max_amplitude
        } else {
            0.0
        }
    }

    /// Ridged fractal noise (sharp crests), result in `[0, 1]`.
    #[must_use]
    pub fn ridged(&self, x: f64, y: f64, octaves: u32, persistence: f64, lacunarity: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..octaves {
            let ridge = 1.0 - self.sample(x * frequency, y * frequency).abs();
            total += ridge * ridge * amplitude;
            max_amplitude += amplitude;
            amplitude *= persistence;
            frequency *= lacunarity;
        }

        if max_amplitude > 0.0 {
            total / max_amplitude
        } else {
            0.0
        }
    }
}

/// Contribution of one simplex corner.
#[inline]
fn corner(x: f64, y: f64, gradient_index: u8) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        return 0.0;
    }
    let grad = PermutationTable::gradient(gradient_index);
    let t2 = t * t;
    t2 * t2 * (x * f64::from(grad[0]) + y * f64::from(grad[1]))
}

/// `floor` for the simplex lattice.
#[inline]
fn fast_floor(x: f64) -> i32 {
    let xi = x as i32;
    if x < f64::from(xi) {
        xi - 1
    } else {
        xi
    }
}

/// A normalized noise field sampled on the chunk grid.
///
/// `value(coord) = noise((coord + offset) * scale)` remapped to `[0, 1]`.
pub struct NoiseField {
    noise: SimplexNoise,
    scale: f64,
    offset: Vec2,
}

impl NoiseField {
    /// Builds the field for one configured layer.
    #[must_use]
    pub fn new(seed: WorldSeed, layer: &NoiseLayer) -> Self {
        Self {
            noise: SimplexNoise::new(seed),
            scale: f64::from(layer.scale),
            offset: layer.offset,
        }
    }

    /// Field value for a chunk, in `[0, 1]`.
    #[must_use]
    pub fn value(&self, coord: ChunkCoord) -> f32 {
        let x = (f64::from(coord.x) + f64::from(self.offset.x)) * self.scale;
        let z = (f64::from(coord.z) + f64::from(self.offset.z)) * self.scale;
        let raw = self.noise.sample(x, z);
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let seed = WorldSeed::new(12345);
        let noise1 = SimplexNoise::new(seed);
        let noise2 = SimplexNoise::new(seed);

        for i in 0..100 {
            let x = f64::from(i) * 0.1;
            let y = f64::from(i) * 0.17;
            assert_eq!(noise1.sample(x, y), noise2.sample(x, y));
        }
    }

    #[test]
    fn test_different_seeds_different_results() {
        let noise1 = SimplexNoise::new(WorldSeed::new(1));
        let noise2 = SimplexNoise::new(WorldSeed::new(2));

        assert_ne!(noise1.sample(100.3, 100.7), noise2.sample(100.3, 100.7));
    }

    #[test]
    fn test_range() {
        let noise = SimplexNoise::new(WorldSeed::new(42));

        for i in 0..10_000 {
            let x = f64::from(i) * 0.1 - 500.0;
            let y = f64::from(i) * 0.13 - 650.0;
            let value = noise.sample(x, y);
            assert!((-1.0..=1.0).contains(&value), "Value {value} out of range at ({x}, {y})");
        }
    }

    #[test]
    fn test_continuity() {
        let noise = SimplexNoise::new(WorldSeed::new(42));
        let v1 = noise.sample(100.0, 100.0);
        let v2 = noise.sample(100.001, 100.0);
        assert!((v1 - v2).abs() < 0.01, "Noise should be continuous");
    }

    #[test]
    fn test_fractal_variants_in_range() {
        let noise = SimplexNoise::new(WorldSeed::new(7));
        for i in 0..500 {
            let x = f64::from(i) * 0.37;
            let octaved = noise.octaved(x, -x, 5, 0.5, 2.0);
            let ridged = noise.ridged(x, -x, 3, 0.5, 2.0);
            assert!((-1.0..=1.0).contains(&octaved));
            assert!((0.0..=1.0).contains(&ridged));
        }
        assert_eq!(noise.octaved(1.0, 1.0, 0, 0.5, 2.0), 0.0);
    }

    #[test]
    fn test_field_is_normalized_and_offset() {
        let layer = NoiseLayer::new(0.2, Vec2::new(0.0, 0.0), 0.5);
        let shifted = NoiseLayer::new(0.2, Vec2::new(10.0, 0.0), 0.5);
        let seed = WorldSeed::new(99);
        let field = NoiseField::new(seed, &layer);
        let shifted_field = NoiseField::new(seed, &shifted);

        for x in -20..20 {
            for z in -20..20 {
                let v = field.value(ChunkCoord::new(x, z));
                assert!((0.0..=1.0).contains(&v));
            }
        }
        // Offsetting by 10 chunks is the same as sampling 10 chunks over
        assert_eq!(
            shifted_field.value(ChunkCoord::new(0, 3)),
            field.value(ChunkCoord::new(10, 3))
        );
    }
}
