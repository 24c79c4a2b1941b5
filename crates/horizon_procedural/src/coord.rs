//! # Chunk Coordinates
//!
//! The world is partitioned into square chunks of `chunk_size` world units.
//! Chunk `(x, z)` covers `[x * size, (x + 1) * size)` on both axes, so a
//! position lying exactly on a boundary belongs to the chunk above it and
//! negative positions round towards negative infinity.

use horizon_shared::{Rect, Vec2, Vec3};

/// Chunk coordinate (identifies a chunk in the world grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkCoord {
    /// X coordinate (in chunks, not world units).
    pub x: i32,
    /// Z coordinate (in chunks, not world units).
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk containing a ground-plane position.
    #[inline]
    #[must_use]
    pub fn from_ground(pos: Vec2, chunk_size: f32) -> Self {
        Self {
            x: floor_index(pos.x, chunk_size),
            z: floor_index(pos.z, chunk_size),
        }
    }

    /// Chunk containing a world position (height is ignored).
    #[inline]
    #[must_use]
    pub fn from_world(pos: Vec3, chunk_size: f32) -> Self {
        Self::from_ground(pos.ground(), chunk_size)
    }

    /// World position of the chunk's minimum corner.
    #[inline]
    #[must_use]
    pub fn world_origin(self, chunk_size: f32) -> Vec2 {
        Vec2::new(self.x as f32 * chunk_size, self.z as f32 * chunk_size)
    }

    /// World position of the chunk's center.
    ///
    /// Height is resolved separately through the terrain provider.
    #[inline]
    #[must_use]
    pub fn world_center(self, chunk_size: f32) -> Vec2 {
        let half = chunk_size * 0.5;
        let origin = self.world_origin(chunk_size);
        Vec2::new(origin.x + half, origin.z + half)
    }

    /// Area covered by the chunk.
    #[must_use]
    pub fn world_bounds(self, chunk_size: f32) -> Rect {
        let origin = self.world_origin(chunk_size);
        Rect::new(
            origin,
            Vec2::new(origin.x + chunk_size, origin.z + chunk_size),
        )
    }

    /// Chebyshev (max-axis) distance in chunks.
    #[inline]
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dz = self.z.abs_diff(other.z);
        dx.max(dz)
    }

    /// Euclidean distance in chunks.
    #[inline]
    #[must_use]
    pub fn euclidean_distance(self, other: Self) -> f32 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dz = f64::from(self.z) - f64::from(other.z);
        (dx * dx + dz * dz).sqrt() as f32
    }

    /// Every coordinate within `radius` (Chebyshev, inclusive) of `self`,
    /// in row-major order.
    pub fn square_around(self, radius: u32) -> impl Iterator<Item = Self> {
        let r = i64::from(radius);
        let (cx, cz) = (i64::from(self.x), i64::from(self.z));
        (cz - r..=cz + r).flat_map(move |z| {
            (cx - r..=cx + r).filter_map(move |x| {
                Some(Self::new(i32::try_from(x).ok()?, i32::try_from(z).ok()?))
            })
        })
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// `floor(value / size)` clamped to the `i32` range.
#[inline]
fn floor_index(value: f32, size: f32) -> i32 {
    let cell = (f64::from(value) / f64::from(size)).floor();
    // Float-to-int `as` saturates; NaN maps to 0
    cell as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: f32 = 2000.0;

    #[test]
    fn test_chunk_coord_from_world() {
        let at = |x: f32, z: f32| ChunkCoord::from_ground(Vec2::new(x, z), SIZE);
        assert_eq!(at(0.0, 0.0), ChunkCoord::new(0, 0));
        assert_eq!(at(1999.9, 1999.9), ChunkCoord::new(0, 0));
        assert_eq!(at(2000.0, 2000.0), ChunkCoord::new(1, 1));
        assert_eq!(at(-0.1, -0.1), ChunkCoord::new(-1, -1));
        assert_eq!(at(-2000.0, -2000.0), ChunkCoord::new(-1, -1));
        assert_eq!(at(-2000.1, 4000.0), ChunkCoord::new(-2, 2));
    }

    #[test]
    fn test_height_is_ignored() {
        let coord = ChunkCoord::from_world(Vec3::new(2500.0, 9000.0, -10.0), SIZE);
        assert_eq!(coord, ChunkCoord::new(1, -1));
    }

    #[test]
    fn test_center_lies_in_own_cell() {
        for x in -50..50 {
            for z in [-3, 0, 7] {
                let world = Vec2::new(x as f32 * 173.3, z as f32 * 911.7);
                let coord = ChunkCoord::from_ground(world, SIZE);
                let center = coord.world_center(SIZE);

                assert_eq!(ChunkCoord::from_ground(center, SIZE), coord);
                assert!(coord.world_bounds(SIZE).contains(world));
            }
        }
    }

    #[test]
    fn test_boundary_maps_to_lower_edge_owner() {
        for k in -4..=4 {
            let edge = k as f32 * SIZE;
            let coord = ChunkCoord::from_ground(Vec2::new(edge, edge), SIZE);
            assert_eq!(coord, ChunkCoord::new(k, k));
            assert_eq!(coord.world_origin(SIZE), Vec2::new(edge, edge));
        }
    }

    #[test]
    fn test_distances() {
        let a = ChunkCoord::new(0, 0);
        let b = ChunkCoord::new(3, -4);
        assert_eq!(a.chebyshev_distance(b), 4);
        assert_eq!(a.euclidean_distance(b), 5.0);
        assert_eq!(b.chebyshev_distance(b), 0);
    }

    #[test]
    fn test_square_around() {
        let coords: Vec<_> = ChunkCoord::new(0, 0).square_around(3).collect();
        assert_eq!(coords.len(), 49);
        assert_eq!(coords[0], ChunkCoord::new(-3, -3));
        assert_eq!(coords[48], ChunkCoord::new(3, 3));
        assert!(coords.iter().all(|c| c.chebyshev_distance(ChunkCoord::default()) <= 3));

        let single: Vec<_> = ChunkCoord::new(5, 5).square_around(0).collect();
        assert_eq!(single, vec![ChunkCoord::new(5, 5)]);
    }
}
