//! World-space math shared by the streaming core and its consumers.
//!
//! The world is Y-up. Generation happens on the XZ ground plane, so most
//! placement code works with [`Vec2`] (x, z) and only lifts to [`Vec3`]
//! once a terrain height has been resolved.
//!
//! Headings are yaw angles in degrees: 0° points along +Z, 90° along +X.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 3D vector - world positions and scales.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component (up)
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// All components set to one
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Uniform vector with every component set to `value`.
    #[must_use]
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// Drops the height component.
    #[must_use]
    pub const fn ground(self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }
}

/// Ground-plane vector (world X and world Z).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec2 {
    /// World X
    pub x: f32,
    /// World Z
    pub z: f32,
}

impl Vec2 {
    /// Creates a new Vec2
    #[must_use]
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Unit vector pointing along `heading_degrees`.
    #[must_use]
    pub fn from_heading(heading_degrees: f32) -> Self {
        let (sin, cos) = heading_degrees.to_radians().sin_cos();
        Self::new(sin, cos)
    }

    /// Lifts the vector into world space at height `y`.
    #[must_use]
    pub const fn with_height(self, y: f32) -> Vec3 {
        Vec3::new(self.x, y, self.z)
    }

    /// Dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.z * other.z
    }

    /// Length squared (avoids sqrt)
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Distance squared to another point (avoids sqrt)
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f32 {
        (self - other).length_squared()
    }

    /// Distance to another point
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Heading of this direction vector, in `[0, 360)`.
    ///
    /// The zero vector has heading 0.
    #[must_use]
    pub fn heading_degrees(self) -> f32 {
        normalize_degrees(self.x.atan2(self.z).to_degrees())
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.z - rhs.z)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.z * rhs)
    }
}

/// Axis-aligned rectangle on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum corner (inclusive)
    pub min: Vec2,
    /// Maximum corner (exclusive for containment tests)
    pub max: Vec2,
}

impl Rect {
    /// Creates a rectangle from two corners.
    #[must_use]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Square of side `2 * half_extent` around `center`.
    #[must_use]
    pub fn centered(center: Vec2, half_extent: f32) -> Self {
        Self::new(
            Vec2::new(center.x - half_extent, center.z - half_extent),
            Vec2::new(center.x + half_extent, center.z + half_extent),
        )
    }

    /// Extent along X.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Extent along Z.
    #[must_use]
    pub fn depth(&self) -> f32 {
        self.max.z - self.min.z
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Half-open containment test (`min <= p < max`).
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.z >= self.min.z && point.z < self.max.z
    }

    /// Shrinks every side by `margin`.
    ///
    /// A side that would invert collapses onto the center line.
    #[must_use]
    pub fn inset(&self, margin: f32) -> Self {
        let center = self.center();
        let half_w = (self.width() * 0.5 - margin).max(0.0);
        let half_d = (self.depth() * 0.5 - margin).max(0.0);
        Self::new(
            Vec2::new(center.x - half_w, center.z - half_d),
            Vec2::new(center.x + half_w, center.z + half_d),
        )
    }
}

/// Placement pose of an instantiated template.
///
/// Rotation is a yaw around +Y; nothing in the world is pitched or rolled.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Pose {
    /// World position
    pub position: Vec3,
    /// Yaw in degrees, `[0, 360)`
    pub yaw_degrees: f32,
    /// Per-axis scale
    pub scale: Vec3,
}

impl Pose {
    /// Creates a new pose; the yaw is normalized into `[0, 360)`.
    #[must_use]
    pub fn new(position: Vec3, yaw_degrees: f32, scale: Vec3) -> Self {
        Self {
            position,
            yaw_degrees: normalize_degrees(yaw_degrees),
            scale,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.0, Vec3::ONE)
    }
}

/// Wraps an angle into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_cardinal_directions() {
        assert_eq!(Vec2::new(0.0, 1.0).heading_degrees(), 0.0);
        assert!((Vec2::new(1.0, 0.0).heading_degrees() - 90.0).abs() < 1e-4);
        assert!((Vec2::new(0.0, -1.0).heading_degrees() - 180.0).abs() < 1e-4);
        assert!((Vec2::new(-1.0, 0.0).heading_degrees() - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_heading_roundtrip() {
        for deg in [0.0f32, 33.0, 90.0, 181.5, 359.0] {
            let dir = Vec2::from_heading(deg);
            assert!((dir.length() - 1.0).abs() < 1e-5);
            assert!((dir.heading_degrees() - deg).abs() < 1e-3, "heading {deg}");
        }
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(450.0), 90.0);
        let tiny = normalize_degrees(-1e-9);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_rect_inset_and_contains() {
        let rect = Rect::centered(Vec2::new(10.0, 10.0), 5.0);
        assert_eq!(rect.width(), 10.0);
        assert!(rect.contains(Vec2::new(5.0, 5.0)));
        assert!(!rect.contains(Vec2::new(15.0, 10.0)));

        let inner = rect.inset(2.0);
        assert_eq!(inner.width(), 6.0);

        let collapsed = rect.inset(100.0);
        assert_eq!(collapsed.width(), 0.0);
        assert_eq!(collapsed.center(), rect.center());
    }

    #[test]
    fn test_pose_bytemuck() {
        let pose = Pose::new(Vec3::new(1.0, 2.0, 3.0), 90.0, Vec3::ONE);
        let bytes: &[u8] = bytemuck::bytes_of(&pose);
        assert_eq!(bytes.len(), 28); // 7 * 4 bytes
    }
}
