//! # Placed Entities
//!
//! What a generator produces: a category tag, which template of that
//! category to instantiate, and where.

use horizon_shared::Pose;
use serde::{Deserialize, Serialize};

/// Entity category tags.
///
/// Discriminants are part of the canonical byte encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum EntityCategory {
    /// City block ground tile.
    GroundTile = 0,
    /// Low-rise building.
    BuildingSmall = 1,
    /// Mid-rise building.
    BuildingMedium = 2,
    /// High-rise building.
    Skyscraper = 3,
    /// Straight road segment.
    RoadSegment = 4,
    /// Road intersection.
    Intersection = 5,
    /// Circular water patch.
    LakeWaterPatch = 6,
    /// Tree.
    Tree = 7,
    /// Bush.
    Bush = 8,
    /// Rock.
    Rock = 9,
    /// Windmill (tower + rotor).
    Windmill = 10,
    /// Fence segment.
    Fence = 11,
    /// Airport.
    Airport = 12,
}

impl EntityCategory {
    /// Every category, in discriminant order.
    pub const ALL: [Self; 13] = [
        Self::GroundTile,
        Self::BuildingSmall,
        Self::BuildingMedium,
        Self::Skyscraper,
        Self::RoadSegment,
        Self::Intersection,
        Self::LakeWaterPatch,
        Self::Tree,
        Self::Bush,
        Self::Rock,
        Self::Windmill,
        Self::Fence,
        Self::Airport,
    ];

    /// Human-readable tag.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GroundTile => "ground-tile",
            Self::BuildingSmall => "building-small",
            Self::BuildingMedium => "building-medium",
            Self::Skyscraper => "skyscraper",
            Self::RoadSegment => "road-segment",
            Self::Intersection => "intersection",
            Self::LakeWaterPatch => "lake-water-patch",
            Self::Tree => "tree",
            Self::Bush => "bush",
            Self::Rock => "rock",
            Self::Windmill => "windmill",
            Self::Fence => "fence",
            Self::Airport => "airport",
        }
    }

    /// Returns true for the three building categories.
    #[must_use]
    pub const fn is_building(self) -> bool {
        matches!(self, Self::BuildingSmall | Self::BuildingMedium | Self::Skyscraper)
    }
}

impl std::fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One instantiated template.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedEntity {
    /// Category tag.
    pub category: EntityCategory,
    /// Index into the category's template list.
    pub template: u16,
    /// World pose.
    pub pose: Pose,
}

impl PlacedEntity {
    /// Size of [`PlacedEntity::to_bytes`] output.
    pub const ENCODED_LEN: usize = 3 + std::mem::size_of::<Pose>();

    /// Canonical little-endian encoding: category, template, then the
    /// seven pose floats (position, yaw, scale).
    ///
    /// Identical on every platform; two generation passes are equal exactly
    /// when their encodings are.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::ENCODED_LEN] {
        let mut out = [0u8; Self::ENCODED_LEN];
        out[0] = self.category as u8;
        out[1..3].copy_from_slice(&self.template.to_le_bytes());
        let floats: [f32; 7] = bytemuck::cast(self.pose);
        for (chunk, value) in out[3..].chunks_exact_mut(4).zip(floats) {
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        out
    }
}

/// Encodes a whole entity list.
#[must_use]
pub fn encode_entities(entities: &[PlacedEntity]) -> Vec<u8> {
    entities.iter().flat_map(PlacedEntity::to_bytes).collect()
}
