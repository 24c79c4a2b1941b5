//! Spawn-area protection.
//!
//! Chunks around the hand-placed spawn (home airfield, tutorial area) are
//! marked protected once at startup and never receive generated content.

use std::collections::BTreeSet;

use tracing::info;

use crate::config::ProtectedZoneConfig;
use crate::coord::ChunkCoord;

/// Fixed set of protected chunk coordinates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProtectedZone {
    chunks: BTreeSet<ChunkCoord>,
}

impl ProtectedZone {
    /// Zone protecting nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every chunk within `radius` (Euclidean, in chunks) of `center`.
    #[must_use]
    pub fn around(center: ChunkCoord, radius: u32) -> Self {
        let chunks = center
            .square_around(radius)
            .filter(|&coord| coord.euclidean_distance(center) <= radius as f32)
            .collect();
        Self { chunks }
    }

    /// Builds the zone from configuration.
    #[must_use]
    pub fn from_config(config: &ProtectedZoneConfig, chunk_size: f32) -> Self {
        if !config.enabled {
            return Self::empty();
        }
        let center = ChunkCoord::from_ground(config.spawn, chunk_size);
        let zone = Self::around(center, config.radius);
        info!(
            spawn_chunk = %center,
            radius = config.radius,
            chunks = zone.len(),
            "protected zone established"
        );
        zone
    }

    /// Returns true if `coord` is protected.
    #[must_use]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains(&coord)
    }

    /// Number of protected chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns true if nothing is protected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Protected coordinates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.iter().copied()
    }
}
