//! # Chunk Records
//!
//! A loaded chunk owns every entity generated for it through a plain list of
//! arena handles; unloading the chunk destroys exactly that list.

use horizon_core::EntityId;
use horizon_shared::normalize_degrees;

use crate::classifier::Classification;
use crate::coord::ChunkCoord;
use crate::generators::Landmarks;
use crate::seed::ChunkSeed;

/// Lifecycle state of a chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChunkState {
    /// Not present in the world grid.
    Unloaded,
    /// Generated and populated.
    Loaded,
    /// Inside the protected zone: present but never populated.
    Protected,
}

/// Animated windmill rotor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotor {
    /// Windmill entity the rotor belongs to.
    pub entity: EntityId,
    /// Current blade angle in degrees, `[0, 360)`.
    pub angle_degrees: f32,
    /// Angular speed in degrees per second.
    pub speed: f32,
}

impl Rotor {
    /// Creates a rotor at angle 0.
    #[must_use]
    pub const fn new(entity: EntityId, speed: f32) -> Self {
        Self {
            entity,
            angle_degrees: 0.0,
            speed,
        }
    }

    /// Advances the blade by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.angle_degrees = normalize_degrees(self.angle_degrees + self.speed * dt);
    }
}

/// One entry of the world grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    coord: ChunkCoord,
    state: ChunkState,
    seed: ChunkSeed,
    classification: Option<Classification>,
    landmarks: Landmarks,
    entities: Vec<EntityId>,
    rotors: Vec<Rotor>,
}

impl Chunk {
    /// A populated chunk.
    #[must_use]
    pub fn loaded(
        coord: ChunkCoord,
        seed: ChunkSeed,
        classification: Classification,
        landmarks: Landmarks,
        entities: Vec<EntityId>,
        rotors: Vec<Rotor>,
    ) -> Self {
        Self {
            coord,
            state: ChunkState::Loaded,
            seed,
            classification: Some(classification),
            landmarks,
            entities,
            rotors,
        }
    }

    /// A protected chunk (no classification, no content).
    #[must_use]
    pub fn protected(coord: ChunkCoord, seed: ChunkSeed) -> Self {
        Self {
            coord,
            state: ChunkState::Protected,
            seed,
            classification: None,
            landmarks: Landmarks::default(),
            entities: Vec::new(),
            rotors: Vec::new(),
        }
    }

    /// Chunk coordinate.
    #[must_use]
    pub const fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ChunkState {
        self.state
    }

    /// Returns true for protected chunks.
    #[must_use]
    pub fn is_protected(&self) -> bool {
        self.state == ChunkState::Protected
    }

    /// Derived chunk seed.
    #[must_use]
    pub const fn seed(&self) -> ChunkSeed {
        self.seed
    }

    /// Classifier output; `None` for protected chunks.
    #[must_use]
    pub const fn classification(&self) -> Option<&Classification> {
        self.classification.as_ref()
    }

    /// Landmark connection points.
    #[must_use]
    pub const fn landmarks(&self) -> &Landmarks {
        &self.landmarks
    }

    /// Handles of every owned entity, in generation order.
    #[must_use]
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    /// Windmill rotors.
    #[must_use]
    pub fn rotors(&self) -> &[Rotor] {
        &self.rotors
    }

    pub(crate) fn rotors_mut(&mut self) -> &mut [Rotor] {
        &mut self.rotors
    }

    /// Consumes the chunk, yielding its entity handles.
    pub(crate) fn into_entities(self) -> Vec<EntityId> {
        self.entities
    }
}
