//! # HORIZON Procedural World
//!
//! Deterministic, chunk-streamed world generation around a moving observer.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: same global seed + chunk coordinate = same content
//! 2. **Chunk-local**: a chunk never looks at its neighbors while generating
//! 3. **Streamable**: chunks load and unload independently, as a unit
//! 4. **Injected collaborators**: terrain height and template catalogs are
//!    passed in at construction, never looked up
//!
//! ## Core Components
//!
//! - `ChunkCoord`: world <-> chunk mapping
//! - `ChunkClassifier`: which content a chunk receives
//! - `scatter`: spacing-constrained placement shared by all generators
//! - `WorldGenerator`: city, road, lake, windmill and airport passes
//! - `WorldStreamer`: load/unload, protected zone, entity ownership
//!
//! ## Example
//!
//! ```rust,ignore
//! use horizon_procedural::{StaticCatalog, WorldConfig, WorldStreamer};
//! use horizon_shared::Vec3;
//!
//! let config = WorldConfig::load("config/world.toml".as_ref())?;
//! let mut world = WorldStreamer::new(config, Box::new(StaticCatalog::uniform(4)), None)?;
//!
//! // Startup: populate the view square immediately
//! world.refresh(Vec3::ZERO);
//!
//! // Per frame
//! world.update(observer_position, dt);
//! world.tick_animation(dt);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod catalog;
pub mod chunk;
pub mod classifier;
pub mod config;
pub mod coord;
pub mod entity;
pub mod error;
pub mod generators;
pub mod noise;
pub mod placement;
pub mod protected;
pub mod seed;
pub mod streaming;
pub mod terrain;

pub use catalog::{StaticCatalog, TemplateCatalog};
pub use chunk::{Chunk, ChunkState, Rotor};
pub use classifier::{ChunkClassifier, Classification, Membership, NoiseSample};
pub use config::{NoiseLayer, Span, WorldConfig};
pub use coord::ChunkCoord;
pub use entity::{encode_entities, EntityCategory, PlacedEntity};
pub use error::{ConfigError, ConfigResult};
pub use generators::{GeneratedChunk, WorldGenerator};
pub use noise::{NoiseField, SimplexNoise};
pub use placement::{scatter, scatter_avoiding, AvoidList, ScatterParams, ScatterRegion};
pub use protected::ProtectedZone;
pub use seed::{chunk_seed, ChunkSeed, GenStream, WorldSeed};
pub use streaming::{StreamReport, StreamStats, WorldStreamer};
pub use terrain::{FlatTerrain, HeightSampler, NoiseTerrain, TerrainHeight};
