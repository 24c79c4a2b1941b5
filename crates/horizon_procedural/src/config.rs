//! # World Configuration
//!
//! Startup configuration for the streaming world, loaded once from TOML and
//! passed explicitly into [`crate::WorldStreamer::new`]. Nothing reads
//! configuration from ambient global state after startup.
//!
//! Every section has defaults tuned for 2 km chunks, so a config file only
//! needs to list the values it changes:
//!
//! ```toml
//! seed = 42
//! view_distance = 3
//! unload_distance = 5.0
//!
//! [lakes]
//! count = 5
//! min_lake_spacing = 50.0
//! ```

use std::path::Path;

use horizon_shared::Vec2;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Upper bound for every per-chunk item count.
pub const MAX_ITEMS_PER_CHUNK: u32 = 4096;

/// Upper bound for radii measured in chunks and for city grid sides.
pub const MAX_CHUNK_RADIUS: u32 = 64;

/// Upper bound for `placement.attempts_per_item`.
pub const MAX_ATTEMPTS_PER_ITEM: u32 = 1000;

/// Inclusive `{ min, max }` range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span<T> {
    /// Lower bound (inclusive).
    pub min: T,
    /// Upper bound (inclusive).
    pub max: T,
}

impl<T> Span<T> {
    /// Creates a new range.
    #[must_use]
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: SampleUniform + PartialOrd + Copy> Span<T> {
    /// Draws a uniform value from the range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        rng.gen_range(self.min..=self.max)
    }
}

impl<T: Copy + Into<f64>> Span<T> {
    fn validate(&self, field: &'static str) -> ConfigResult<()> {
        let (min, max) = (self.min.into(), self.max.into());
        finite(field, min)?;
        finite(field, max)?;
        if min > max {
            return Err(ConfigError::InvertedRange { field, min, max });
        }
        Ok(())
    }

    fn validate_non_negative(&self, field: &'static str) -> ConfigResult<()> {
        self.validate(field)?;
        non_negative(field, self.min.into())
    }
}

/// Root configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Global seed. `0` means "pick a random seed at startup".
    pub seed: i32,
    /// Side length of a chunk in world units.
    pub chunk_size: f32,
    /// Radius (Chebyshev, in chunks) of the square that must be loaded.
    pub view_distance: u32,
    /// Radius (Euclidean, in chunks) beyond which chunks are destroyed.
    pub unload_distance: f32,
    /// Seconds between streaming checks.
    pub check_interval_secs: f32,
    /// Height used when no terrain provider answers.
    pub default_height: f32,
    /// Shared placement-solver settings.
    pub placement: PlacementConfig,
    /// Hand-placed spawn area that never receives generated content.
    pub protected_zone: ProtectedZoneConfig,
    /// Per-category noise fields.
    pub noise: NoiseConfig,
    /// City generator.
    pub city: CityConfig,
    /// Country road network generator.
    pub country_roads: RoadConfig,
    /// Farm road network generator.
    pub farm_roads: RoadConfig,
    /// Lake generator.
    pub lakes: LakeConfig,
    /// Windmill field generator.
    pub windmills: WindmillConfig,
    /// Airport placer.
    pub airport: AirportConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            chunk_size: 2000.0,
            view_distance: 3,
            unload_distance: 5.0,
            check_interval_secs: 0.5,
            default_height: 0.0,
            placement: PlacementConfig::default(),
            protected_zone: ProtectedZoneConfig::default(),
            noise: NoiseConfig::default(),
            city: CityConfig::default(),
            country_roads: RoadConfig::country(),
            farm_roads: RoadConfig::farm(),
            lakes: LakeConfig::default(),
            windmills: WindmillConfig::default(),
            airport: AirportConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Small, fast configuration for tests.
    ///
    /// Keeps the default layout but thins every generator out so a full
    /// 7x7 load finishes in milliseconds.
    #[must_use]
    pub fn test() -> Self {
        let mut config = Self {
            seed: 42,
            ..Self::default()
        };
        config.city.blocks_per_side = 3;
        config.city.buildings_in_block = Span::new(4, 8);
        config.country_roads.secondary_count = 2;
        config.farm_roads.secondary_count = 1;
        config.lakes.count = 2;
        config.lakes.trees.count = 6;
        config.lakes.bushes.count = 4;
        config.lakes.rocks.count = 2;
        config.windmills.count = 4;
        config.windmills.vegetation.count = 2;
        config
    }

    /// Parses a configuration from TOML text and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and any validation
    /// error from [`WorldConfig::validate`].
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`WorldConfig::from_toml_str`].
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks every value that could make generation divide by zero, loop
    /// forever or produce nonsense.
    ///
    /// # Errors
    ///
    /// Returns the first offending value found.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.chunk_size.is_finite() || self.chunk_size <= 0.0 {
            return Err(ConfigError::InvalidChunkSize(self.chunk_size));
        }
        if !self.unload_distance.is_finite() || self.unload_distance <= self.view_distance as f32 {
            return Err(ConfigError::UnloadInsideView {
                view: self.view_distance,
                unload: self.unload_distance,
            });
        }
        at_most("view_distance", self.view_distance, MAX_CHUNK_RADIUS)?;
        positive("check_interval_secs", self.check_interval_secs.into())?;
        finite("default_height", self.default_height.into())?;

        if self.placement.attempts_per_item == 0 {
            return Err(ConfigError::TooSmall {
                field: "placement.attempts_per_item",
                value: 0,
                min: 1,
            });
        }
        at_most(
            "placement.attempts_per_item",
            self.placement.attempts_per_item,
            MAX_ATTEMPTS_PER_ITEM,
        )?;
        at_most("protected_zone.radius", self.protected_zone.radius, MAX_CHUNK_RADIUS)?;
        finite("protected_zone.spawn.x", self.protected_zone.spawn.x.into())?;
        finite("protected_zone.spawn.z", self.protected_zone.spawn.z.into())?;

        self.noise.validate()?;
        self.city.validate(self.chunk_size)?;
        self.country_roads.validate(&COUNTRY_ROAD_FIELDS)?;
        self.farm_roads.validate(&FARM_ROAD_FIELDS)?;
        self.lakes.validate()?;
        self.windmills.validate()?;
        self.airport.validate()
    }
}

/// Placement-solver settings shared by every generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Candidate samples allowed per requested item.
    pub attempts_per_item: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            attempts_per_item: 10,
        }
    }
}

/// Spawn-area protection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtectedZoneConfig {
    /// Whether any chunk is protected at all.
    pub enabled: bool,
    /// World position of the hand-placed spawn (usually the home airport).
    pub spawn: Vec2,
    /// Euclidean radius in chunks around the spawn chunk.
    pub radius: u32,
}

impl Default for ProtectedZoneConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spawn: Vec2::ZERO,
            radius: 0,
        }
    }
}

/// One classifier noise field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseLayer {
    /// Frequency multiplier applied to chunk coordinates.
    pub scale: f32,
    /// Coordinate offset (in chunks) decorrelating this field from others.
    pub offset: Vec2,
    /// Membership threshold in `[0, 1]`.
    pub threshold: f32,
}

impl NoiseLayer {
    /// Creates a noise layer.
    #[must_use]
    pub const fn new(scale: f32, offset: Vec2, threshold: f32) -> Self {
        Self {
            scale,
            offset,
            threshold,
        }
    }

    fn validate(&self, field: &'static str) -> ConfigResult<()> {
        positive(field, self.scale.into())?;
        finite(field, self.offset.x.into())?;
        finite(field, self.offset.z.into())?;
        in_range(field, self.threshold.into(), 0.0, 1.0)
    }
}

/// Noise fields for every content category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// City field.
    pub city: NoiseLayer,
    /// Lake field.
    pub lake: NoiseLayer,
    /// Windmill field.
    pub windmill: NoiseLayer,
    /// Country-road field.
    pub country_road: NoiseLayer,
    /// Farm-road field.
    pub farm_road: NoiseLayer,
    /// Airport field.
    pub airport: NoiseLayer,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            city: NoiseLayer::new(0.11, Vec2::new(0.0, 0.0), 0.72),
            lake: NoiseLayer::new(0.23, Vec2::new(1000.0, 1000.0), 0.62),
            windmill: NoiseLayer::new(0.17, Vec2::new(2000.0, 2000.0), 0.64),
            country_road: NoiseLayer::new(0.09, Vec2::new(3000.0, 3000.0), 0.50),
            farm_road: NoiseLayer::new(0.13, Vec2::new(4000.0, 4000.0), 0.56),
            airport: NoiseLayer::new(0.07, Vec2::new(5000.0, 5000.0), 0.80),
        }
    }
}

impl NoiseConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.city.validate("noise.city")?;
        self.lake.validate("noise.lake")?;
        self.windmill.validate("noise.windmill")?;
        self.country_road.validate("noise.country_road")?;
        self.farm_road.validate("noise.farm_road")?;
        self.airport.validate("noise.airport")
    }
}

/// City generator settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    /// Blocks along each side of the square grid.
    pub blocks_per_side: u32,
    /// Side length of one block.
    pub block_size: f32,
    /// Width of the streets between blocks.
    pub street_width: f32,
    /// Keep-out margin between a block edge and its buildings.
    pub building_margin: f32,
    /// Target building count per block (inclusive).
    pub buildings_in_block: Span<u32>,
    /// Minimum distance between two buildings of the same block.
    pub min_building_spacing: f32,
    /// Skyscraper probability for the most central block.
    pub skyscraper_chance: f32,
    /// Medium-building probability for the most central block.
    pub medium_chance: f32,
    /// Uniform scale jitter: scale is drawn from `1 ± scale_jitter`.
    pub scale_jitter: f32,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            blocks_per_side: 6,
            block_size: 120.0,
            street_width: 20.0,
            building_margin: 6.0,
            buildings_in_block: Span::new(8, 14),
            min_building_spacing: 18.0,
            skyscraper_chance: 0.6,
            medium_chance: 0.5,
            scale_jitter: 0.1,
        }
    }
}

impl CityConfig {
    /// Distance between two parallel grid lines.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.block_size + self.street_width
    }

    /// Side length of the whole grid.
    #[must_use]
    pub fn footprint(&self) -> f32 {
        self.pitch() * self.blocks_per_side as f32
    }

    fn validate(&self, chunk_size: f32) -> ConfigResult<()> {
        if self.blocks_per_side == 0 {
            return Err(ConfigError::TooSmall {
                field: "city.blocks_per_side",
                value: 0,
                min: 1,
            });
        }
        at_most("city.blocks_per_side", self.blocks_per_side, MAX_CHUNK_RADIUS)?;
        positive("city.block_size", self.block_size.into())?;
        non_negative("city.street_width", self.street_width.into())?;
        non_negative("city.building_margin", self.building_margin.into())?;
        self.buildings_in_block.validate("city.buildings_in_block")?;
        at_most("city.buildings_in_block.max", self.buildings_in_block.max, MAX_ITEMS_PER_CHUNK)?;
        positive("city.min_building_spacing", self.min_building_spacing.into())?;
        in_range("city.skyscraper_chance", self.skyscraper_chance.into(), 0.0, 1.0)?;
        in_range("city.medium_chance", self.medium_chance.into(), 0.0, 1.0)?;
        in_range("city.scale_jitter", self.scale_jitter.into(), 0.0, 0.95)?;
        if self.footprint() > chunk_size {
            return Err(ConfigError::CityTooLarge {
                footprint: self.footprint(),
                chunk_size,
            });
        }
        Ok(())
    }
}

/// Road network generator settings (country and farm variants).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadConfig {
    /// Distance between parallel primary roads.
    pub primary_spacing: f32,
    /// Shift of the primary grid relative to the chunk origin.
    pub grid_offset: Vec2,
    /// Length of one straight road segment.
    pub segment_length: f32,
    /// Secondary roads per chunk.
    pub secondary_count: u32,
    /// Secondary road length (inclusive).
    pub secondary_length: Span<f32>,
    /// Maximum start offset from the chosen primary intersection.
    pub start_jitter: f32,
    /// Maximum heading change between consecutive secondary segments.
    pub heading_wander_degrees: f32,
}

impl RoadConfig {
    /// Defaults for the country network.
    #[must_use]
    pub fn country() -> Self {
        Self {
            primary_spacing: 500.0,
            grid_offset: Vec2::new(250.0, 250.0),
            segment_length: 50.0,
            secondary_count: 4,
            secondary_length: Span::new(200.0, 600.0),
            start_jitter: 20.0,
            heading_wander_degrees: 6.0,
        }
    }

    /// Defaults for the farm network: a tighter grid of short tracks.
    #[must_use]
    pub fn farm() -> Self {
        Self {
            primary_spacing: 400.0,
            grid_offset: Vec2::new(100.0, 100.0),
            segment_length: 40.0,
            secondary_count: 6,
            secondary_length: Span::new(80.0, 240.0),
            start_jitter: 10.0,
            heading_wander_degrees: 0.0,
        }
    }

    fn validate(&self, fields: &RoadFields) -> ConfigResult<()> {
        positive(fields.primary_spacing, self.primary_spacing.into())?;
        non_negative(fields.grid_offset, self.grid_offset.x.into())?;
        non_negative(fields.grid_offset, self.grid_offset.z.into())?;
        positive(fields.segment_length, self.segment_length.into())?;
        at_most(fields.secondary_count, self.secondary_count, MAX_ITEMS_PER_CHUNK)?;
        self.secondary_length
            .validate_non_negative(fields.secondary_length)?;
        non_negative(fields.start_jitter, self.start_jitter.into())?;
        in_range(
            fields.heading_wander_degrees,
            self.heading_wander_degrees.into(),
            0.0,
            180.0,
        )
    }
}

/// Field paths reported by road validation.
struct RoadFields {
    primary_spacing: &'static str,
    grid_offset: &'static str,
    segment_length: &'static str,
    secondary_count: &'static str,
    secondary_length: &'static str,
    start_jitter: &'static str,
    heading_wander_degrees: &'static str,
}

const COUNTRY_ROAD_FIELDS: RoadFields = RoadFields {
    primary_spacing: "country_roads.primary_spacing",
    grid_offset: "country_roads.grid_offset",
    segment_length: "country_roads.segment_length",
    secondary_count: "country_roads.secondary_count",
    secondary_length: "country_roads.secondary_length",
    start_jitter: "country_roads.start_jitter",
    heading_wander_degrees: "country_roads.heading_wander_degrees",
};

const FARM_ROAD_FIELDS: RoadFields = RoadFields {
    primary_spacing: "farm_roads.primary_spacing",
    grid_offset: "farm_roads.grid_offset",
    segment_length: "farm_roads.segment_length",
    secondary_count: "farm_roads.secondary_count",
    secondary_length: "farm_roads.secondary_length",
    start_jitter: "farm_roads.start_jitter",
    heading_wander_degrees: "farm_roads.heading_wander_degrees",
};

impl Default for RoadConfig {
    fn default() -> Self {
        Self::country()
    }
}

/// Polar vegetation scatter around a center.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VegetationRing {
    /// Items per center.
    pub count: u32,
    /// Radial offset beyond the center's radius (inclusive).
    pub offset: Span<f32>,
}

impl VegetationRing {
    fn validate(&self, count_field: &'static str, offset_field: &'static str) -> ConfigResult<()> {
        at_most(count_field, self.count, MAX_ITEMS_PER_CHUNK)?;
        self.offset.validate_non_negative(offset_field)
    }

    /// Creates a vegetation ring.
    #[must_use]
    pub const fn new(count: u32, min_offset: f32, max_offset: f32) -> Self {
        Self {
            count,
            offset: Span::new(min_offset, max_offset),
        }
    }
}

/// Lake generator settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LakeConfig {
    /// Lakes per lake chunk.
    pub count: u32,
    /// Minimum distance between two lake centers.
    pub min_lake_spacing: f32,
    /// Radius of the central water patch (inclusive).
    pub base_radius: Span<f32>,
    /// Additional patches breaking up the silhouette (inclusive).
    pub extra_patches: Span<u32>,
    /// Extra patch radius as a fraction of the base radius.
    pub patch_radius_fraction: Span<f32>,
    /// Extra patch distance from the center as a fraction of the base radius.
    pub patch_offset_fraction: Span<f32>,
    /// Random radial jitter added to every vegetation item.
    pub irregularity: f32,
    /// Trees around the shore.
    pub trees: VegetationRing,
    /// Bushes around the shore.
    pub bushes: VegetationRing,
    /// Rocks around the shore.
    pub rocks: VegetationRing,
}

impl Default for LakeConfig {
    fn default() -> Self {
        Self {
            count: 3,
            min_lake_spacing: 400.0,
            base_radius: Span::new(60.0, 140.0),
            extra_patches: Span::new(3, 6),
            patch_radius_fraction: Span::new(0.3, 0.7),
            patch_offset_fraction: Span::new(0.5, 1.0),
            irregularity: 8.0,
            trees: VegetationRing::new(24, 10.0, 45.0),
            bushes: VegetationRing::new(16, 4.0, 20.0),
            rocks: VegetationRing::new(8, 0.0, 12.0),
        }
    }
}

impl LakeConfig {
    fn validate(&self) -> ConfigResult<()> {
        at_most("lakes.count", self.count, MAX_ITEMS_PER_CHUNK)?;
        positive("lakes.min_lake_spacing", self.min_lake_spacing.into())?;
        self.base_radius.validate("lakes.base_radius")?;
        positive("lakes.base_radius.min", self.base_radius.min.into())?;
        self.extra_patches.validate("lakes.extra_patches")?;
        at_most("lakes.extra_patches.max", self.extra_patches.max, MAX_ITEMS_PER_CHUNK)?;
        self.patch_radius_fraction.validate_non_negative("lakes.patch_radius_fraction")?;
        self.patch_offset_fraction.validate_non_negative("lakes.patch_offset_fraction")?;
        non_negative("lakes.irregularity", self.irregularity.into())?;
        self.trees.validate("lakes.trees.count", "lakes.trees.offset")?;
        self.bushes.validate("lakes.bushes.count", "lakes.bushes.offset")?;
        self.rocks.validate("lakes.rocks.count", "lakes.rocks.offset")
    }
}

/// Fence ring around each windmill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FenceConfig {
    /// Whether fences are generated.
    pub enabled: bool,
    /// Ring radius.
    pub radius: f32,
    /// Segments per ring (one per angular step).
    pub segments: u32,
}

impl Default for FenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 18.0,
            segments: 12,
        }
    }
}

/// Windmill field generator settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindmillConfig {
    /// Windmills per windmill chunk.
    pub count: u32,
    /// Minimum distance between two windmills.
    pub min_spacing: f32,
    /// Reject candidates below `min_height`.
    pub prefer_high_ground: bool,
    /// Minimum terrain height when `prefer_high_ground` is set.
    pub min_height: f32,
    /// Fence ring.
    pub fence: FenceConfig,
    /// Trees and bushes around each windmill.
    pub vegetation: VegetationRing,
    /// Blade angular speed in degrees per second (inclusive).
    pub rotor_speed: Span<f32>,
}

impl Default for WindmillConfig {
    fn default() -> Self {
        Self {
            count: 12,
            min_spacing: 150.0,
            prefer_high_ground: false,
            min_height: 20.0,
            fence: FenceConfig::default(),
            vegetation: VegetationRing::new(4, 22.0, 40.0),
            rotor_speed: Span::new(20.0, 60.0),
        }
    }
}

impl WindmillConfig {
    fn validate(&self) -> ConfigResult<()> {
        at_most("windmills.count", self.count, MAX_ITEMS_PER_CHUNK)?;
        positive("windmills.min_spacing", self.min_spacing.into())?;
        finite("windmills.min_height", self.min_height.into())?;
        if self.fence.enabled {
            positive("windmills.fence.radius", self.fence.radius.into())?;
            if self.fence.segments < 3 {
                return Err(ConfigError::TooSmall {
                    field: "windmills.fence.segments",
                    value: self.fence.segments.into(),
                    min: 3,
                });
            }
            at_most("windmills.fence.segments", self.fence.segments, MAX_ITEMS_PER_CHUNK)?;
        }
        self.vegetation
            .validate("windmills.vegetation.count", "windmills.vegetation.offset")?;
        self.rotor_speed.validate("windmills.rotor_speed")
    }
}

/// Airport placer settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirportConfig {
    /// Distance from the airport to its road connection point.
    pub connection_offset: f32,
    /// Link the connection point to the chunk's road network.
    pub connect_to_roads: bool,
}

impl Default for AirportConfig {
    fn default() -> Self {
        Self {
            connection_offset: 350.0,
            connect_to_roads: true,
        }
    }
}

impl AirportConfig {
    fn validate(&self) -> ConfigResult<()> {
        non_negative("airport.connection_offset", self.connection_offset.into())
    }
}

fn finite(field: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field })
    }
}

fn positive(field: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn at_most(field: &'static str, value: u32, max: u32) -> ConfigResult<()> {
    if value <= max {
        Ok(())
    } else {
        Err(ConfigError::TooLarge {
            field,
            value: value.into(),
            max: max.into(),
        })
    }
}

fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
