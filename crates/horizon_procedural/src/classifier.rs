//! # Chunk Classification
//!
//! Decides which content a chunk receives from six independent noise
//! fields. Each field is compared against its own threshold, then a fixed
//! override chain resolves conflicts:
//!
//! - an airport suppresses a city;
//! - a city suppresses windmills and both road networks;
//! - lakes are independent and may share a chunk with anything.

use crate::config::NoiseConfig;
use crate::coord::ChunkCoord;
use crate::noise::NoiseField;
use crate::seed::WorldSeed;

/// Raw noise values of one chunk, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NoiseSample {
    /// City field.
    pub city: f32,
    /// Lake field.
    pub lake: f32,
    /// Windmill field.
    pub windmill: f32,
    /// Country-road field.
    pub country_road: f32,
    /// Farm-road field.
    pub farm_road: f32,
    /// Airport field.
    pub airport: f32,
}

/// Final content membership of one chunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Membership {
    /// Generate a city.
    pub city: bool,
    /// Generate lakes.
    pub lake: bool,
    /// Generate a windmill field.
    pub windmill: bool,
    /// Generate the country road network.
    pub country_road: bool,
    /// Generate the farm road network.
    pub farm_road: bool,
    /// Place an airport.
    pub airport: bool,
}

impl Membership {
    /// Returns true if nothing is generated.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.city
            || self.lake
            || self.windmill
            || self.country_road
            || self.farm_road
            || self.airport)
    }

    /// Returns true if either road network is generated.
    #[must_use]
    pub const fn has_roads(&self) -> bool {
        self.country_road || self.farm_road
    }
}

/// Classification result: raw values and final membership.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Classification {
    /// Noise values before thresholding.
    pub noise: NoiseSample,
    /// Membership after thresholds and overrides.
    pub membership: Membership,
}

impl std::fmt::Display for Membership {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return f.write_str("empty");
        }
        let tags = [
            (self.airport, "airport"),
            (self.city, "city"),
            (self.lake, "lake"),
            (self.windmill, "windmill"),
            (self.country_road, "country-road"),
            (self.farm_road, "farm-road"),
        ];
        let mut first = true;
        for (_, tag) in tags.iter().filter(|(set, _)| *set) {
            if !first {
                f.write_str("+")?;
            }
            f.write_str(tag)?;
            first = false;
        }
        Ok(())
    }
}

/// Noise-driven chunk classifier.
pub struct ChunkClassifier {
    city: NoiseField,
    lake: NoiseField,
    windmill: NoiseField,
    country_road: NoiseField,
    farm_road: NoiseField,
    airport: NoiseField,
    thresholds: NoiseSample,
}

impl ChunkClassifier {
    /// Creates a classifier; every field gets its own derived seed.
    #[must_use]
    pub fn new(seed: WorldSeed, config: &NoiseConfig) -> Self {
        Self {
            city: NoiseField::new(seed.derive(1), &config.city),
            lake: NoiseField::new(seed.derive(2), &config.lake),
            windmill: NoiseField::new(seed.derive(3), &config.windmill),
            country_road: NoiseField::new(seed.derive(4), &config.country_road),
            farm_road: NoiseField::new(seed.derive(5), &config.farm_road),
            airport: NoiseField::new(seed.derive(6), &config.airport),
            thresholds: NoiseSample {
                city: config.city.threshold,
                lake: config.lake.threshold,
                windmill: config.windmill.threshold,
                country_road: config.country_road.threshold,
                farm_road: config.farm_road.threshold,
                airport: config.airport.threshold,
            },
        }
    }

    /// Raw field values for a chunk.
    #[must_use]
    pub fn sample(&self, coord: ChunkCoord) -> NoiseSample {
        NoiseSample {
            city: self.city.value(coord),
            lake: self.lake.value(coord),
            windmill: self.windmill.value(coord),
            country_road: self.country_road.value(coord),
            farm_road: self.farm_road.value(coord),
            airport: self.airport.value(coord),
        }
    }

    /// Classifies a chunk.
    #[must_use]
    pub fn classify(&self, coord: ChunkCoord) -> Classification {
        let noise = self.sample(coord);
        let t = &self.thresholds;
        let raw = Membership {
            city: noise.city >= t.city,
            lake: noise.lake >= t.lake,
            windmill: noise.windmill >= t.windmill,
            country_road: noise.country_road >= t.country_road,
            farm_road: noise.farm_road >= t.farm_road,
            airport: noise.airport >= t.airport,
        };
        Classification {
            noise,
            membership: Self::apply_overrides(raw),
        }
    }

    /// Resolves conflicts between raw threshold results.
    #[must_use]
    pub const fn apply_overrides(raw: Membership) -> Membership {
        let city = raw.city && !raw.airport;
        Membership {
            city,
            lake: raw.lake,
            windmill: raw.windmill && !city,
            country_road: raw.country_road && !city,
            farm_road: raw.farm_road && !city,
            airport: raw.airport,
        }
    }
}
