//! Axis-aligned lon/lat bounding box, antimeridian-aware.

use serde::{Deserialize, Serialize};

/// A `(west, south, east, north)` box in degrees.
///
/// Two wrap conventions are honored:
/// - `west > east` means the box crosses the antimeridian and covers the
///   longitudes outside `[east, west]`;
/// - a box may also be supplied with bounds pushed past ±180 (e.g. a search
///   window of `[170, 190]` expressed as `east = 190`); point longitudes are
///   then normalized by ±360 before comparison.
/// - `south > north` is treated the same way on the latitude axis (a box
///   wrapping over a pole in the source's convention).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoBox {
    west: f64,
    south: f64,
    east: f64,
    north: f64,
}

impl GeoBox {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    #[inline]
    pub fn west(&self) -> f64 {
        self.west
    }

    #[inline]
    pub fn south(&self) -> f64 {
        self.south
    }

    #[inline]
    pub fn east(&self) -> f64 {
        self.east
    }

    #[inline]
    pub fn north(&self) -> f64 {
        self.north
    }

    /// Latitude containment, inclusive, honoring `south > north` wrap.
    pub fn contains_lat(&self, lat: f64) -> bool {
        if self.south < self.north {
            lat <= self.north && lat >= self.south
        } else {
            lat >= self.south || lat <= self.north
        }
    }

    /// Longitude containment, inclusive, honoring both antimeridian
    /// conventions.
    pub fn contains_lon(&self, lon: f64) -> bool {
        let mut lon = lon;
        // Box pushed past the antimeridian at its west bound: positive
        // longitudes compare in the shifted frame.
        if self.west < -180.0 && lon > 0.0 {
            lon -= 360.0;
        // Box pushed past the antimeridian at its east bound: negative
        // longitudes compare in the shifted frame.
        } else if self.east > 180.0 && lon < 0.0 {
            lon += 360.0;
        }
        if self.west < self.east {
            lon >= self.west && lon <= self.east
        } else {
            lon >= self.west || lon <= self.east
        }
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.contains_lat(lat) && self.contains_lon(lon)
    }
}
