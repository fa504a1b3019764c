//! Conversion between geodetic coordinates and the integer grid the device
//! stores positions in.
//!
//! `east` is linear in longitude. `north` is a Mercator-like value on a
//! sphere with the International 1924 equatorial radius, measured against
//! geocentric latitude.

use std::f64::consts::{FRAC_PI_4, PI};

/// `east` value corresponding to 180° of longitude.
pub const EAST_SCALE: f64 = 20_038_297.0;

/// Equatorial axis of the International 1924 ellipsoid in meters.
pub const I1924_EQU_AXIS: f64 = 6_378_388.0;

const COS_AE: f64 = 0.996_634_901_645_2;
const COS2_AE: f64 = COS_AE * COS_AE;

/// Degrees to degrees.
pub fn geodetic_to_geocentric(latitude: f64) -> f64 {
    (COS2_AE * latitude.to_radians().tan()).atan().to_degrees()
}

/// Degrees to degrees.
pub fn geocentric_to_geodetic(latitude: f64) -> f64 {
    (latitude.to_radians().tan() / COS2_AE).atan().to_degrees()
}

/// Projected `north` value to geocentric latitude in degrees.
pub fn gudermannian_north(north: f64) -> f64 {
    (north / I1924_EQU_AXIS).sinh().atan().to_degrees()
}

/// Geocentric latitude in degrees to projected `north` value.
pub fn inverse_gudermannian_north(latitude: f64) -> f64 {
    I1924_EQU_AXIS * (FRAC_PI_4 + latitude * PI / 360.0).tan().ln()
}

/// A position in the on-disk integer grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coord {
    pub east: i32,
    pub north: i32,
}

impl Coord {
    pub fn new(east: i32, north: i32) -> Self {
        Self { east, north }
    }

    pub fn from_lat_lon(latitude: f64, longitude: f64) -> Self {
        let east = (longitude / 180.0 * EAST_SCALE).round() as i32;
        let north = inverse_gudermannian_north(geodetic_to_geocentric(latitude)).round() as i32;
        Self { east, north }
    }

    pub fn latitude(&self) -> f64 {
        geocentric_to_geodetic(gudermannian_north(f64::from(self.north)))
    }

    pub fn longitude(&self) -> f64 {
        f64::from(self.east) / EAST_SCALE * 180.0
    }

    /// Component-wise wrapping addition of a delta step.
    pub fn offset(self, delta_east: i16, delta_north: i16) -> Self {
        Self {
            east: self.east.wrapping_add(i32::from(delta_east)),
            north: self.north.wrapping_add(i32::from(delta_north)),
        }
    }
}
