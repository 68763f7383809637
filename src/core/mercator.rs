//! Web Mercator scale helpers shared by every flat projection.
//!
//! Flat projections reuse Mercator's horizontal scale behaviour at the tile
//! level, so meter/pixel conversions are expressed here once.

use crate::core::constants::EARTH_CIRCUMFERENCE;
use crate::core::geo::ProjectedPoint;
use serde::{Deserialize, Serialize};

/// A position in the host's normalized world space, with `z` in the same units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MercatorCoordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl MercatorCoordinate {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<ProjectedPoint> for MercatorCoordinate {
    fn from(p: ProjectedPoint) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

/// Circumference (meters) of the parallel at `lat` degrees
pub fn circumference_at_latitude(lat: f64) -> f64 {
    EARTH_CIRCUMFERENCE * lat.to_radians().cos()
}

/// Converts an altitude in meters to normalized world units at `lat` degrees
pub fn mercator_z_from_altitude(altitude: f64, lat: f64) -> f64 {
    altitude / circumference_at_latitude(lat)
}
