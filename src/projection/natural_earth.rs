//! Natural Earth pseudo-cylindrical projection.
//!
//! Forward and inverse polynomials follow d3-geo's `geoNaturalEarth1Raw`
//! (MIT-licensed). The forward transform is closed form; the inverse solves
//! the latitude polynomial with a bounded Newton-Raphson iteration and always
//! returns a coordinate, even when the solve runs out of iterations.
//!
//! Projected radians are remapped into tile space with `x = (x/π + 0.5)/2`
//! and `y = 1 - (y/π + 1)/2`, so null island lands on (0.25, 0.5) and the
//! output is point-symmetric about that point. Hosts reproject against the
//! projected bounds, so the horizontal offset is part of the contract.

use super::far_z::farthest_pixel_distance_on_plane;
use super::tile_transform::{FlatTileTransform, TileTransform};
use super::{ElevationScale, Projection, ProjectionDescriptor, ZAxisUnit};
use crate::core::constants::MAX_MERCATOR_LATITUDE;
use crate::core::geo::{LngLat, Point, ProjectedPoint};
use crate::core::mercator::mercator_z_from_altitude;
use crate::core::transform::HostTransform;
use nalgebra::Vector3;
use once_cell::sync::Lazy;
use std::f64::consts::PI;

/// Latitude bound of the inverse solve, in radians
static MAX_PHI: Lazy<f64> = Lazy::new(|| MAX_MERCATOR_LATITUDE.to_radians());

/// Convergence threshold on the Newton step, in radians
const EPSILON: f64 = 1e-6;

pub(crate) const MAX_ITERATIONS: usize = 25;

/// Tile-space image of null island
pub const ORIGIN: ProjectedPoint = ProjectedPoint {
    x: 0.25,
    y: 0.5,
    z: 0.0,
};

pub static NATURAL_EARTH: ProjectionDescriptor = ProjectionDescriptor {
    name: "naturalEarth",
    center: [0.0, 0.0],
    range: [3.5, 7.0],
    is_reprojected_in_tile_space: true,
    z_axis_unit: ZAxisUnit::Meters,
    unsupported_layers: &["custom"],
};

/// The Natural Earth projection. Stateless; share it freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalEarth;

/// Horizontal scale of the projection at squared latitude `phi2`
fn x_scale(phi2: f64) -> f64 {
    let phi4 = phi2 * phi2;
    0.8707 - 0.131979 * phi2 + phi4 * (-0.013791 + phi4 * (0.003971 * phi2 - 0.001529 * phi4))
}

/// Projected y (radians) of latitude `phi`
fn y_of(phi: f64) -> f64 {
    let phi2 = phi * phi;
    let phi4 = phi2 * phi2;
    phi * (1.007226 + phi2 * (0.015085 + phi4 * (-0.044475 + 0.028874 * phi2 - 0.005916 * phi4)))
}

/// Derivative of [`y_of`] with respect to `phi`
fn dy_dphi(phi: f64) -> f64 {
    let phi2 = phi * phi;
    let phi4 = phi2 * phi2;
    1.007226
        + phi2
            * (0.015085 * 3.0
                + phi4 * (-0.044475 * 7.0 + 0.028874 * 9.0 * phi2 - 0.005916 * 11.0 * phi4))
}

/// Result of solving `y_of(phi) = y` for `phi`
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LatitudeSolve {
    pub phi: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Newton-Raphson solve for latitude, clamped to the Mercator bound each step
pub(crate) fn solve_latitude(y: f64) -> LatitudeSolve {
    let max_phi = *MAX_PHI;
    let mut phi = y;
    let mut iterations = 0;
    let mut converged = false;

    while iterations < MAX_ITERATIONS {
        iterations += 1;
        let delta = (y_of(phi) - y) / dy_dphi(phi);
        phi = (phi - delta).clamp(-max_phi, max_phi);
        if delta.abs() <= EPSILON {
            converged = true;
            break;
        }
    }

    if !converged {
        log::trace!(
            "latitude solve for y={} stopped after {} iterations at phi={}",
            y,
            iterations,
            phi
        );
    }

    LatitudeSolve {
        phi,
        iterations,
        converged,
    }
}

impl Projection for NaturalEarth {
    fn descriptor(&self) -> &ProjectionDescriptor {
        &NATURAL_EARTH
    }

    fn project(&self, lng: f64, lat: f64) -> ProjectedPoint {
        let lambda = lng.to_radians();
        let phi = lat.to_radians();

        let x = lambda * x_scale(phi * phi);
        let y = y_of(phi);

        ProjectedPoint::new((x / PI + 0.5) * 0.5, 1.0 - (y / PI + 1.0) * 0.5, 0.0)
    }

    fn unproject(&self, x: f64, y: f64) -> LngLat {
        let x = (2.0 * x - 0.5) * PI;
        let y = (2.0 * (1.0 - y) - 1.0) * PI;

        let phi = solve_latitude(y).phi;
        let lambda = x / x_scale(phi * phi);

        LngLat::new(lambda.to_degrees().clamp(-180.0, 180.0), phi.to_degrees())
    }

    fn project_tile_point(&self, x: f64, y: f64) -> ProjectedPoint {
        ProjectedPoint::new(x, y, 0.0)
    }

    fn location_point(&self, tr: &dyn HostTransform, lng_lat: &LngLat) -> Point {
        tr.coordinate_point(&tr.location_coordinate(lng_lat))
    }

    fn pixels_per_meter(&self, lat: f64, world_size: f64) -> f64 {
        mercator_z_from_altitude(1.0, lat) * world_size
    }

    fn farthest_pixel_distance(&self, tr: &dyn HostTransform) -> f64 {
        let pixels_per_meter = self.pixels_per_meter(tr.center().lat, tr.world_size());
        farthest_pixel_distance_on_plane(tr, pixels_per_meter)
    }

    fn create_tile_transform(
        &self,
        tr: &dyn HostTransform,
        world_size: f64,
    ) -> Box<dyn TileTransform> {
        Box::new(FlatTileTransform::new(tr, world_size))
    }

    fn up_vector(&self) -> Vector3<f64> {
        Vector3::new(0.0, 0.0, 1.0)
    }

    fn up_vector_scale(&self) -> ElevationScale {
        ElevationScale::new(1.0, 1.0)
    }
}
