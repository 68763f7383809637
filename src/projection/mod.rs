//! Projection strategies.
//!
//! A projection is a stateless value that maps geographic coordinates into
//! normalized tile space and answers the scale/geometry questions a renderer
//! asks about that space. Every variant carries an immutable
//! [`ProjectionDescriptor`] the host reads to pick a tiling strategy.

pub mod far_z;
pub mod natural_earth;
pub mod tile_transform;

use crate::core::geo::{LngLat, Point, ProjectedPoint};
use crate::core::transform::HostTransform;
use crate::{Error, Result};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub use natural_earth::NaturalEarth;
pub use tile_transform::{FlatTileTransform, TileTransform};

/// Unit the z axis of projected geometry is expressed in.
///
/// Mirrors the host's `zAxisUnit` vocabulary: projections reprojected in tile
/// space report meters, while the host's own unprojected views use pixels.
/// Both values must round-trip through a descriptor read back from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZAxisUnit {
    Meters,
    Pixels,
}

impl ZAxisUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meters => "meters",
            Self::Pixels => "pixels",
        }
    }
}

/// Factors converting real-world heights into projected units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevationScale {
    pub meters_to_tile: f64,
    pub meters_to_label_space: f64,
}

impl ElevationScale {
    pub const fn new(meters_to_tile: f64, meters_to_label_space: f64) -> Self {
        Self {
            meters_to_tile,
            meters_to_label_space,
        }
    }
}

/// Static metadata describing a projection variant.
///
/// Field names serialize exactly as the host renderer expects them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionDescriptor {
    pub name: &'static str,
    /// Default view center as `[lng, lat]`
    pub center: [f64; 2],
    /// Zoom range `[min, max]` the projection is designed for
    pub range: [f64; 2],
    pub is_reprojected_in_tile_space: bool,
    pub z_axis_unit: ZAxisUnit,
    /// Layer kinds the host must not render under this projection
    pub unsupported_layers: &'static [&'static str],
}

impl ProjectionDescriptor {
    pub fn default_center(&self) -> LngLat {
        LngLat::from(self.center)
    }
}

/// The capability set every projection variant implements
pub trait Projection: fmt::Debug + Send + Sync {
    fn descriptor(&self) -> &ProjectionDescriptor;

    /// Forward projection from degrees into normalized tile space
    fn project(&self, lng: f64, lat: f64) -> ProjectedPoint;

    /// Inverse projection from normalized tile space back to degrees
    fn unproject(&self, x: f64, y: f64) -> LngLat;

    /// Places a point that is already in flattened tile space
    fn project_tile_point(&self, x: f64, y: f64) -> ProjectedPoint;

    /// Screen position of a geographic location, as computed by the host
    fn location_point(&self, tr: &dyn HostTransform, lng_lat: &LngLat) -> Point;

    /// Pixels covered by one meter at `lat` for a world of `world_size` pixels
    fn pixels_per_meter(&self, lat: f64, world_size: f64) -> f64;

    /// Distance from the camera to the farthest fragment worth rendering
    fn farthest_pixel_distance(&self, tr: &dyn HostTransform) -> f64;

    /// Builds the transform that places tiles under this projection
    fn create_tile_transform(
        &self,
        tr: &dyn HostTransform,
        world_size: f64,
    ) -> Box<dyn TileTransform>;

    /// Local up direction for lighting and terrain
    fn up_vector(&self) -> Vector3<f64>;

    fn up_vector_scale(&self) -> ElevationScale;

    fn project_lng_lat(&self, lng_lat: &LngLat) -> ProjectedPoint {
        self.project(lng_lat.lng, lng_lat.lat)
    }

    /// Whether layers of `kind` can be rendered under this projection
    fn supports_layer(&self, kind: &str) -> bool {
        !self
            .descriptor()
            .unsupported_layers
            .iter()
            .any(|layer| *layer == kind)
    }
}

/// Projection selection as it appears in a style document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectionOptions {
    pub name: String,
    /// Preferred view center as `[lng, lat]`, overriding the projection default
    pub center: Option<[f64; 2]>,
    /// Standard parallels as written for conic projections. Accepted so style
    /// documents authored against conic variants still parse, and carried
    /// through unchanged; Natural Earth does not read them.
    pub parallels: Option<[f64; 2]>,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            name: natural_earth::NATURAL_EARTH.name.to_string(),
            center: None,
            parallels: None,
        }
    }
}

impl ProjectionOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parses options from a JSON `projection` object
    pub fn from_json(json: &str) -> Result<Self> {
        let options = serde_json::from_str(json)?;
        Ok(options)
    }

    pub fn resolve(&self) -> Result<Arc<dyn Projection>> {
        get_projection(self)
    }

    /// The view center to start from: the configured one if any, else the projection's
    pub fn center_or(&self, descriptor: &ProjectionDescriptor) -> LngLat {
        self.center
            .map(LngLat::from)
            .unwrap_or_else(|| descriptor.default_center())
    }
}

/// Resolves a projection by name
pub fn get_projection(options: &ProjectionOptions) -> Result<Arc<dyn Projection>> {
    if let Some(center) = options.center {
        let center = LngLat::from(center);
        if !center.is_valid() {
            return Err(Error::InvalidCoordinates(format!(
                "projection center {:?} is out of range",
                center.to_array()
            )));
        }
    }

    let projection: Arc<dyn Projection> = match options.name.as_str() {
        "naturalEarth" => Arc::new(NaturalEarth),
        other => return Err(Error::UnsupportedProjection(other.to_string())),
    };

    if options.parallels.is_some() {
        log::debug!("{} ignores configured parallels", options.name);
    }
    log::debug!("resolved projection {}", projection.descriptor().name);
    Ok(projection)
}
