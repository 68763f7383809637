use super::ElevationScale;
use crate::core::constants::EXTENT;
use crate::core::geo::CanonicalTileId;
use crate::core::mercator::mercator_z_from_altitude;
use crate::core::transform::HostTransform;
use nalgebra::{Matrix4, Vector3};
use std::fmt;

/// Places tiles of a projection into world pixel space
pub trait TileTransform: fmt::Debug + Send + Sync {
    fn world_size(&self) -> f64;

    /// Matrix taking tile-local coordinates (0..EXTENT, z in meters) to world pixels
    fn create_tile_matrix(&self, id: &CanonicalTileId) -> Matrix4<f64>;

    /// Matrix undoing any per-tile reprojection applied before the tile matrix
    fn create_inversion_matrix(&self, id: &CanonicalTileId) -> Matrix4<f64>;

    /// Local up direction at tile coordinate (`x`, `y`)
    fn up_vector(&self, id: &CanonicalTileId, x: f64, y: f64) -> Vector3<f64>;

    fn up_vector_scale(&self, id: &CanonicalTileId) -> ElevationScale;
}

/// Tile placement for projections rendered as a flat plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatTileTransform {
    world_size: f64,
    /// Pixels per meter at the host's view center, used to scale elevations
    pixels_per_meter: f64,
}

impl FlatTileTransform {
    pub fn new(tr: &dyn HostTransform, world_size: f64) -> Self {
        Self {
            world_size,
            pixels_per_meter: mercator_z_from_altitude(1.0, tr.center().lat) * world_size,
        }
    }

    pub fn pixels_per_meter(&self) -> f64 {
        self.pixels_per_meter
    }
}

impl TileTransform for FlatTileTransform {
    fn world_size(&self) -> f64 {
        self.world_size
    }

    fn create_tile_matrix(&self, id: &CanonicalTileId) -> Matrix4<f64> {
        let scale = self.world_size / id.tiles_per_axis();
        let translation = Matrix4::new_translation(&Vector3::new(
            id.x as f64 * scale,
            id.y as f64 * scale,
            0.0,
        ));
        let scaling = Matrix4::new_nonuniform_scaling(&Vector3::new(
            scale / EXTENT,
            scale / EXTENT,
            self.pixels_per_meter,
        ));
        translation * scaling
    }

    fn create_inversion_matrix(&self, _id: &CanonicalTileId) -> Matrix4<f64> {
        Matrix4::identity()
    }

    fn up_vector(&self, _id: &CanonicalTileId, _x: f64, _y: f64) -> Vector3<f64> {
        Vector3::new(0.0, 0.0, 1.0)
    }

    fn up_vector_scale(&self, _id: &CanonicalTileId) -> ElevationScale {
        ElevationScale::new(1.0, 1.0)
    }
}
