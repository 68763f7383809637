use crate::core::constants::{
    DEFAULT_FOV, DEFAULT_HORIZON_SHIFT, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, MAX_PITCH, TILE_SIZE,
};
use crate::core::geo::{LngLat, Point};
use crate::core::mercator::MercatorCoordinate;
use crate::projection::Projection;
use std::sync::Arc;

/// The view state a projection reads from its host renderer.
///
/// Projections never own camera math; they only query the host through this
/// trait when converting locations to screen space or sizing the far plane.
pub trait HostTransform {
    /// The geographic center of the view
    fn center(&self) -> LngLat;

    /// Size of the whole world in pixels at the current zoom
    fn world_size(&self) -> f64;

    /// Converts a geographic location into the host's normalized world space
    fn location_coordinate(&self, lng_lat: &LngLat) -> MercatorCoordinate;

    /// Converts a normalized world coordinate into a screen point
    fn coordinate_point(&self, coord: &MercatorCoordinate) -> Point;

    /// Camera pitch in radians (0 looks straight down)
    fn pitch(&self) -> f64;

    /// Angle between the view center and the top edge of the screen, in radians
    fn fov_above_center(&self) -> f64;

    /// Camera height above sea level in normalized world units
    fn camera_altitude(&self) -> f64;

    fn horizon_shift(&self) -> f64 {
        DEFAULT_HORIZON_SHIFT
    }

    /// Lowest terrain elevation in view relative to mean sea level, in meters.
    /// Zero when nothing in view dips below sea level, negative otherwise.
    fn min_elevation_below_msl(&self) -> f64 {
        0.0
    }
}

/// Manages the current view of the map: center, zoom, camera and screen dimensions
#[derive(Debug, Clone)]
pub struct Transform {
    /// Projection used to place geographic locations in world space
    projection: Arc<dyn Projection>,
    /// The center of the map view in geographical coordinates
    pub center: LngLat,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
    /// Camera pitch in radians
    pitch: f64,
    /// Vertical field of view in radians
    fov: f64,
    /// Tile size in pixels
    pub tile_size: f64,
    /// Lowest visible terrain elevation relative to sea level (never positive), in meters
    min_elevation: f64,
}

impl Transform {
    /// Creates a new transform looking at `center` from straight above
    pub fn new(projection: Arc<dyn Projection>, center: LngLat, zoom: f64, size: Point) -> Self {
        let mut transform = Self {
            projection,
            center: LngLat::default(),
            zoom: zoom.clamp(DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM),
            size,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            pitch: 0.0,
            fov: DEFAULT_FOV,
            tile_size: TILE_SIZE,
            min_elevation: 0.0,
        };
        transform.set_center(center);
        transform
    }

    pub fn projection(&self) -> &Arc<dyn Projection> {
        &self.projection
    }

    /// Swaps the active projection, keeping the camera where it is
    pub fn set_projection(&mut self, projection: Arc<dyn Projection>) {
        log::debug!(
            "switching projection {} -> {}",
            self.projection.descriptor().name,
            projection.descriptor().name
        );
        self.projection = projection;
    }

    /// Sets the center of the view, wrapping longitude and clamping latitude
    pub fn set_center(&mut self, center: LngLat) {
        self.center = LngLat::new(LngLat::wrap_lng(center.lng), LngLat::clamp_lat(center.lat));
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Sets the zoom limits
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Sets the camera pitch in degrees
    pub fn set_pitch(&mut self, pitch_degrees: f64) {
        self.pitch = pitch_degrees.to_radians().clamp(0.0, MAX_PITCH);
    }

    /// Sets the vertical field of view in degrees
    pub fn set_fov(&mut self, fov_degrees: f64) {
        self.fov = fov_degrees.clamp(0.01, 60.0).to_radians();
    }

    /// Sets the lowest terrain elevation currently in view, in meters
    pub fn set_min_elevation(&mut self, elevation: f64) {
        self.min_elevation = elevation.min(0.0);
    }

    /// Gets the scale factor for the current zoom level
    pub fn scale(&self) -> f64 {
        2_f64.powf(self.zoom)
    }

    /// Distance in pixels from the camera to the center of the view
    pub fn camera_to_center_distance(&self) -> f64 {
        0.5 / (self.fov / 2.0).tan() * self.size.y
    }

    /// Converts a geographical coordinate to a screen point
    pub fn location_point(&self, lng_lat: &LngLat) -> Point {
        self.projection.location_point(self, lng_lat)
    }

    /// Converts a screen point back to a geographical coordinate
    pub fn point_location(&self, point: &Point) -> LngLat {
        let center = self.location_coordinate(&self.center);
        let half = Point::new(self.size.x / 2.0, self.size.y / 2.0);
        let offset = point.subtract(&half).multiply(1.0 / self.world_size());
        self.projection
            .unproject(center.x + offset.x, center.y + offset.y)
    }

    /// Pixels covered by one meter at the center of the view
    pub fn pixels_per_meter(&self) -> f64 {
        self.projection
            .pixels_per_meter(self.center.lat, self.world_size())
    }

    /// Distance from the camera to the farthest visible fragment, in pixels
    pub fn farthest_pixel_distance(&self) -> f64 {
        self.projection.farthest_pixel_distance(self)
    }
}

impl HostTransform for Transform {
    fn center(&self) -> LngLat {
        self.center
    }

    fn world_size(&self) -> f64 {
        self.tile_size * self.scale()
    }

    fn location_coordinate(&self, lng_lat: &LngLat) -> MercatorCoordinate {
        self.projection.project(lng_lat.lng, lng_lat.lat).into()
    }

    fn coordinate_point(&self, coord: &MercatorCoordinate) -> Point {
        let center = self.location_coordinate(&self.center);
        let world_size = self.world_size();
        Point::new(
            (coord.x - center.x) * world_size + self.size.x / 2.0,
            (coord.y - center.y) * world_size + self.size.y / 2.0,
        )
    }

    fn pitch(&self) -> f64 {
        self.pitch
    }

    fn fov_above_center(&self) -> f64 {
        self.fov * 0.5
    }

    fn camera_altitude(&self) -> f64 {
        self.camera_to_center_distance() * self.pitch.cos() / self.world_size()
    }

    fn min_elevation_below_msl(&self) -> f64 {
        self.min_elevation
    }
}
