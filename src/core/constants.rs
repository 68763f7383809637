//! Core constants shared by projections and the host transform.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Latitude bound (degrees) at which Web Mercator becomes a square world.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051129;

/// Mean earth radius in meters.
pub const EARTH_RADIUS: f64 = 6_371_008.8;

/// Length of the equator in meters for a sphere of `EARTH_RADIUS`.
pub const EARTH_CIRCUMFERENCE: f64 = 2.0 * std::f64::consts::PI * EARTH_RADIUS;

/// Number of integer units spanning one tile edge in vector tile space.
pub const EXTENT: f64 = 8192.0;

/// Default square tile size in pixels.
pub const TILE_SIZE: f64 = 512.0;

/// Default vertical field of view in radians (~36.87 degrees).
pub const DEFAULT_FOV: f64 = 0.6435011087932844;

/// Fraction of the camera-to-sea-level distance the horizon is pushed back by.
pub const DEFAULT_HORIZON_SHIFT: f64 = 0.1;

/// Zoom limits applied by the host transform.
pub const DEFAULT_MIN_ZOOM: f64 = 0.0;
pub const DEFAULT_MAX_ZOOM: f64 = 22.0;

/// Maximum camera pitch in radians (85 degrees).
pub const MAX_PITCH: f64 = 85.0 * std::f64::consts::PI / 180.0;
