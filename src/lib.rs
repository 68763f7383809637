//! # tile-projection
//!
//! Map projection strategies for tiled renderers.
//!
//! A projection maps longitude/latitude into normalized [0, 1] tile space and
//! back, and answers the scale and geometry questions a renderer needs to
//! place, scale and light geometry under it. Projections are stateless values
//! behind the [`Projection`] trait; the host renderer's view is reached only
//! through [`HostTransform`].

pub mod core;
pub mod projection;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    geo::{CanonicalTileId, LngLat, Point, ProjectedPoint},
    mercator::MercatorCoordinate,
    transform::{HostTransform, Transform},
};

pub use projection::{
    get_projection, natural_earth::NATURAL_EARTH, ElevationScale, FlatTileTransform, NaturalEarth,
    Projection, ProjectionDescriptor, ProjectionOptions, TileTransform, ZAxisUnit,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported projection: {0}")]
    UnsupportedProjection(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
