pub mod constants;
pub mod geo;
pub mod mercator;
pub mod transform;
