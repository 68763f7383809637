use crate::core::transform::HostTransform;
use std::f64::consts::FRAC_PI_2;

/// Distance in pixels from the camera to the farthest fragment that should be
/// rendered when the map is a flat plane.
///
/// Uses the law of sines on the triangle formed by the camera, the view center
/// and the point under the top edge of the screen. Negative terrain pushes the
/// plane further away; the result never exceeds the horizon distance.
pub fn farthest_pixel_distance_on_plane(tr: &dyn HostTransform, pixels_per_meter: f64) -> f64 {
    let pitch = tr.pitch();
    let fov_above_center = tr.fov_above_center();

    let min_elevation_in_pixels = tr.min_elevation_below_msl() * pixels_per_meter;
    let camera_to_sea_level_distance =
        (tr.camera_altitude() * tr.world_size() - min_elevation_in_pixels) / pitch.cos();

    let top_half_surface_distance = fov_above_center.sin() * camera_to_sea_level_distance
        / (FRAC_PI_2 - pitch - fov_above_center).max(0.01).sin();

    let furthest_distance = pitch.sin() * top_half_surface_distance + camera_to_sea_level_distance;
    let horizon_distance = camera_to_sea_level_distance * (1.0 / tr.horizon_shift());

    // 1% slack so fragments exactly at the far plane are not clipped
    (furthest_distance * 1.01).min(horizon_distance)
}
