use approx::assert_relative_eq;
use std::sync::Arc;
use tile_projection::projection::natural_earth::ORIGIN;
use tile_projection::{
    constants::EXTENT, get_projection, CanonicalTileId, ElevationScale, Error, HostTransform,
    LngLat, NaturalEarth, Point, ProjectedPoint, Projection, ProjectionOptions, Transform,
};

/// Integration tests for the projection contract as a host renderer uses it
#[cfg(test)]
mod projection_tests {
    use super::*;

    const MAX_LAT: f64 = 85.0511;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn natural_earth() -> Arc<dyn Projection> {
        init_logging();
        get_projection(&ProjectionOptions::new("naturalEarth")).unwrap()
    }

    fn lat_samples(step: f64) -> Vec<f64> {
        let mut lats = Vec::new();
        let mut lat = -MAX_LAT;
        while lat <= MAX_LAT {
            lats.push(lat);
            lat += step;
        }
        lats.push(MAX_LAT);
        lats
    }

    /// Forward then inverse returns the input on a world-wide grid
    #[test]
    fn test_round_trip() {
        let projection = natural_earth();

        for lat in lat_samples(5.0) {
            let mut lng = -180.0;
            while lng <= 180.0 {
                let p = projection.project(lng, lat);
                let back = projection.unproject(p.x, p.y);
                assert!((back.lng - lng).abs() < 1e-4, "lng {} -> {}", lng, back.lng);
                assert!((back.lat - lat).abs() < 1e-4, "lat {} -> {}", lat, back.lat);
                lng += 10.0;
            }
        }
    }

    #[test]
    fn test_null_island_placement() {
        let projection = natural_earth();
        assert_eq!(
            projection.project(0.0, 0.0),
            ProjectedPoint::new(0.25, 0.5, 0.0)
        );
        assert_eq!(projection.unproject(0.25, 0.5), LngLat::new(0.0, 0.0));
    }

    /// Points computed with the reference remap `(x / pi + 0.5) / 2` unproject to their source
    #[test]
    fn test_reference_tile_points_unproject() {
        let projection = natural_earth();

        for &(lng, lat) in &[(30.0, 20.0), (-75.0, -40.0), (180.0, 0.0), (0.0, 85.0)] {
            let (lambda, phi) = (f64::to_radians(lng), f64::to_radians(lat));
            let phi2 = phi * phi;
            let phi4 = phi2 * phi2;
            let x = lambda
                * (0.8707 - 0.131979 * phi2
                    + phi4 * (-0.013791 + phi4 * (0.003971 * phi2 - 0.001529 * phi4)));
            let y = phi
                * (1.007226
                    + phi2 * (0.015085 + phi4 * (-0.044475 + 0.028874 * phi2 - 0.005916 * phi4)));
            let tile_x = (x / std::f64::consts::PI + 0.5) * 0.5;
            let tile_y = 1.0 - (y / std::f64::consts::PI + 1.0) * 0.5;

            let p = projection.project(lng, lat);
            assert_relative_eq!(p.x, tile_x, epsilon = 1e-12);
            assert_relative_eq!(p.y, tile_y, epsilon = 1e-12);

            let back = projection.unproject(tile_x, tile_y);
            assert_relative_eq!(back.lng, lng, epsilon = 1e-4);
            assert_relative_eq!(back.lat, lat, epsilon = 1e-4);
        }
    }

    /// Both polynomials are odd, so negating the input reflects the output about null island
    #[test]
    fn test_point_symmetry() {
        let projection = natural_earth();

        for &(lng, lat) in &[(30.0, 45.0), (-120.0, 10.0), (179.0, -80.0), (5.5, 0.0)] {
            let p = projection.project(lng, lat);
            let q = projection.project(-lng, -lat);
            let reflected = p.reflect_about(&ORIGIN);
            assert_relative_eq!(q.x, reflected.x, epsilon = 1e-12);
            assert_relative_eq!(q.y, reflected.y, epsilon = 1e-12);
            assert_eq!(q.z, 0.0);
        }
    }

    #[test]
    fn test_x_monotonic_in_longitude() {
        let projection = natural_earth();

        for lat in lat_samples(15.0) {
            let mut previous = projection.project(-180.0, lat).x;
            let mut lng = -179.0;
            while lng <= 180.0 {
                let x = projection.project(lng, lat).x;
                assert!(x > previous, "x not increasing at ({}, {})", lng, lat);
                previous = x;
                lng += 1.0;
            }
        }
    }

    #[test]
    fn test_projected_range() {
        let projection = natural_earth();

        // Widest at the equator, where the horizontal scale is 0.8707
        let x_range = (0.5 - 0.8707) * 0.5 - 1e-12..=(0.5 + 0.8707) * 0.5 + 1e-12;
        for lat in lat_samples(5.0) {
            for &lng in &[-180.0, -90.0, 0.0, 90.0, 180.0] {
                let p = projection.project(lng, lat);
                assert!(x_range.contains(&p.x), "x {} out of range", p.x);
                assert!((0.0..=1.0).contains(&p.y));
                assert_eq!(p.z, 0.0);
            }
        }
    }

    #[test]
    fn test_unproject_output_is_valid() {
        let projection = natural_earth();

        for &(x, y) in &[(-3.0, -3.0), (0.0, 0.0), (1.0, 1.0), (4.0, 0.5), (0.5, 7.0)] {
            let ll = projection.unproject(x, y);
            assert!(ll.is_valid(), "({}, {}) -> {:?}", x, y, ll);
        }
    }

    #[test]
    fn test_descriptor_literals() {
        let projection = natural_earth();
        let descriptor = projection.descriptor();

        assert_eq!(descriptor.name, "naturalEarth");
        assert_eq!(descriptor.center, [0.0, 0.0]);
        assert_eq!(descriptor.range, [3.5, 7.0]);
        assert!(descriptor.is_reprojected_in_tile_space);
        assert_eq!(descriptor.z_axis_unit.as_str(), "meters");
        assert_eq!(descriptor.unsupported_layers, &["custom"]);
    }

    #[test]
    fn test_descriptor_json() {
        let projection = natural_earth();
        let json = serde_json::to_value(projection.descriptor()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "naturalEarth",
                "center": [0.0, 0.0],
                "range": [3.5, 7.0],
                "isReprojectedInTileSpace": true,
                "zAxisUnit": "meters",
                "unsupportedLayers": ["custom"],
            })
        );
    }

    #[test]
    fn test_fixed_vectors() {
        let projection = natural_earth();
        let up = projection.up_vector();
        assert_eq!((up.x, up.y, up.z), (0.0, 0.0, 1.0));

        let scale = projection.up_vector_scale();
        assert_eq!(scale, ElevationScale::new(1.0, 1.0));
        assert_eq!(
            serde_json::to_value(scale).unwrap(),
            serde_json::json!({"metersToTile": 1.0, "metersToLabelSpace": 1.0})
        );
    }

    #[test]
    fn test_unknown_projection_name() {
        init_logging();
        let result = get_projection(&ProjectionOptions::new("albers"));
        assert!(matches!(result, Err(Error::UnsupportedProjection(_))));
    }

    #[test]
    fn test_host_transform_helpers() {
        let mut tr = Transform::new(
            natural_earth(),
            LngLat::new(0.0, 0.0),
            3.0,
            Point::new(1024.0, 768.0),
        );

        let world = tr.location_coordinate(&LngLat::new(0.0, 0.0));
        assert_eq!((world.x, world.y, world.z), (ORIGIN.x, ORIGIN.y, 0.0));

        let center = tr.location_point(&LngLat::new(0.0, 0.0));
        assert_relative_eq!(center.x, 512.0, epsilon = 1e-9);
        assert_relative_eq!(center.y, 384.0, epsilon = 1e-9);

        // East of center is right of the screen center, north is above it
        let ne = tr.location_point(&LngLat::new(10.0, 10.0));
        assert!(ne.x > 512.0);
        assert!(ne.y < 384.0);

        assert_relative_eq!(
            tr.pixels_per_meter(),
            NaturalEarth.pixels_per_meter(0.0, tr.world_size()),
            epsilon = 1e-15
        );

        // Looking straight down the far plane sits just past the view center
        let flat = tr.farthest_pixel_distance();
        assert_relative_eq!(flat, tr.camera_to_center_distance() * 1.01, epsilon = 1e-6);

        tr.set_pitch(60.0);
        assert!(tr.farthest_pixel_distance() > flat);
    }

    #[test]
    fn test_tile_transform_from_projection() {
        let tr = Transform::new(
            natural_earth(),
            LngLat::new(0.0, 0.0),
            1.0,
            Point::new(512.0, 512.0),
        );
        let tile_transform = tr
            .projection()
            .create_tile_transform(&tr, tr.world_size());

        assert_eq!(tile_transform.world_size(), 1024.0);
        let matrix = tile_transform.create_tile_matrix(&CanonicalTileId::new(1, 1, 0));
        let corner = matrix * nalgebra::Vector4::new(EXTENT, EXTENT, 0.0, 1.0);
        assert_relative_eq!(corner.x, 1024.0, epsilon = 1e-9);
        assert_relative_eq!(corner.y, 512.0, epsilon = 1e-9);
    }

    #[test]
    fn test_projection_is_shareable_across_threads() {
        let projection = natural_earth();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let projection = Arc::clone(&projection);
                std::thread::spawn(move || {
                    let lng = -150.0 + i as f64 * 60.0;
                    let p = projection.project(lng, 42.0);
                    projection.unproject(p.x, p.y)
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let back = handle.join().unwrap();
            assert_relative_eq!(back.lng, -150.0 + i as f64 * 60.0, epsilon = 1e-4);
            assert_relative_eq!(back.lat, 42.0, epsilon = 1e-4);
        }
    }
}
