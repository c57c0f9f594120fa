// Host-side tests for the pick <-> place coordinate transform.

use glam::DVec3;
use globe_core::*;
use rand::prelude::*;

fn lon_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

#[test]
fn place_then_pick_round_trips() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..1000 {
        let lat: f64 = rng.gen_range(-90.0..=90.0);
        let lon: f64 = rng.gen_range(-180.0..=180.0);
        let radius = rng.gen_range(0.5..5.0);
        let p = geo_to_point(GeoCoordinate::new(lat, lon), radius);
        let g = pick_to_geo(p).unwrap();
        assert!((g.lat - lat).abs() < 1e-6, "lat {lat} -> {}", g.lat);
        assert!(g.lat >= -90.0 && g.lat <= 90.0);
        assert!(g.lon > -180.0 && g.lon <= 180.0);
        if lat.abs() < 89.9999 {
            assert!(lon_diff(g.lon, lon) < 1e-6, "lon {lon} -> {}", g.lon);
        }
    }
}

#[test]
fn pick_then_place_recovers_direction() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let v = DVec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if v.length() < 1e-3 {
            continue;
        }
        let g = pick_to_geo(v * 3.0).unwrap();
        let back = geo_to_point(g, 1.0);
        assert!((back - v.normalize()).length() < 1e-9);
    }
}

#[test]
fn poles_are_well_defined() {
    let north = geo_to_point(GeoCoordinate::new(90.0, 0.0), 1.0);
    assert!((north - DVec3::Y).length() < 1e-12);
    let g = pick_to_geo(north).unwrap();
    assert!((g.lat - 90.0).abs() < 1e-9);
    assert!(g.lon.is_finite());

    let south = pick_to_geo(DVec3::new(0.0, -4.0, 0.0)).unwrap();
    assert!((south.lat + 90.0).abs() < 1e-9);
    assert!(south.lon.is_finite());
}

#[test]
fn surface_offset_does_not_change_coordinate() {
    let coord = GeoCoordinate::new(35.6762, 139.6503);
    let on_surface = pick_to_geo(geo_to_point(coord, GLOBE_RADIUS as f64)).unwrap();
    let on_marker = pick_to_geo(geo_to_point(coord, MARKER_RADIUS as f64)).unwrap();
    assert!((on_surface.lat - on_marker.lat).abs() < 1e-9);
    assert!((on_surface.lon - on_marker.lon).abs() < 1e-9);
}

#[test]
fn pick_at_center_is_discarded() {
    assert!(matches!(
        pick_to_geo(DVec3::ZERO),
        Err(GeoError::DegenerateGeometry { .. })
    ));

    let mut globe = Globe::default();
    assert!(globe.pick_world(glam::Vec3::ZERO).is_err());
    assert_eq!(globe.rotation().pinned(), None);
}

#[test]
fn location_query_label_uses_pinned_coordinate() {
    let mut globe = Globe::default();
    let coord = globe
        .pick_world(glam::Vec3::new(GLOBE_RADIUS, 0.0, 0.0))
        .unwrap();
    assert!((coord.lon - 90.0).abs() < 1e-4);
    assert_eq!(FactQuery::Location(coord).label(), "0.00°N, 90.00°E");
}
