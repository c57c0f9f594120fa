//! Latitude/longitude <-> sphere-local points.
//!
//! The pole is the local +Y axis and longitude 0 lies on +Z, increasing
//! towards +X. Computations run in `f64` so that a place/pick round trip stays
//! well inside a micro-degree.

use crate::error::GeoError;
use glam::DVec3;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoCoordinate {
    /// Degrees in \[-90, 90\].
    pub lat: f64,
    /// Degrees in (-180, 180\].
    pub lon: f64,
}

impl GeoCoordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values that print as 0.00 keep the N/E letter.
        let negative = |v: f64| (v * 100.0).round() < 0.0;
        let ns = if negative(self.lat) { 'S' } else { 'N' };
        let ew = if negative(self.lon) { 'W' } else { 'E' };
        write!(
            f,
            "{:.2}°{}, {:.2}°{}",
            self.lat.abs(),
            ns,
            self.lon.abs(),
            ew
        )
    }
}

/// Convert a point in the sphere's local frame to a coordinate.
///
/// Only the direction matters, so points slightly above or below the surface
/// map to the same coordinate. Longitude is arbitrary (but finite) at the poles.
pub fn pick_to_geo(point: DVec3) -> Result<GeoCoordinate, GeoError> {
    let length = point.length();
    if !length.is_finite() || length <= f64::EPSILON {
        return Err(GeoError::DegenerateGeometry { length });
    }
    let v = point / length;
    let phi = v.y.clamp(-1.0, 1.0).acos();
    let theta = v.x.atan2(v.z);

    let lat = 90.0 - phi.to_degrees();
    let mut lon = theta.to_degrees();
    if lon <= -180.0 {
        lon += 360.0;
    }
    Ok(GeoCoordinate { lat, lon })
}

/// Place a coordinate on a sphere of `radius` in the sphere's local frame.
pub fn geo_to_point(coord: GeoCoordinate, radius: f64) -> DVec3 {
    let phi = (90.0 - coord.lat).to_radians();
    let theta = coord.lon.to_radians();
    DVec3::new(
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
        radius * phi.sin() * theta.cos(),
    )
}
