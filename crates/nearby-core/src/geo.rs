//! Coordinates, location samples and great-circle distance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoordinateError;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] naming the offending axis.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::Latitude(lat));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(CoordinateError::Longitude(lng));
        }
        Ok(Self { lat, lng })
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lng)
    }
}

/// One successful position fix. Never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationSample {
    pub coordinate: Coordinate,
    pub acquired_at: DateTime<Utc>,
}

/// Great-circle distance between two coordinates in kilometres (haversine,
/// spherical Earth of radius 6371 km).
#[must_use]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push `h` a hair past 1 for antipodal points.
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Formats a distance for display: whole metres below 1 km, otherwise
/// kilometres with one decimal.
#[must_use]
pub fn format_distance(km: f64) -> String {
    let metres = (km * 1000.0).round();
    if metres < 1000.0 {
        format!("{metres:.0} m")
    } else {
        format!("{km:.1} km")
    }
}
