//! Geographic coordinates and distance calculation.

use std::fmt;
use serde::{Deserialize, Serialize};

/// Earth radius in kilometers, used by the haversine formula below.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Validated geographic coordinates (latitude and longitude).
///
/// # Domain Rules
/// - Latitude must be between -90.0 and 90.0 (inclusive)
/// - Longitude must be between -180.0 and 180.0 (inclusive)
///
/// # Examples
/// ```
/// use carecadence::domain::GeoCoordinates;
///
/// let home = GeoCoordinates::new(51.5074, -0.1278).unwrap();
/// assert_eq!(home.latitude(), 51.5074);
/// assert!(GeoCoordinates::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinates {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoCoordinatesError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoCoordinatesError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoCoordinatesError::InvalidLongitude(longitude));
        }
        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// Great-circle distance to another point, in kilometers.
    pub fn distance_km(&self, other: &GeoCoordinates) -> f64 {
        haversine_km(self.as_tuple(), other.as_tuple())
    }
}

impl fmt::Display for GeoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}°, {:.4}°", self.latitude, self.longitude)
    }
}

/// Spherical-law-of-haversines distance between two (lat, lon) pairs, in km.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = from;
    let (lat2, lon2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoCoordinatesError {
    InvalidLatitude(f64),
    InvalidLongitude(f64),
}

impl fmt::Display for GeoCoordinatesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoCoordinatesError::InvalidLatitude(lat) => {
                write!(f, "invalid latitude {}: must be between -90.0 and 90.0", lat)
            }
            GeoCoordinatesError::InvalidLongitude(lon) => {
                write!(f, "invalid longitude {}: must be between -180.0 and 180.0", lon)
            }
        }
    }
}

impl std::error::Error for GeoCoordinatesError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_coordinates() {
        let coords = GeoCoordinates::new(40.7128, -74.0060).unwrap();
        assert_eq!(coords.latitude(), 40.7128);
        assert_eq!(coords.longitude(), -74.0060);
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        assert!(matches!(
            GeoCoordinates::new(91.0, 0.0),
            Err(GeoCoordinatesError::InvalidLatitude(91.0))
        ));
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        assert!(matches!(
            GeoCoordinates::new(0.0, -181.0),
            Err(GeoCoordinatesError::InvalidLongitude(-181.0))
        ));
    }

    #[test]
    fn rejects_nan_and_infinity() {
        assert!(GeoCoordinates::new(f64::NAN, 0.0).is_err());
        assert!(GeoCoordinates::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn same_point_has_zero_distance() {
        let p = GeoCoordinates::new(36.1, -115.1).unwrap();
        assert!(p.distance_km(&p) < 0.001);
    }

    #[test]
    fn known_distance_las_vegas_to_los_angeles() {
        // Actual distance is roughly 370km.
        let dist = haversine_km((36.17, -115.14), (34.05, -118.24));
        assert!(dist > 350.0 && dist < 400.0, "got {}", dist);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = (36.1, -115.1);
        let b = (36.2, -115.2);
        assert_eq!(haversine_km(a, b), haversine_km(b, a));
    }
}
