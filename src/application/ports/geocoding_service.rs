/// Port for an external address-geocoding service (SPEC_FULL §6).

use crate::domain::geo::GeoCoordinates;

/// Resolves a free-text address to coordinates.
///
/// Best-effort: implementations fall back to a pinned default location on
/// failure rather than propagate an error.
pub trait GeocodingService {
    fn geocode(&self, address: &str) -> GeoCoordinates;
}
