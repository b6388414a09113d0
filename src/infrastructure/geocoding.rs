/// Address geocoding adapter.

use crate::application::ports::GeocodingService;
use crate::domain::geo::GeoCoordinates;

/// Geocoder that always falls back to a pinned default location.
///
/// No real geocoding provider is wired into this crate; this adapter exists
/// so the rest of the system has something to depend on at the port
/// boundary, per SPEC_FULL §6's "best-effort with fallback to a pinned
/// default location" policy. A production deployment would replace this
/// with a real provider without touching any caller.
#[derive(Debug, Clone)]
pub struct PinnedDefaultGeocodingService {
    default_location: GeoCoordinates,
}

impl PinnedDefaultGeocodingService {
    pub fn new(default_location: GeoCoordinates) -> Self {
        Self { default_location }
    }
}

impl Default for PinnedDefaultGeocodingService {
    fn default() -> Self {
        // Null Island. Deliberately useless as a "real" location, so any
        // appointment scheduled against it is obviously relying on a
        // fallback rather than a genuine address resolution.
        Self { default_location: GeoCoordinates::new(0.0, 0.0).unwrap() }
    }
}

impl GeocodingService for PinnedDefaultGeocodingService {
    fn geocode(&self, address: &str) -> GeoCoordinates {
        if address.trim().is_empty() {
            tracing::debug!("geocoding requested for an empty address, using pinned default");
        }
        self.default_location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_returns_the_pinned_location() {
        let pinned = GeoCoordinates::new(51.5074, -0.1278).unwrap();
        let service = PinnedDefaultGeocodingService::new(pinned);
        assert_eq!(service.geocode("221B Baker Street"), pinned);
        assert_eq!(service.geocode("anything else"), pinned);
    }

    #[test]
    fn default_pins_to_null_island() {
        let service = PinnedDefaultGeocodingService::default();
        assert_eq!(service.geocode("unused"), GeoCoordinates::new(0.0, 0.0).unwrap());
    }
}
