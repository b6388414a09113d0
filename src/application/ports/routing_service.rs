/// Port for an external driving-directions service (SPEC_FULL §4.1, §6).

use crate::domain::geo::GeoCoordinates;

/// Travel time in minutes between two points.
///
/// Implementations are expected to fall back to a Haversine-based estimate
/// on any failure (timeout, non-2xx, parse error, no route) rather than
/// propagate an error — this is a best-effort collaborator, never a hard
/// dependency of the engine.
pub trait RoutingService {
    fn travel_time_minutes(&self, from: GeoCoordinates, to: GeoCoordinates) -> u32;
}
