/// HTTP-backed RoutingService, with a Haversine fallback on any failure.

use serde::Deserialize;

use crate::application::ports::RoutingService;
use crate::domain::geo::GeoCoordinates;

/// Average road speed assumed when estimating travel time from straight-line
/// distance, per SPEC_FULL §4.1.
const FALLBACK_SPEED_KMH: f64 = 30.0;

#[derive(Debug, Clone)]
pub struct RoutingConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    code: String,
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    duration: f64,
}

/// Calls an OSRM-compatible `/route/v1/{profile}/{coords}` endpoint for the
/// travel time between two points. Any failure — request error, non-2xx,
/// unparsable body, an OSRM status other than `"Ok"`, or an empty route
/// list — falls back to a Haversine-distance estimate rather than
/// propagating an error, since this is a best-effort collaborator.
#[derive(Debug, Clone)]
pub struct HttpRoutingService {
    config: RoutingConfig,
    client: reqwest::blocking::Client,
}

impl HttpRoutingService {
    pub fn new(config: RoutingConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    fn fetch_duration_minutes(&self, from: GeoCoordinates, to: GeoCoordinates) -> Option<u32> {
        let url = format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=false",
            self.config.base_url,
            self.config.profile,
            from.longitude(),
            from.latitude(),
            to.longitude(),
            to.latitude(),
        );

        let response = self.client.get(&url).send().ok()?;
        if !response.status().is_success() {
            return None;
        }

        let body: RouteResponse = response.json().ok()?;
        if body.code != "Ok" {
            return None;
        }

        let route = body.routes.first()?;
        Some((route.duration / 60.0).ceil() as u32)
    }
}

fn haversine_fallback_minutes(from: GeoCoordinates, to: GeoCoordinates) -> u32 {
    let distance_km = from.distance_km(&to);
    ((distance_km / FALLBACK_SPEED_KMH) * 60.0).ceil() as u32
}

impl RoutingService for HttpRoutingService {
    fn travel_time_minutes(&self, from: GeoCoordinates, to: GeoCoordinates) -> u32 {
        match self.fetch_duration_minutes(from, to) {
            Some(minutes) => minutes,
            None => {
                tracing::debug!("routing service unavailable, falling back to haversine estimate");
                haversine_fallback_minutes(from, to)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_fallback_is_reasonable_for_a_known_distance() {
        let a = GeoCoordinates::new(36.17, -115.14).unwrap();
        let b = GeoCoordinates::new(34.05, -118.24).unwrap();
        let minutes = haversine_fallback_minutes(a, b);
        // ~370km at 30km/h is ~740 minutes.
        assert!(minutes > 600 && minutes < 900, "got {}", minutes);
    }

    #[test]
    fn haversine_fallback_is_zero_for_same_point() {
        let a = GeoCoordinates::new(36.17, -115.14).unwrap();
        assert_eq!(haversine_fallback_minutes(a, a), 0);
    }
}
