//! # Application Configuration
//!
//! Ambient, environment-driven configuration: which infrastructure adapters
//! to wire up and their connection settings. This is distinct from
//! [`crate::domain::SystemSettings`], the runtime-mutable scheduling
//! tunables served through [`crate::application::SettingsCache`] — that
//! object is written by operators at runtime, not read once from the
//! environment at startup.
//!
//! ## Environment Variables
//!
//! Create a `.env` file in the project root with any of these variables:
//!
//! ```text
//! ROUTING_BASE_URL=http://localhost:5000
//! ROUTING_PROFILE=car
//! ROUTING_TIMEOUT_SECS=5
//! GEOCODING_DEFAULT_LATITUDE=0.0
//! GEOCODING_DEFAULT_LONGITUDE=0.0
//! ```

use once_cell::sync::Lazy;
use std::env;

/// Global application configuration
pub struct Config {
    pub routing_base_url: String,
    pub routing_profile: String,
    pub routing_timeout_secs: u64,
    pub geocoding_default_latitude: f64,
    pub geocoding_default_longitude: f64,
}

impl Config {
    /// Load configuration from environment variables (with defaults)
    fn load() -> Self {
        // Try to load .env file (optional, fails silently if not found)
        let _ = dotenv::dotenv();

        Self {
            routing_base_url: env_var_or("ROUTING_BASE_URL", "http://localhost:5000".to_string()),
            routing_profile: env_var_or("ROUTING_PROFILE", "car".to_string()),
            routing_timeout_secs: env_var_or("ROUTING_TIMEOUT_SECS", 5),
            geocoding_default_latitude: env_var_or("GEOCODING_DEFAULT_LATITUDE", 0.0),
            geocoding_default_longitude: env_var_or("GEOCODING_DEFAULT_LONGITUDE", 0.0),
        }
    }

    pub fn routing_config(&self) -> crate::infrastructure::routing::RoutingConfig {
        crate::infrastructure::routing::RoutingConfig {
            base_url: self.routing_base_url.clone(),
            profile: self.routing_profile.clone(),
            timeout_secs: self.routing_timeout_secs,
        }
    }
}

/// Parse environment variable or return default value
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    env::var(key)
        .ok()
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}

/// Global configuration instance (lazy-loaded on first access)
pub static CONFIG: Lazy<Config> = Lazy::new(Config::load);
