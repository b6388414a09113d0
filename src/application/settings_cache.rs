//! Settings service (SPEC_FULL §4.8): caches the `SystemSettings` singleton
//! for 60 seconds, invalidated on write.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::domain::settings::{SettingsValidationError, SystemSettings};

const CACHE_TTL: Duration = Duration::from_secs(60);

/// Holds the current settings and serves reads from an in-memory snapshot
/// for up to `CACHE_TTL`, re-reading the backing value on expiry.
///
/// Unlike `config::CONFIG` (loaded once from the environment and never
/// mutated), this settings object is written at runtime, so the cache needs
/// an explicit `invalidate` rather than a one-shot `Lazy`.
pub struct SettingsCache {
    current: Mutex<SystemSettings>,
    cached: Mutex<Option<(SystemSettings, Instant)>>,
}

impl SettingsCache {
    pub fn new(initial: SystemSettings) -> Self {
        Self { current: Mutex::new(initial), cached: Mutex::new(None) }
    }

    /// Returns the cached snapshot if still within the TTL window, otherwise
    /// refreshes it from the backing value first.
    pub fn get(&self) -> SystemSettings {
        let mut cached = self.cached.lock().unwrap();
        if let Some((settings, fetched_at)) = *cached {
            if fetched_at.elapsed() < CACHE_TTL {
                return settings;
            }
        }
        let current = *self.current.lock().unwrap();
        *cached = Some((current, Instant::now()));
        current
    }

    /// Validates and writes a new settings value, invalidating the cache so
    /// the next `get` observes it immediately.
    pub fn set(&self, settings: SystemSettings) -> Result<(), SettingsValidationError> {
        settings.validate()?;
        *self.current.lock().unwrap() = settings;
        *self.cached.lock().unwrap() = None;
        Ok(())
    }
}

impl Default for SettingsCache {
    fn default() -> Self {
        Self::new(SystemSettings::default())
    }
}
