/// In-memory Availability Store, used by tests and the demo binary.

use std::collections::HashMap;
use chrono::{DateTime, Utc};

use crate::application::errors::AppResult;
use crate::application::ports::AvailabilityRepository;
use crate::domain::availability::{AvailabilityVersion, TimeOffInterval, WeeklySchedule};
use crate::domain::ids::CareGiverId;

pub struct InMemoryAvailabilityRepository {
    versions: HashMap<CareGiverId, Vec<AvailabilityVersion>>,
}

impl InMemoryAvailabilityRepository {
    pub fn new() -> Self {
        Self { versions: HashMap::new() }
    }
}

impl Default for InMemoryAvailabilityRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl AvailabilityRepository for InMemoryAvailabilityRepository {
    fn create_version(
        &mut self,
        care_giver_id: CareGiverId,
        schedule: WeeklySchedule,
        time_off: Vec<TimeOffInterval>,
        effective_from: DateTime<Utc>,
    ) -> AppResult<AvailabilityVersion> {
        let history = self.versions.entry(care_giver_id).or_default();

        for version in history.iter_mut() {
            if version.is_active() && version.effective_to().is_none() {
                version.close(effective_from);
            }
        }

        let next_version = history.iter().map(|v| v.version()).max().unwrap_or(0) + 1;
        let created = AvailabilityVersion::new(care_giver_id, next_version, schedule, time_off, effective_from);
        history.push(created.clone());
        Ok(created)
    }

    fn current_for(
        &self,
        care_giver_id: CareGiverId,
        at_date: DateTime<Utc>,
    ) -> AppResult<Option<AvailabilityVersion>> {
        Ok(self
            .versions
            .get(&care_giver_id)
            .and_then(|history| {
                history
                    .iter()
                    .filter(|v| v.is_active() && v.covers_date(at_date))
                    .max_by_key(|v| v.effective_from())
            })
            .cloned())
    }

    fn at(&self, care_giver_id: CareGiverId, at_date: DateTime<Utc>) -> AppResult<Option<AvailabilityVersion>> {
        Ok(self
            .versions
            .get(&care_giver_id)
            .and_then(|history| history.iter().filter(|v| v.covers_date(at_date)).max_by_key(|v| v.effective_from()))
            .cloned())
    }

    fn history(&self, care_giver_id: CareGiverId) -> AppResult<Vec<AvailabilityVersion>> {
        let mut history = self.versions.get(&care_giver_id).cloned().unwrap_or_default();
        history.sort_by(|a, b| b.effective_from().cmp(&a.effective_from()));
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn creating_a_new_version_closes_the_open_one() {
        let mut repo = InMemoryAvailabilityRepository::new();
        let cg = CareGiverId::new();

        repo.create_version(cg, WeeklySchedule::new(), vec![], day(2026, 1, 1)).unwrap();
        repo.create_version(cg, WeeklySchedule::new(), vec![], day(2026, 3, 1)).unwrap();

        let history = repo.history(cg).unwrap();
        assert_eq!(history.len(), 2);
        let closed = history.iter().find(|v| v.version() == 1).unwrap();
        assert_eq!(closed.effective_to(), Some(day(2026, 3, 1)));
        assert!(!closed.is_active());

        let open = history.iter().find(|v| v.version() == 2).unwrap();
        assert!(open.is_active());
        assert_eq!(open.effective_to(), None);
    }

    #[test]
    fn at_most_one_open_version_per_care_giver() {
        let mut repo = InMemoryAvailabilityRepository::new();
        let cg = CareGiverId::new();
        for i in 0..5 {
            repo.create_version(cg, WeeklySchedule::new(), vec![], day(2026, 1, 1 + i)).unwrap();
        }
        let history = repo.history(cg).unwrap();
        let open_count = history.iter().filter(|v| v.is_active() && v.effective_to().is_none()).count();
        assert_eq!(open_count, 1);
    }

    #[test]
    fn current_for_picks_latest_covering_version() {
        let mut repo = InMemoryAvailabilityRepository::new();
        let cg = CareGiverId::new();
        repo.create_version(cg, WeeklySchedule::new(), vec![], day(2026, 1, 1)).unwrap();
        repo.create_version(cg, WeeklySchedule::new(), vec![], day(2026, 3, 1)).unwrap();

        let current = repo.current_for(cg, day(2026, 2, 1)).unwrap().unwrap();
        assert_eq!(current.version(), 1);

        let current = repo.current_for(cg, day(2026, 4, 1)).unwrap().unwrap();
        assert_eq!(current.version(), 2);
    }
}
