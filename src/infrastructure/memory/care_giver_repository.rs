/// In-memory CareGiver repository, used by tests and the demo binary.

use std::collections::HashMap;

use crate::application::errors::{AppError, AppResult};
use crate::application::ports::CareGiverRepository;
use crate::domain::care_giver::CareGiver;
use crate::domain::ids::CareGiverId;

pub struct InMemoryCareGiverRepository {
    care_givers: HashMap<CareGiverId, CareGiver>,
}

impl InMemoryCareGiverRepository {
    pub fn new() -> Self {
        Self { care_givers: HashMap::new() }
    }
}

impl Default for InMemoryCareGiverRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl CareGiverRepository for InMemoryCareGiverRepository {
    fn save(&mut self, care_giver: CareGiver) -> AppResult<CareGiverId> {
        let id = CareGiverId::new();
        self.care_givers.insert(id, care_giver);
        Ok(id)
    }

    fn find_by_id(&self, id: CareGiverId) -> AppResult<CareGiver> {
        self.care_givers.get(&id).cloned().ok_or(AppError::CareGiverNotFound(id))
    }

    fn update(&mut self, id: CareGiverId, care_giver: CareGiver) -> AppResult<()> {
        if !self.care_givers.contains_key(&id) {
            return Err(AppError::CareGiverNotFound(id));
        }
        self.care_givers.insert(id, care_giver);
        Ok(())
    }

    fn delete(&mut self, id: CareGiverId) -> AppResult<()> {
        self.care_givers.remove(&id).ok_or(AppError::CareGiverNotFound(id))?;
        Ok(())
    }

    fn list_active(&self) -> AppResult<Vec<(CareGiverId, CareGiver)>> {
        Ok(self
            .care_givers
            .iter()
            .filter(|(_, cg)| cg.is_active())
            .map(|(id, cg)| (*id, cg.clone()))
            .collect())
    }
}
