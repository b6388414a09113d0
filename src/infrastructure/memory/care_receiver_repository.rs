/// In-memory CareReceiver repository, used by tests and the demo binary.

use std::collections::HashMap;

use crate::application::errors::{AppError, AppResult};
use crate::application::ports::CareReceiverRepository;
use crate::domain::care_receiver::CareReceiver;
use crate::domain::ids::CareReceiverId;

pub struct InMemoryCareReceiverRepository {
    care_receivers: HashMap<CareReceiverId, CareReceiver>,
}

impl InMemoryCareReceiverRepository {
    pub fn new() -> Self {
        Self { care_receivers: HashMap::new() }
    }
}

impl Default for InMemoryCareReceiverRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl CareReceiverRepository for InMemoryCareReceiverRepository {
    fn save(&mut self, care_receiver: CareReceiver) -> AppResult<CareReceiverId> {
        let id = CareReceiverId::new();
        self.care_receivers.insert(id, care_receiver);
        Ok(id)
    }

    fn find_by_id(&self, id: CareReceiverId) -> AppResult<CareReceiver> {
        self.care_receivers
            .get(&id)
            .cloned()
            .ok_or(AppError::CareReceiverNotFound(id))
    }

    fn update(&mut self, id: CareReceiverId, care_receiver: CareReceiver) -> AppResult<()> {
        if !self.care_receivers.contains_key(&id) {
            return Err(AppError::CareReceiverNotFound(id));
        }
        self.care_receivers.insert(id, care_receiver);
        Ok(())
    }

    fn delete(&mut self, id: CareReceiverId) -> AppResult<()> {
        self.care_receivers.remove(&id).ok_or(AppError::CareReceiverNotFound(id))?;
        Ok(())
    }

    fn list_active(&self) -> AppResult<Vec<(CareReceiverId, CareReceiver)>> {
        Ok(self
            .care_receivers
            .iter()
            .filter(|(_, cr)| cr.is_active())
            .map(|(id, cr)| (*id, cr.clone()))
            .collect())
    }
}
