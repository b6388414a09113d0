/// Repository port for the CareReceiver aggregate.

use crate::application::errors::AppResult;
use crate::domain::care_receiver::CareReceiver;
use crate::domain::ids::CareReceiverId;

pub trait CareReceiverRepository {
    fn save(&mut self, care_receiver: CareReceiver) -> AppResult<CareReceiverId>;

    fn find_by_id(&self, id: CareReceiverId) -> AppResult<CareReceiver>;

    fn update(&mut self, id: CareReceiverId, care_receiver: CareReceiver) -> AppResult<()>;

    fn delete(&mut self, id: CareReceiverId) -> AppResult<()>;

    fn list_active(&self) -> AppResult<Vec<(CareReceiverId, CareReceiver)>>;
}
