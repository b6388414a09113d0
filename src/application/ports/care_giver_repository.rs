/// Repository port for the CareGiver aggregate.

use crate::application::errors::AppResult;
use crate::domain::care_giver::CareGiver;
use crate::domain::ids::CareGiverId;

pub trait CareGiverRepository {
    fn save(&mut self, care_giver: CareGiver) -> AppResult<CareGiverId>;

    fn find_by_id(&self, id: CareGiverId) -> AppResult<CareGiver>;

    fn update(&mut self, id: CareGiverId, care_giver: CareGiver) -> AppResult<()>;

    fn delete(&mut self, id: CareGiverId) -> AppResult<()>;

    fn list_active(&self) -> AppResult<Vec<(CareGiverId, CareGiver)>>;
}
