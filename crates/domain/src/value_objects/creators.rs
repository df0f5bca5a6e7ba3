use serde::Serialize;
use uuid::Uuid;

use crate::entities::creators::Creator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatorDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub cpf: String,
    pub birth_date: String,
    pub email: String,
    pub phone: String,
}

impl From<&Creator> for CreatorDto {
    fn from(creator: &Creator) -> Self {
        Self {
            id: creator.id(),
            user_id: creator.user_id(),
            name: creator.name().to_string(),
            cpf: creator.cpf().to_string(),
            birth_date: creator.birth_date().to_string(),
            email: creator.contact().email().to_string(),
            phone: creator.contact().phone().to_string(),
        }
    }
}
