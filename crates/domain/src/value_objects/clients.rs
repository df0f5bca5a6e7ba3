use serde::Serialize;
use uuid::Uuid;

use super::pagination::{PageInfo, Pagination};
use crate::entities::clients::Client;

/// Client listing filter, always scoped to one creator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientQuery {
    pub creator_id: Uuid,
    pub term: Option<String>,
    pub pagination: Pagination,
}

impl ClientQuery {
    pub fn new(creator_id: Uuid, term: Option<String>, pagination: Pagination) -> Self {
        Self {
            creator_id,
            term,
            pagination,
        }
    }

    /// Trimmed search term, `None` when blank.
    pub fn term(&self) -> Option<&str> {
        self.term
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// Digits of the term, so `461.371` matches a stored `46137164039`.
    pub fn cpf_term(&self) -> Option<String> {
        let digits: String = self.term()?.chars().filter(|c| c.is_ascii_digit()).collect();
        (!digits.is_empty()).then_some(digits)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientDto {
    pub id: Uuid,
    pub name: String,
    pub cpf: String,
    pub birth_date: String,
    pub email: String,
    pub phone: String,
}

impl From<&Client> for ClientDto {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id(),
            name: client.name().to_string(),
            cpf: client.cpf().to_string(),
            birth_date: client.birth_date().to_string(),
            email: client.email().to_string(),
            phone: client.phone().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientListDto {
    pub clients: Vec<ClientDto>,
    pub page_info: PageInfo,
}
