use std::{collections::HashSet, sync::Arc};

use anyhow::Result as AnyResult;
use domain::{
    entities::clients::Client,
    repositories::clients::ClientRepository,
    value_objects::{
        birth_dates::BirthDate,
        clients::{ClientDto, ClientListDto, ClientQuery},
        cpf::Cpf,
        errors::ValidationError,
        pagination::Pagination,
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::interfaces::tax_id::{CpfLookup, TaxIdVerifier};

const CSV_CONTENT_TYPES: [&str; 4] = [
    "text/csv",
    "application/csv",
    "application/vnd.ms-excel",
    "text/plain",
];
const CSV_COLUMNS: usize = 5;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("client already exists")]
    AlreadyExists,
    #[error("client not found")]
    NotFound,
    #[error("failed to validate CPF")]
    VerificationFailed { retryable: bool },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid import: {0}")]
    InvalidImport(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type UseCaseResult<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateClientInput {
    pub name: String,
    pub cpf: String,
    pub birth_date: String,
    pub email: String,
    pub phone: String,
}

/// Birth date is fixed once a client is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateClientInput {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportClientsInput {
    pub file_name: String,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListClientsInput {
    pub term: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

pub struct ClientUseCase<R, V>
where
    R: ClientRepository + Send + Sync + 'static,
    V: TaxIdVerifier + Send + Sync + 'static,
{
    client_repo: Arc<R>,
    tax_id_verifier: Arc<V>,
}

impl<R, V> ClientUseCase<R, V>
where
    R: ClientRepository + Send + Sync + 'static,
    V: TaxIdVerifier + Send + Sync + 'static,
{
    pub fn new(client_repo: Arc<R>, tax_id_verifier: Arc<V>) -> Self {
        Self {
            client_repo,
            tax_id_verifier,
        }
    }

    /// Registers a client under the name the tax-ID registry holds for the CPF.
    pub async fn create_client(
        &self,
        creator_id: Uuid,
        input: CreateClientInput,
    ) -> UseCaseResult<ClientDto> {
        let cpf = Cpf::new(&input.cpf).map_err(ValidationError::from)?;

        if self.find_by_cpf(creator_id, &cpf).await?.is_some() {
            warn!(%creator_id, "clients: client already exists");
            return Err(ClientError::AlreadyExists);
        }

        let mut client = Client::new(
            creator_id,
            &input.name,
            &input.cpf,
            &input.birth_date,
            &input.email,
            &input.phone,
        )?;

        let lookup = self.verify(client.cpf(), client.birth_date()).await?;
        client.rename(&lookup.name)?;

        self.client_repo.create(&client).await.map_err(|err| {
            error!(%creator_id, db_error = ?err, "clients: failed to create client");
            ClientError::Internal(err)
        })?;

        info!(%creator_id, client_id = %client.id(), "clients: client created");
        Ok(ClientDto::from(&client))
    }

    pub async fn update_client(
        &self,
        creator_id: Uuid,
        client_id: Uuid,
        input: UpdateClientInput,
    ) -> UseCaseResult<ClientDto> {
        let current = self.load_owned(creator_id, client_id).await?;

        let mut updated = current.clone();
        updated.update(&input.name, &input.cpf, &input.email, &input.phone)?;

        if updated.cpf() != current.cpf() {
            let taken = self
                .find_by_cpf(creator_id, updated.cpf())
                .await?
                .is_some_and(|other| other.id() != client_id);
            if taken {
                warn!(%creator_id, %client_id, "clients: CPF already used by another client");
                return Err(ClientError::AlreadyExists);
            }
        }

        let lookup = self.verify(updated.cpf(), updated.birth_date()).await?;
        updated.rename(&lookup.name)?;

        self.client_repo.update(&updated).await.map_err(|err| {
            error!(%creator_id, %client_id, db_error = ?err, "clients: failed to update client");
            ClientError::Internal(err)
        })?;

        info!(%creator_id, %client_id, "clients: client updated");
        Ok(ClientDto::from(&updated))
    }

    /// Imports a CSV of `name,cpf,birth_date,email,phone` rows (header first).
    /// Either every row is stored or none is.
    pub async fn import_clients(
        &self,
        creator_id: Uuid,
        input: ImportClientsInput,
    ) -> UseCaseResult<usize> {
        if !is_csv(&input.file_name, input.content_type.as_deref()) {
            warn!(
                %creator_id,
                file_name = %input.file_name,
                content_type = ?input.content_type,
                "clients: rejected non-CSV import"
            );
            return Err(ClientError::InvalidImport("file must be a CSV".to_string()));
        }

        let mut clients = parse_rows(creator_id, &input.content)?;
        if clients.is_empty() {
            return Err(ClientError::InvalidImport("file has no clients".to_string()));
        }

        let mut seen = HashSet::new();
        for (line, client) in &clients {
            if !seen.insert(client.cpf().clone()) {
                return Err(ClientError::InvalidImport(format!(
                    "line {line}: duplicate CPF in file"
                )));
            }
            if self.find_by_cpf(creator_id, client.cpf()).await?.is_some() {
                return Err(ClientError::InvalidImport(format!(
                    "line {line}: client already exists"
                )));
            }
        }

        for (line, client) in clients.iter_mut() {
            let lookup = self
                .verify(client.cpf(), client.birth_date())
                .await
                .inspect_err(|_| warn!(%creator_id, line = *line, "clients: import row failed verification"))?;
            client.rename(&lookup.name).map_err(|err| {
                ClientError::InvalidImport(format!("line {line}: {err}"))
            })?;
        }

        let clients: Vec<Client> = clients.into_iter().map(|(_, client)| client).collect();
        self.client_repo
            .create_batch(&clients)
            .await
            .map_err(|err| {
                error!(
                    %creator_id,
                    rows = clients.len(),
                    db_error = ?err,
                    "clients: failed to store imported clients"
                );
                ClientError::Internal(err)
            })?;

        info!(%creator_id, imported = clients.len(), "clients: import completed");
        Ok(clients.len())
    }

    pub async fn list_clients(
        &self,
        creator_id: Uuid,
        input: ListClientsInput,
    ) -> UseCaseResult<ClientListDto> {
        let query = ClientQuery::new(
            creator_id,
            input.term,
            Pagination::new(input.page, input.page_size),
        );

        let (clients, total) = self.client_repo.list(&query).await.map_err(|err| {
            error!(%creator_id, db_error = ?err, "clients: failed to list clients");
            ClientError::Internal(err)
        })?;

        Ok(ClientListDto {
            clients: clients.iter().map(ClientDto::from).collect(),
            page_info: query.pagination.with_total(total),
        })
    }

    pub async fn get_client(&self, creator_id: Uuid, client_id: Uuid) -> UseCaseResult<ClientDto> {
        let client = self.load_owned(creator_id, client_id).await?;
        Ok(ClientDto::from(&client))
    }

    async fn load_owned(&self, creator_id: Uuid, client_id: Uuid) -> UseCaseResult<Client> {
        let client = self
            .client_repo
            .find_by_id(client_id)
            .await
            .map_err(|err| {
                error!(%client_id, db_error = ?err, "clients: failed to load client");
                ClientError::Internal(err)
            })?;

        match client {
            Some(client) if client.is_owned_by(creator_id) => Ok(client),
            _ => {
                warn!(%creator_id, %client_id, "clients: client not found");
                Err(ClientError::NotFound)
            }
        }
    }

    async fn find_by_cpf(&self, creator_id: Uuid, cpf: &Cpf) -> AnyResult<Option<Client>> {
        self.client_repo
            .find_by_cpf(creator_id, cpf)
            .await
            .inspect_err(|err| {
                error!(%creator_id, db_error = ?err, "clients: failed to look up CPF");
            })
    }

    async fn verify(&self, cpf: &Cpf, birth_date: BirthDate) -> UseCaseResult<CpfLookup> {
        self.tax_id_verifier
            .consult_cpf(cpf, birth_date)
            .await
            .map_err(|err| {
                warn!(error = %err, retryable = err.is_retryable(), "clients: CPF verification failed");
                ClientError::VerificationFailed {
                    retryable: err.is_retryable(),
                }
            })
    }
}

fn is_csv(file_name: &str, content_type: Option<&str>) -> bool {
    if !file_name.to_ascii_lowercase().ends_with(".csv") {
        return false;
    }

    match content_type {
        None => true,
        Some(content_type) => {
            let essence = content_type
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase();
            CSV_CONTENT_TYPES.contains(&essence.as_str())
        }
    }
}

// Header is line 1, so the first row is line 2.
fn parse_rows(creator_id: Uuid, content: &[u8]) -> UseCaseResult<Vec<(usize, Client)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content);

    let mut clients = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let line = index + 2;
        let record = record.map_err(|err| {
            warn!(error = %err, line, "clients: unreadable CSV");
            ClientError::InvalidImport("failed to read CSV file".to_string())
        })?;

        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() < CSV_COLUMNS {
            return Err(ClientError::InvalidImport(format!(
                "line {line}: invalid CSV format"
            )));
        }

        let client = Client::new(
            creator_id,
            &record[0],
            &record[1],
            &record[2],
            &record[3],
            &record[4],
        )
        .map_err(|err| ClientError::InvalidImport(format!("line {line}: {err}")))?;

        clients.push((line, client));
    }

    Ok(clients)
}

#[cfg(test)]
mod tests;
