use std::sync::Arc;

use application::{
    interfaces::tax_id::TaxIdVerifier,
    usercases::clients::{
        ClientUseCase, CreateClientInput, ImportClientsInput, ListClientsInput, UpdateClientInput,
    },
};
use axum::{
    Extension, Json, Router,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use domain::repositories::clients::ClientRepository;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::access::{AccessGate, CurrentCreator, require_access};
use crate::axum_http::error_responses::AppError;

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    name: String,
    cpf: String,
    birth_date: String,
    email: String,
    phone: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateClientRequest {
    name: String,
    cpf: String,
    email: String,
    phone: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListClientsQuery {
    term: Option<String>,
    page: Option<i64>,
    page_size: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    imported: usize,
}

pub fn routes<R, V>(usecase: Arc<ClientUseCase<R, V>>, gate: Arc<AccessGate>) -> Router
where
    R: ClientRepository + Send + Sync + 'static,
    V: TaxIdVerifier + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route("/:id", get(get_client))
        .route("/update/:id", post(update_client))
        .route("/import", post(import_clients))
        .route_layer(middleware::from_fn_with_state(gate, require_access))
        .with_state(usecase)
}

pub async fn create_client<R, V>(
    State(usecase): State<Arc<ClientUseCase<R, V>>>,
    Extension(creator): Extension<CurrentCreator>,
    Json(body): Json<CreateClientRequest>,
) -> Result<impl IntoResponse, AppError>
where
    R: ClientRepository + Send + Sync + 'static,
    V: TaxIdVerifier + Send + Sync + 'static,
{
    let client = usecase
        .create_client(
            creator.creator_id,
            CreateClientInput {
                name: body.name,
                cpf: body.cpf,
                birth_date: body.birth_date,
                email: body.email,
                phone: body.phone,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn update_client<R, V>(
    State(usecase): State<Arc<ClientUseCase<R, V>>>,
    Extension(creator): Extension<CurrentCreator>,
    Path(client_id): Path<Uuid>,
    Json(body): Json<UpdateClientRequest>,
) -> Result<impl IntoResponse, AppError>
where
    R: ClientRepository + Send + Sync + 'static,
    V: TaxIdVerifier + Send + Sync + 'static,
{
    let client = usecase
        .update_client(
            creator.creator_id,
            client_id,
            UpdateClientInput {
                name: body.name,
                cpf: body.cpf,
                email: body.email,
                phone: body.phone,
            },
        )
        .await?;

    Ok(Json(client))
}

pub async fn get_client<R, V>(
    State(usecase): State<Arc<ClientUseCase<R, V>>>,
    Extension(creator): Extension<CurrentCreator>,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    R: ClientRepository + Send + Sync + 'static,
    V: TaxIdVerifier + Send + Sync + 'static,
{
    let client = usecase.get_client(creator.creator_id, client_id).await?;
    Ok(Json(client))
}

pub async fn list_clients<R, V>(
    State(usecase): State<Arc<ClientUseCase<R, V>>>,
    Extension(creator): Extension<CurrentCreator>,
    Query(query): Query<ListClientsQuery>,
) -> Result<impl IntoResponse, AppError>
where
    R: ClientRepository + Send + Sync + 'static,
    V: TaxIdVerifier + Send + Sync + 'static,
{
    let clients = usecase
        .list_clients(
            creator.creator_id,
            ListClientsInput {
                term: query.term,
                page: query.page,
                page_size: query.page_size,
            },
        )
        .await?;

    Ok(Json(clients))
}

pub async fn import_clients<R, V>(
    State(usecase): State<Arc<ClientUseCase<R, V>>>,
    Extension(creator): Extension<CurrentCreator>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError>
where
    R: ClientRepository + Send + Sync + 'static,
    V: TaxIdVerifier + Send + Sync + 'static,
{
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(err.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let content = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(err.body_text()))?;

        upload = Some(ImportClientsInput {
            file_name,
            content_type,
            content: content.to_vec(),
        });
        break;
    }

    let input = upload
        .ok_or_else(|| AppError::BadRequest(format!("multipart field `{UPLOAD_FIELD}` is required")))?;

    info!(
        creator_id = %creator.creator_id,
        file_name = %input.file_name,
        size = input.content.len(),
        "clients: import upload received"
    );
    let imported = usecase.import_clients(creator.creator_id, input).await?;

    Ok((StatusCode::CREATED, Json(ImportResponse { imported })))
}
