use std::sync::Arc;

use application::{
    interfaces::{payments::PaymentGateway, tax_id::TaxIdVerifier},
    usercases::creators::{CreateCreatorInput, CreatorUseCase},
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use domain::repositories::{creators::CreatorRepository, subscriptions::SubscriptionRepository};
use serde::Deserialize;
use tracing::info;

use crate::{auth::AuthUser, axum_http::error_responses::AppError};

#[derive(Debug, Deserialize)]
pub struct CreateCreatorRequest {
    name: String,
    cpf: String,
    birth_date: String,
    email: String,
    phone: String,
}

pub fn routes<C, S, V, P>(usecase: Arc<CreatorUseCase<C, S, V, P>>) -> Router
where
    C: CreatorRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    V: TaxIdVerifier + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(current_creator).post(create_creator))
        .with_state(usecase)
}

pub async fn create_creator<C, S, V, P>(
    State(usecase): State<Arc<CreatorUseCase<C, S, V, P>>>,
    AuthUser { user_id, .. }: AuthUser,
    Json(body): Json<CreateCreatorRequest>,
) -> Result<impl IntoResponse, AppError>
where
    C: CreatorRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    V: TaxIdVerifier + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    info!(%user_id, "creators: registration request received");
    let creator = usecase
        .create_creator(
            user_id,
            CreateCreatorInput {
                name: body.name,
                cpf: body.cpf,
                birth_date: body.birth_date,
                email: body.email,
                phone: body.phone,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(creator)))
}

pub async fn current_creator<C, S, V, P>(
    State(usecase): State<Arc<CreatorUseCase<C, S, V, P>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    C: CreatorRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    V: TaxIdVerifier + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    let creator = usecase.get_by_user_id(user_id).await?;
    Ok(Json(creator))
}
