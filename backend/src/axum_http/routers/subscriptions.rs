use std::sync::Arc;

use application::{interfaces::payments::PaymentGateway, usercases::subscriptions::BillingUseCase};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use domain::repositories::subscriptions::SubscriptionRepository;
use serde_json::json;
use tracing::warn;

use crate::{auth::AuthUser, axum_http::error_responses::AppError};

const STRIPE_SIGNATURE_HEADER: &str = "stripe-signature";

pub fn routes<S, P>(usecase: Arc<BillingUseCase<S, P>>) -> Router
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    Router::new()
        .route("/status", get(subscription_status))
        .route("/cancel", post(cancel_subscription))
        .route("/end-trial", post(end_trial))
        .route("/webhook", post(webhook))
        .with_state(usecase)
}

pub async fn subscription_status<S, P>(
    State(usecase): State<Arc<BillingUseCase<S, P>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    let status = usecase.access_status(user_id).await?;
    Ok(Json(status))
}

pub async fn cancel_subscription<S, P>(
    State(usecase): State<Arc<BillingUseCase<S, P>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    usecase.cancel(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn end_trial<S, P>(
    State(usecase): State<Arc<BillingUseCase<S, P>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    usecase.end_trial(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Stripe calls this without a session; the signature header authenticates it.
pub async fn webhook<S, P>(
    State(usecase): State<Arc<BillingUseCase<S, P>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            warn!("subscriptions: webhook without signature header");
            AppError::BadRequest("missing stripe-signature header".to_string())
        })?;

    usecase.handle_webhook(&body, signature).await?;

    Ok(Json(json!({ "received": true })))
}
