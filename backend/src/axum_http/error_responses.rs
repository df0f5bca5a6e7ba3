use application::usercases::{
    auth::AuthError, clients::ClientError, creators::CreatorError,
    subscriptions::BillingError,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    PaymentRequired(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::PaymentRequired(_) => StatusCode::PAYMENT_REQUIRED,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AppError::Internal(err) = &self {
            error!(error = ?err, "http: internal error");
        }

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            // Internal variants only ever display the generic message.
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

// The verification message stays generic whatever the lookup reported.
fn verification_failed(retryable: bool, message: String) -> AppError {
    if retryable {
        AppError::ServiceUnavailable(message)
    } else {
        AppError::Unprocessable(message)
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let message = err.to_string();
        match err {
            ClientError::AlreadyExists => AppError::Conflict(message),
            ClientError::NotFound => AppError::NotFound(message),
            ClientError::VerificationFailed { retryable } => verification_failed(retryable, message),
            ClientError::Validation(_) | ClientError::InvalidImport(_) => {
                AppError::BadRequest(message)
            }
            ClientError::Internal(err) => AppError::Internal(err),
        }
    }
}

impl From<CreatorError> for AppError {
    fn from(err: CreatorError) -> Self {
        let message = err.to_string();
        match err {
            CreatorError::AlreadyExists => AppError::Conflict(message),
            CreatorError::NotFound => AppError::NotFound(message),
            CreatorError::VerificationFailed { retryable } => {
                verification_failed(retryable, message)
            }
            CreatorError::Validation(_) => AppError::BadRequest(message),
            CreatorError::Internal(err) => AppError::Internal(err),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        match err {
            AuthError::EmailTaken => AppError::Conflict(message),
            AuthError::InvalidCredentials => AppError::Unauthorized,
            AuthError::Unauthorized => AppError::Unauthorized,
            AuthError::Validation(_) => AppError::BadRequest(message),
            AuthError::Internal(err) => AppError::Internal(err),
        }
    }
}

impl From<BillingError> for AppError {
    fn from(err: BillingError) -> Self {
        let message = err.to_string();
        match err {
            BillingError::PaymentRequired => AppError::PaymentRequired(message),
            BillingError::SubscriptionNotFound => AppError::NotFound(message),
            BillingError::InvalidWebhook(_) => AppError::BadRequest(message),
            BillingError::Internal(err) => AppError::Internal(err),
        }
    }
}
