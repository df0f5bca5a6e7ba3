use std::sync::Arc;

use application::{
    interfaces::password_hasher::PasswordHasher,
    usercases::auth::{AuthError, AuthUseCase},
};
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{Method, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;
use domain::{
    repositories::{sessions::SessionStore, users::UserRepository},
    value_objects::sessions::Session,
};
use tracing::warn;
use uuid::Uuid;

use crate::axum_http::error_responses::AppError;

pub const SESSION_COOKIE: &str = "session_token";
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Resolves a session ID into a live session.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, session_id: &str) -> Result<Session, AuthError>;
}

#[async_trait]
impl<U, S, H> Authenticator for AuthUseCase<U, S, H>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    async fn authenticate(&self, session_id: &str) -> Result<Session, AuthError> {
        AuthUseCase::authenticate(self, session_id).await
    }
}

/// Request extension carrying the authenticator used by [`AuthUser`].
pub type SharedAuthenticator = Arc<dyn Authenticator>;

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub username: String,
    pub session_id: String,
}

fn requires_csrf(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let authenticator = parts
            .extensions
            .get::<SharedAuthenticator>()
            .cloned()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("authenticator is not installed")))?;

        let jar = CookieJar::from_headers(&parts.headers);
        let session_id = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(AppError::Unauthorized)?;

        let session = authenticator.authenticate(&session_id).await?;

        if requires_csrf(&parts.method) {
            let token = parts
                .headers
                .get(CSRF_HEADER)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();

            if !session.verify_csrf(token) {
                warn!(user_id = %session.user.user_id, method = %parts.method, "auth: CSRF token mismatch");
                return Err(AppError::Forbidden("invalid CSRF token".to_string()));
            }
        }

        Ok(AuthUser {
            user_id: session.user.user_id,
            email: session.user.email,
            username: session.user.username,
            session_id: session.session_id,
        })
    }
}
