use std::sync::Arc;

use application::{
    interfaces::password_hasher::PasswordHasher,
    usercases::auth::{AuthUseCase, LoginInput, RegisterInput},
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use domain::repositories::{sessions::SessionStore, users::UserRepository};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::{AuthUser, SESSION_COOKIE},
    axum_http::error_responses::AppError,
};

#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub secure: bool,
    pub ttl_hours: i64,
}

impl SessionCookie {
    pub fn issue(&self, session_id: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, session_id))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(self.secure)
            .max_age(cookie::time::Duration::hours(self.ttl_hours))
            .build()
    }

    pub fn removal(&self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, "")).path("/").build()
    }
}

pub struct AuthState<U, S, H>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    pub usecase: Arc<AuthUseCase<U, S, H>>,
    pub cookie: SessionCookie,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
    password_confirmation: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    user_id: Uuid,
    email: String,
    username: String,
    csrf_token: String,
    expires_at: DateTime<Utc>,
}

pub fn routes<U, S, H>(state: Arc<AuthState<U, S, H>>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .with_state(state)
}

pub async fn register<U, S, H>(
    State(state): State<Arc<AuthState<U, S, H>>>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    let user = state
        .usecase
        .register(RegisterInput {
            username: body.username,
            email: body.email,
            password: body.password,
            password_confirmation: body.password_confirmation,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login<U, S, H>(
    State(state): State<Arc<AuthState<U, S, H>>>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    let session = state
        .usecase
        .login(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    let response = LoginResponse {
        user_id: session.user.user_id,
        email: session.user.email,
        username: session.user.username,
        csrf_token: session.csrf_token,
        expires_at: session.expires_at,
    };

    Ok((jar.add(state.cookie.issue(session.session_id)), Json(response)))
}

pub async fn logout<U, S, H>(
    State(state): State<Arc<AuthState<U, S, H>>>,
    auth: AuthUser,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    state.usecase.logout(&auth.session_id).await?;
    info!(user_id = %auth.user_id, "auth: user logged out");

    Ok((jar.remove(state.cookie.removal()), StatusCode::NO_CONTENT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_is_locked_down() {
        let issued = SessionCookie {
            secure: true,
            ttl_hours: 8,
        }
        .issue("abc".to_string());

        assert_eq!(issued.name(), SESSION_COOKIE);
        assert_eq!(issued.value(), "abc");
        assert_eq!(issued.http_only(), Some(true));
        assert_eq!(issued.same_site(), Some(SameSite::Strict));
        assert_eq!(issued.secure(), Some(true));
        assert_eq!(issued.path(), Some("/"));
        assert_eq!(issued.max_age(), Some(cookie::time::Duration::hours(8)));
    }

    #[test]
    fn insecure_outside_production() {
        let issued = SessionCookie {
            secure: false,
            ttl_hours: 1,
        }
        .issue("abc".to_string());

        assert_eq!(issued.secure(), Some(false));
    }
}
