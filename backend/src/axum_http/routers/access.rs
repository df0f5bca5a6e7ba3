use std::sync::Arc;

use application::usercases::creators::CreatorError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};
use uuid::Uuid;

use super::{Billing, Creators};
use crate::{auth::AuthUser, axum_http::error_responses::AppError};

/// The creator behind the logged-in user, set by [`require_access`].
#[derive(Debug, Clone, Copy)]
pub struct CurrentCreator {
    pub user_id: Uuid,
    pub creator_id: Uuid,
}

pub struct AccessGate {
    pub billing: Arc<Billing>,
    pub creators: Arc<Creators>,
}

/// Lets the request through only for creators with an active trial or subscription.
pub async fn require_access(
    State(gate): State<Arc<AccessGate>>,
    AuthUser { user_id, .. }: AuthUser,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let access = gate.billing.ensure_access(user_id).await?;
    debug!(%user_id, %access, "access: granted");

    let creator = gate
        .creators
        .get_by_user_id(user_id)
        .await
        .map_err(|err| match err {
            CreatorError::NotFound => {
                warn!(%user_id, "access: user has no creator profile");
                AppError::Forbidden("creator profile required".to_string())
            }
            other => AppError::from(other),
        })?;

    request.extensions_mut().insert(CurrentCreator {
        user_id,
        creator_id: creator.id,
    });

    Ok(next.run(request).await)
}
