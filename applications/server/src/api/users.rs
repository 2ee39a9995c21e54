/// User profile API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use calorie_core::{UpdateUser, User, UserStore};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
}

/// Resolve a `:username` path parameter to a record the caller owns.
///
/// The ownership comparison runs before the lookup so that a mismatch is
/// rejected identically whether or not the target account exists.
pub(crate) async fn owned_user(
    app_state: &AppState,
    auth: &AuthenticatedUser,
    username: &str,
) -> Result<User> {
    if auth.username != username {
        return Err(ServerError::Forbidden(format!(
            "{} is not authorised to view username: {}",
            auth.username, username
        )));
    }

    app_state
        .db
        .find_user(username)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("cannot find user with username: {username}")))
}

/// GET /users
pub async fn list_users(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<User>>> {
    let users = app_state.db.all_users().await?;
    Ok(Json(users))
}

/// GET /users/:username
pub async fn get_user(
    Path(username): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<User>> {
    let user = owned_user(&app_state, &auth, &username).await?;
    Ok(Json(user))
}

/// PUT /users/:username
pub async fn update_user(
    Path(username): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>> {
    owned_user(&app_state, &auth, &username).await?;

    let updated = app_state
        .db
        .update_user(&username, UpdateUser { email: req.email })
        .await?
        .ok_or_else(|| {
            ServerError::NotFound(format!("cannot find user with username: {username}"))
        })?;

    Ok(Json(updated))
}

/// DELETE /users/:username
pub async fn delete_user(
    Path(username): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<User>> {
    owned_user(&app_state, &auth, &username).await?;

    let removed = app_state.db.delete_user(&username).await?.ok_or_else(|| {
        ServerError::NotFound(format!("cannot find user with username: {username}"))
    })?;

    tracing::info!("Account deleted for {}", removed.username);

    Ok(Json(removed))
}
