/// Account and authentication API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use calorie_core::{NewUser, UserStore};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub jwt: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct SecureResponse {
    pub username: String,
}

/// POST /login
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let user = app_state
        .db
        .find_user(&req.username)
        .await?
        .ok_or_else(|| ServerError::Auth("invalid username or password".to_string()))?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &user.password_hash)?
    {
        return Err(ServerError::Auth(
            "invalid username or password".to_string(),
        ));
    }

    let jwt = app_state
        .auth_service
        .issue_token(&user.id, &user.username)?;

    Ok(Json(LoginResponse {
        username: user.username,
        jwt,
    }))
}

/// POST /signup
pub async fn signup(
    State(app_state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>)> {
    let password_hash = app_state.auth_service.hash_password(&req.password)?;

    let user = app_state
        .db
        .create_user(NewUser {
            username: req.username,
            password_hash,
            email: req.email,
        })
        .await?;

    tracing::info!("Account created for {}", user.username);

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            username: user.username,
        }),
    ))
}

/// GET /secure
///
/// Returns the identity behind the presented token; useful as a
/// token-validity probe for clients.
pub async fn secure(auth: AuthenticatedUser) -> Json<SecureResponse> {
    Json(SecureResponse {
        username: auth.username,
    })
}
