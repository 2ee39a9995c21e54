/// Authentication middleware
use crate::{
    error::ServerError,
    services::auth::token_from_header,
    state::AppState,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use calorie_core::{UserId, UserStore};

/// Identity resolved from a verified bearer token
///
/// Stored in request extensions by the middleware; handlers receive it
/// through the extractor impl below.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

/// Middleware that extracts and validates a JWT from the Authorization
/// header, then resolves the token subject against the user store
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let auth_header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::Auth("user is not authorised".to_string()))?;

    let token = token_from_header(auth_header);

    // Signature and expiry checks; failures map to 401.
    let claims = state.auth_service.verify_token(token)?;

    // The subject must still exist; a token outliving its account is
    // rejected the same as an invalid one.
    let user = state
        .db
        .find_user_by_id(&UserId::new(claims.sub))
        .await?
        .ok_or_else(|| ServerError::Auth("user is not authorised".to_string()))?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        username: user.username,
    });

    Ok(next.run(request).await)
}

/// Implement FromRequestParts so AuthenticatedUser can be used as an extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ServerError::Auth("user is not authorised".to_string()))
    }
}
