//! Authentication middleware for Axum

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::infrastructure::crypto::{JwtManager, TokenIdentity};
use crate::shared::AppError;

/// Authentication state containing the token verifier
#[derive(Clone)]
pub struct AuthState {
    pub jwt: JwtManager,
}

/// Authenticated caller, inserted into request extensions.
///
/// Extract in handlers: `Extension(user): Extension<CurrentUser>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: i64,
    pub username: String,
}

impl From<TokenIdentity> for CurrentUser {
    fn from(identity: TokenIdentity) -> Self {
        Self {
            user_id: identity.user_id,
            username: identity.username,
        }
    }
}

fn bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn authenticate(request: &Request<Body>, jwt: &JwtManager) -> Result<CurrentUser, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::unauthorized(""))?;

    let token = bearer_token(auth_header).ok_or_else(AppError::invalid_token)?;
    let identity = jwt.parse_token(token)?;
    Ok(identity.into())
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(&request, &auth_state.jwt) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}
