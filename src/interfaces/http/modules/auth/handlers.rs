//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension};

use super::dto::{LoginRequest, LoginResponse, RefreshRequest, RegisterRequest, TokenResponse};
use crate::application::identity::UserService;
use crate::infrastructure::database::repositories::SeaOrmUserRepository;
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::CurrentUser;
use crate::interfaces::http::modules::users::UserDto;
use crate::shared::AppResult;

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub user_service: Arc<UserService<SeaOrmUserRepository>>,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "User already exists")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, ApiResponse<UserDto>)> {
    let user = state.user_service.create(request.into()).await?;
    Ok((StatusCode::CREATED, ApiResponse::success(user.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account disabled")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let auth = state.user_service.authenticate(request.into()).await?;
    Ok(ApiResponse::success(auth.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = "Authentication",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Token reissued", body = ApiResponse<TokenResponse>),
        (status = 401, description = "Invalid or expired token")
    )
)]
pub async fn refresh(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RefreshRequest>,
) -> AppResult<ApiResponse<TokenResponse>> {
    let token = state.user_service.refresh_token(&request.token)?;
    Ok(ApiResponse::success(TokenResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.user_service.token_expires_in(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserDto>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_current_user(
    State(state): State<AuthHandlerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<ApiResponse<UserDto>> {
    let user = state.user_service.get_by_id(current.user_id).await?;
    Ok(ApiResponse::success(user.into()))
}
