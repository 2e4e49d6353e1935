//! User management API handlers
//!
//! Delegates to `UserService` from the application/identity layer.

use std::sync::Arc;

use axum::extract::State;

use super::dto::{ListUsersParams, UpdateUserRequest, UserDto};
use crate::application::identity::UserService;
use crate::infrastructure::database::repositories::SeaOrmUserRepository;
use crate::interfaces::http::common::{ApiResponse, PageData, PathId, ValidatedJson, ValidatedQuery};
use crate::shared::AppResult;

/// User handler state — concrete over `SeaOrmUserRepository` for Axum compatibility.
#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService<SeaOrmUserRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListUsersParams),
    responses(
        (status = 200, description = "User list", body = ApiResponse<PageData<UserDto>>),
        (status = 400, description = "Invalid query"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    ValidatedQuery(params): ValidatedQuery<ListUsersParams>,
) -> AppResult<ApiResponse<PageData<UserDto>>> {
    let page = state.user_service.list(params.into()).await?;
    Ok(ApiResponse::success(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    PathId(id): PathId,
) -> AppResult<ApiResponse<UserDto>> {
    let user = state.user_service.get_by_id(id).await?;
    Ok(ApiResponse::success(user.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    PathId(id): PathId,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> AppResult<ApiResponse<UserDto>> {
    let user = state.user_service.update(id, request.into()).await?;
    Ok(ApiResponse::success(user.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    PathId(id): PathId,
) -> AppResult<ApiResponse<()>> {
    state.user_service.delete(id).await?;
    Ok(ApiResponse::ok())
}
