//! Power supply catalog API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode};

use super::dto::{
    CreatePowerSupplyRequest, ListPowerSuppliesParams, PowerSupplyDto, UpdatePowerSupplyRequest,
};
use crate::application::catalog::PowerSupplyService;
use crate::infrastructure::database::repositories::SeaOrmPowerSupplyRepository;
use crate::interfaces::http::common::{ApiResponse, PageData, PathId, ValidatedJson, ValidatedQuery};
use crate::shared::AppResult;

#[derive(Clone)]
pub struct PowerSupplyHandlerState {
    pub power_supply_service: Arc<PowerSupplyService<SeaOrmPowerSupplyRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/powers",
    tag = "Power Supplies",
    security(("bearer_auth" = [])),
    params(ListPowerSuppliesParams),
    responses(
        (status = 200, description = "Power supply list", body = ApiResponse<PageData<PowerSupplyDto>>),
        (status = 400, description = "Invalid query"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_power_supplies(
    State(state): State<PowerSupplyHandlerState>,
    ValidatedQuery(params): ValidatedQuery<ListPowerSuppliesParams>,
) -> AppResult<ApiResponse<PageData<PowerSupplyDto>>> {
    let page = state.power_supply_service.list(params.into()).await?;
    Ok(ApiResponse::success(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/powers/{id}",
    tag = "Power Supplies",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Power supply ID")),
    responses(
        (status = 200, description = "Power supply details", body = ApiResponse<PowerSupplyDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_power_supply(
    State(state): State<PowerSupplyHandlerState>,
    PathId(id): PathId,
) -> AppResult<ApiResponse<PowerSupplyDto>> {
    let item = state.power_supply_service.get_by_id(id).await?;
    Ok(ApiResponse::success(item.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/powers",
    tag = "Power Supplies",
    security(("bearer_auth" = [])),
    request_body = CreatePowerSupplyRequest,
    responses(
        (status = 201, description = "Power supply created", body = ApiResponse<PowerSupplyDto>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_power_supply(
    State(state): State<PowerSupplyHandlerState>,
    ValidatedJson(request): ValidatedJson<CreatePowerSupplyRequest>,
) -> AppResult<(StatusCode, ApiResponse<PowerSupplyDto>)> {
    let item = state.power_supply_service.create(request.into()).await?;
    Ok((StatusCode::CREATED, ApiResponse::success(item.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/powers/{id}",
    tag = "Power Supplies",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Power supply ID")),
    request_body = UpdatePowerSupplyRequest,
    responses(
        (status = 200, description = "Power supply updated", body = ApiResponse<PowerSupplyDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_power_supply(
    State(state): State<PowerSupplyHandlerState>,
    PathId(id): PathId,
    ValidatedJson(request): ValidatedJson<UpdatePowerSupplyRequest>,
) -> AppResult<ApiResponse<PowerSupplyDto>> {
    let item = state.power_supply_service.update(id, request.into()).await?;
    Ok(ApiResponse::success(item.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/powers/{id}",
    tag = "Power Supplies",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Power supply ID")),
    responses(
        (status = 200, description = "Power supply deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_power_supply(
    State(state): State<PowerSupplyHandlerState>,
    PathId(id): PathId,
) -> AppResult<ApiResponse<()>> {
    state.power_supply_service.delete(id).await?;
    Ok(ApiResponse::ok())
}
