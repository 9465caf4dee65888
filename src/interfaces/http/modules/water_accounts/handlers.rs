//! Water account API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;
use uuid::Uuid;

use super::dto::{CreateWaterAccountRequest, WaterAccountDto};
use crate::domain::{DomainError, RepositoryProvider, WaterAccount};
use crate::interfaces::http::common::{
    ApiResponse, PaginatedResponse, PaginationParams, ValidatedJson,
};
use crate::interfaces::http::error::ApiError;

/// Water account handler state
#[derive(Clone)]
pub struct AccountAppState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    post,
    path = "/api/v1/water-accounts",
    tag = "Water Accounts",
    request_body = CreateWaterAccountRequest,
    responses(
        (status = 200, description = "Account created", body = ApiResponse<WaterAccountDto>),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn create_account(
    State(state): State<AccountAppState>,
    ValidatedJson(body): ValidatedJson<CreateWaterAccountRequest>,
) -> Result<Json<ApiResponse<WaterAccountDto>>, ApiError> {
    let account = WaterAccount::new(
        Uuid::new_v4().to_string(),
        body.name,
        body.national_id,
        body.notes,
    );
    state.repos.water_accounts().save(account.clone()).await?;

    info!(account_id = %account.id, "Water account created");

    Ok(Json(ApiResponse::success(WaterAccountDto::from_domain(
        account,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/water-accounts",
    tag = "Water Accounts",
    params(PaginationParams),
    responses(
        (status = 200, description = "Account list", body = PaginatedResponse<WaterAccountDto>)
    )
)]
pub async fn list_accounts(
    State(state): State<AccountAppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<WaterAccountDto>>, ApiError> {
    let accounts = state.repos.water_accounts().find_all().await?;
    let dtos: Vec<WaterAccountDto> = accounts
        .into_iter()
        .map(WaterAccountDto::from_domain)
        .collect();
    Ok(Json(PaginatedResponse::paginate(dtos, &pagination)))
}

#[utoipa::path(
    get,
    path = "/api/v1/water-accounts/{id}",
    tag = "Water Accounts",
    params(("id" = String, Path, description = "Water account ID")),
    responses(
        (status = 200, description = "Account details", body = ApiResponse<WaterAccountDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_account(
    State(state): State<AccountAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<WaterAccountDto>>, ApiError> {
    let account = state
        .repos
        .water_accounts()
        .find_by_id(&id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "WaterAccount",
            field: "id",
            value: id,
        })?;
    Ok(Json(ApiResponse::success(WaterAccountDto::from_domain(
        account,
    ))))
}
