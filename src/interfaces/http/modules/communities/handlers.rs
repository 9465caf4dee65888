//! Community API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;
use uuid::Uuid;

use super::dto::{
    CommunityDto, CommunityZoneDto, CreateCommunityRequest, CreateCommunityZoneRequest,
};
use crate::domain::{
    Community, CommunityZone, ConsumptionLimitRule, DomainError, RepositoryProvider,
};
use crate::interfaces::http::common::{
    ApiResponse, PaginatedResponse, PaginationParams, ValidatedJson,
};
use crate::interfaces::http::error::ApiError;

/// Community handler state
#[derive(Clone)]
pub struct CommunityAppState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    post,
    path = "/api/v1/communities",
    tag = "Communities",
    request_body = CreateCommunityRequest,
    responses(
        (status = 200, description = "Community created", body = ApiResponse<CommunityDto>),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn create_community(
    State(state): State<CommunityAppState>,
    ValidatedJson(body): ValidatedJson<CreateCommunityRequest>,
) -> Result<Json<ApiResponse<CommunityDto>>, ApiError> {
    let rule_type = body.parse_rule_type()?;
    let community = Community::new(
        Uuid::new_v4().to_string(),
        body.name,
        ConsumptionLimitRule {
            rule_type,
            value: body.limit_rule_value,
        },
    );
    state.repos.communities().save(community.clone()).await?;

    info!(community_id = %community.id, "Community created");

    Ok(Json(ApiResponse::success(CommunityDto::from_domain(
        community,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/communities",
    tag = "Communities",
    params(PaginationParams),
    responses(
        (status = 200, description = "Community list", body = PaginatedResponse<CommunityDto>)
    )
)]
pub async fn list_communities(
    State(state): State<CommunityAppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<CommunityDto>>, ApiError> {
    let communities = state.repos.communities().find_all().await?;
    let dtos: Vec<CommunityDto> = communities
        .into_iter()
        .map(CommunityDto::from_domain)
        .collect();
    Ok(Json(PaginatedResponse::paginate(dtos, &pagination)))
}

#[utoipa::path(
    get,
    path = "/api/v1/communities/{id}",
    tag = "Communities",
    params(("id" = String, Path, description = "Community ID")),
    responses(
        (status = 200, description = "Community details", body = ApiResponse<CommunityDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_community(
    State(state): State<CommunityAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CommunityDto>>, ApiError> {
    let community = state
        .repos
        .communities()
        .find_by_id(&id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "Community",
            field: "id",
            value: id,
        })?;
    Ok(Json(ApiResponse::success(CommunityDto::from_domain(
        community,
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/communities/{id}/zones",
    tag = "Communities",
    params(("id" = String, Path, description = "Community ID")),
    request_body = CreateCommunityZoneRequest,
    responses(
        (status = 200, description = "Zone created", body = ApiResponse<CommunityZoneDto>),
        (status = 404, description = "Community not found")
    )
)]
pub async fn create_zone(
    State(state): State<CommunityAppState>,
    Path(community_id): Path<String>,
    ValidatedJson(body): ValidatedJson<CreateCommunityZoneRequest>,
) -> Result<Json<ApiResponse<CommunityZoneDto>>, ApiError> {
    state
        .repos
        .communities()
        .find_by_id(&community_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "Community",
            field: "id",
            value: community_id.clone(),
        })?;

    let zone = CommunityZone::new(Uuid::new_v4().to_string(), community_id, body.name);
    state.repos.community_zones().save(zone.clone()).await?;

    info!(zone_id = %zone.id, community_id = %zone.community_id, "Community zone created");

    Ok(Json(ApiResponse::success(CommunityZoneDto::from_domain(
        zone,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/communities/{id}/zones",
    tag = "Communities",
    params(("id" = String, Path, description = "Community ID")),
    responses(
        (status = 200, description = "Zone list", body = ApiResponse<Vec<CommunityZoneDto>>)
    )
)]
pub async fn list_zones(
    State(state): State<CommunityAppState>,
    Path(community_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<CommunityZoneDto>>>, ApiError> {
    let zones = state
        .repos
        .community_zones()
        .find_by_community(&community_id)
        .await?;
    Ok(Json(ApiResponse::success(
        zones.into_iter().map(CommunityZoneDto::from_domain).collect(),
    )))
}
