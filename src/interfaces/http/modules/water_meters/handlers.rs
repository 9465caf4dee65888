//! Water meter API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{info, warn};
use uuid::Uuid;

use super::dto::{
    ChangeOwnerRequest, CreateWaterMeterRequest, CreatedWaterMeterResponse,
    ReplaceWaterMeterRequest, ReplacedWaterMeterResponse, WaterMeterDto, WaterMeterFilter,
};
use crate::application::water::{
    ImageOps, MeterReplacement, NewAccount, OwnerChange, WaterMeterOwnerChanger,
    WaterMeterReplacer,
};
use crate::domain::{DomainError, MeasurementUnit, RepositoryProvider, WaterMeter};
use crate::interfaces::http::common::{
    ApiResponse, PaginatedResponse, PaginationParams, ValidatedJson,
};
use crate::interfaces::http::error::ApiError;

/// Water meter handler state
#[derive(Clone)]
pub struct MeterAppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub replacer: Arc<WaterMeterReplacer>,
    pub owner_changer: Arc<WaterMeterOwnerChanger>,
    pub images: ImageOps,
}

#[utoipa::path(
    post,
    path = "/api/v1/water-meters",
    tag = "Water Meters",
    request_body = CreateWaterMeterRequest,
    responses(
        (status = 200, description = "Meter created", body = ApiResponse<CreatedWaterMeterResponse>),
        (status = 404, description = "Account or community zone not found"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn create_meter(
    State(state): State<MeterAppState>,
    ValidatedJson(body): ValidatedJson<CreateWaterMeterRequest>,
) -> Result<Json<ApiResponse<CreatedWaterMeterResponse>>, ApiError> {
    let measurement_unit = MeasurementUnit::parse(&body.measurement_unit)?;

    state
        .repos
        .water_accounts()
        .find_by_id(&body.water_account_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "WaterAccount",
            field: "id",
            value: body.water_account_id.clone(),
        })?;
    state
        .repos
        .community_zones()
        .find_by_id(&body.water_point.community_zone_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "CommunityZone",
            field: "id",
            value: body.water_point.community_zone_id.clone(),
        })?;

    let meter = WaterMeter::new(
        Uuid::new_v4().to_string(),
        body.name,
        body.water_account_id,
        measurement_unit,
        body.water_point.into_domain(),
    );
    state.repos.water_meters().save(meter.clone()).await?;

    let image_error = match body.device_image {
        None => None,
        Some(upload) => {
            let image = upload.decode()?;
            state.images.attach_to_meter(&meter.id, image).await.err()
        }
    };
    if let Some(error) = &image_error {
        warn!(meter_id = %meter.id, error = %error, "Device photo upload failed");
    }

    info!(meter_id = %meter.id, "Water meter created");

    Ok(Json(ApiResponse::success(CreatedWaterMeterResponse {
        meter: WaterMeterDto::from_domain(meter),
        image_error,
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/water-meters",
    tag = "Water Meters",
    params(WaterMeterFilter, PaginationParams),
    responses(
        (status = 200, description = "Meter list", body = PaginatedResponse<WaterMeterDto>)
    )
)]
pub async fn list_meters(
    State(state): State<MeterAppState>,
    Query(filter): Query<WaterMeterFilter>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<WaterMeterDto>>, ApiError> {
    let meters = match &filter.water_account_id {
        Some(account_id) => state.repos.water_meters().find_by_account(account_id).await?,
        None => state.repos.water_meters().find_all().await?,
    };
    let dtos: Vec<WaterMeterDto> = meters
        .into_iter()
        .filter(|m| filter.is_active.map(|a| m.is_active == a).unwrap_or(true))
        .map(WaterMeterDto::from_domain)
        .collect();
    Ok(Json(PaginatedResponse::paginate(dtos, &pagination)))
}

#[utoipa::path(
    get,
    path = "/api/v1/water-meters/{meter_id}",
    tag = "Water Meters",
    params(("meter_id" = String, Path, description = "Water meter ID")),
    responses(
        (status = 200, description = "Meter details", body = ApiResponse<WaterMeterDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_meter(
    State(state): State<MeterAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<WaterMeterDto>>, ApiError> {
    let meter = state
        .repos
        .water_meters()
        .find_by_id(&id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "WaterMeter",
            field: "id",
            value: id,
        })?;
    Ok(Json(ApiResponse::success(WaterMeterDto::from_domain(
        meter,
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/water-meters/{meter_id}/replace",
    tag = "Water Meters",
    params(("meter_id" = String, Path, description = "Water meter ID")),
    request_body = ReplaceWaterMeterRequest,
    responses(
        (status = 200, description = "Meter replaced", body = ApiResponse<ReplacedWaterMeterResponse>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Meter inactive or rule violation")
    )
)]
pub async fn replace_meter(
    State(state): State<MeterAppState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<ReplaceWaterMeterRequest>,
) -> Result<Json<ApiResponse<ReplacedWaterMeterResponse>>, ApiError> {
    let new_measurement_unit = MeasurementUnit::parse(&body.new_measurement_unit)?;
    let device_image = body.device_image.map(|u| u.decode()).transpose()?;

    let replaced = state
        .replacer
        .replace(
            &id,
            MeterReplacement {
                replacement_date: body.replacement_date,
                final_reading: body.final_reading,
                new_meter_name: body.new_meter_name,
                new_measurement_unit,
                device_image,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(ReplacedWaterMeterResponse {
        old_meter: WaterMeterDto::from_domain(replaced.old_meter),
        new_meter: WaterMeterDto::from_domain(replaced.new_meter),
        final_reading_recorded: replaced.final_reading_recorded,
        bootstrap_reading_id: replaced.bootstrap_reading.id,
        image_error: replaced.image_error,
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/water-meters/{meter_id}/change-owner",
    tag = "Water Meters",
    params(("meter_id" = String, Path, description = "Water meter ID")),
    request_body = ChangeOwnerRequest,
    responses(
        (status = 200, description = "Owner changed", body = ApiResponse<WaterMeterDto>),
        (status = 404, description = "Meter or account not found"),
        (status = 422, description = "Neither an account id nor new account details supplied")
    )
)]
pub async fn change_owner(
    State(state): State<MeterAppState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<ChangeOwnerRequest>,
) -> Result<Json<ApiResponse<WaterMeterDto>>, ApiError> {
    let meter = state
        .owner_changer
        .change_owner(
            &id,
            OwnerChange {
                water_account_id: body.water_account_id,
                new_account: body.new_account.map(|a| NewAccount {
                    name: a.name,
                    national_id: a.national_id,
                    notes: a.notes,
                }),
            },
        )
        .await?;
    Ok(Json(ApiResponse::success(WaterMeterDto::from_domain(
        meter,
    ))))
}
