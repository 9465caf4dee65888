//! Water meter reading API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{
    CreateReadingRequest, CreatedReadingResponse, DeletedReadingResponse, ReadingDto,
    UpdateReadingRequest, UpdatedReadingResponse,
};
use crate::application::water::{
    NewReading, ReadingCreator, ReadingDeleter, ReadingUpdate, ReadingUpdater,
};
use crate::domain::{DomainError, RepositoryProvider};
use crate::interfaces::http::common::{
    ApiResponse, PaginatedResponse, PaginationParams, ValidatedJson,
};
use crate::interfaces::http::error::ApiError;
use crate::interfaces::http::modules::water_meters::WaterMeterDto;

/// Reading handler state
#[derive(Clone)]
pub struct ReadingAppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub creator: Arc<ReadingCreator>,
    pub updater: Arc<ReadingUpdater>,
    pub deleter: Arc<ReadingDeleter>,
}

#[utoipa::path(
    post,
    path = "/api/v1/water-meters/{meter_id}/readings",
    tag = "Readings",
    params(("meter_id" = String, Path, description = "Water meter ID")),
    request_body = CreateReadingRequest,
    responses(
        (status = 200, description = "Reading recorded", body = ApiResponse<CreatedReadingResponse>),
        (status = 404, description = "Meter not found"),
        (status = 409, description = "Ordering rule violation"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn create_reading(
    State(state): State<ReadingAppState>,
    Path(meter_id): Path<String>,
    ValidatedJson(body): ValidatedJson<CreateReadingRequest>,
) -> Result<Json<ApiResponse<CreatedReadingResponse>>, ApiError> {
    let image = body.image.map(|u| u.decode()).transpose()?;

    let created = state
        .creator
        .create(
            &meter_id,
            NewReading {
                reading: body.reading,
                reading_date: body.reading_date,
                notes: body.notes,
                image,
            },
        )
        .await?;

    let image = state
        .repos
        .reading_images()
        .find_by_reading(&created.reading.id)
        .await?;

    Ok(Json(ApiResponse::success(CreatedReadingResponse {
        reading: ReadingDto::from_domain(created.reading).with_image(image),
        meter: WaterMeterDto::from_domain(created.meter),
        image_error: created.image_error,
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/water-meters/{meter_id}/readings",
    tag = "Readings",
    params(
        ("meter_id" = String, Path, description = "Water meter ID"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Reading history, newest first", body = PaginatedResponse<ReadingDto>),
        (status = 404, description = "Meter not found")
    )
)]
pub async fn list_readings(
    State(state): State<ReadingAppState>,
    Path(meter_id): Path<String>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<ReadingDto>>, ApiError> {
    state
        .repos
        .water_meters()
        .find_by_id(&meter_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "WaterMeter",
            field: "id",
            value: meter_id.clone(),
        })?;

    let readings = state.repos.readings().find_by_meter(&meter_id).await?;
    let dtos: Vec<ReadingDto> = readings.into_iter().map(ReadingDto::from_domain).collect();
    Ok(Json(PaginatedResponse::paginate(dtos, &pagination)))
}

#[utoipa::path(
    get,
    path = "/api/v1/readings/{id}",
    tag = "Readings",
    params(("id" = String, Path, description = "Reading ID")),
    responses(
        (status = 200, description = "Reading details", body = ApiResponse<ReadingDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_reading(
    State(state): State<ReadingAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReadingDto>>, ApiError> {
    let reading = state
        .repos
        .readings()
        .find_by_id(&id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "WaterMeterReading",
            field: "id",
            value: id.clone(),
        })?;
    let image = state.repos.reading_images().find_by_reading(&id).await?;
    Ok(Json(ApiResponse::success(
        ReadingDto::from_domain(reading).with_image(image),
    )))
}

#[utoipa::path(
    patch,
    path = "/api/v1/readings/{id}",
    tag = "Readings",
    params(("id" = String, Path, description = "Reading ID")),
    request_body = UpdateReadingRequest,
    responses(
        (status = 200, description = "Reading updated", body = ApiResponse<UpdatedReadingResponse>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Outside the edit window or rule violation"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn update_reading(
    State(state): State<ReadingAppState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateReadingRequest>,
) -> Result<Json<ApiResponse<UpdatedReadingResponse>>, ApiError> {
    let new_image = body.image.map(|u| u.decode()).transpose()?;

    let updated = state
        .updater
        .update(
            &id,
            ReadingUpdate {
                reading: body.reading,
                notes: body.notes,
                new_image,
                delete_image: body.delete_image,
            },
        )
        .await?;

    let image = state.repos.reading_images().find_by_reading(&id).await?;

    Ok(Json(ApiResponse::success(UpdatedReadingResponse {
        reading: ReadingDto::from_domain(updated.reading).with_image(image),
        meter: WaterMeterDto::from_domain(updated.meter),
        image_delete_error: updated.image_delete_error,
        image_upload_error: updated.image_upload_error,
    })))
}

#[utoipa::path(
    delete,
    path = "/api/v1/readings/{id}",
    tag = "Readings",
    params(("id" = String, Path, description = "Reading ID")),
    responses(
        (status = 200, description = "Reading deleted", body = ApiResponse<DeletedReadingResponse>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Not the most recent reading")
    )
)]
pub async fn delete_reading(
    State(state): State<ReadingAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedReadingResponse>>, ApiError> {
    let deleted = state.deleter.delete(&id).await?;
    Ok(Json(ApiResponse::success(DeletedReadingResponse {
        meter: WaterMeterDto::from_domain(deleted.meter),
        image_error: deleted.image_error,
    })))
}
