//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::water::{
    ImageOps, ReadingCreator, ReadingDeleter, ReadingUpdater, WaterMeterOwnerChanger,
    WaterMeterReplacer,
};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::modules::{
    communities, health, readings, water_accounts, water_meters,
};

/// Unified state for all routes; axum extracts the per-module state via
/// `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub repos: Arc<dyn RepositoryProvider>,
    pub creator: Arc<ReadingCreator>,
    pub updater: Arc<ReadingUpdater>,
    pub deleter: Arc<ReadingDeleter>,
    pub replacer: Arc<WaterMeterReplacer>,
    pub owner_changer: Arc<WaterMeterOwnerChanger>,
    pub images: ImageOps,
    pub started_at: Arc<Instant>,
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<AppState> for water_accounts::AccountAppState {
    fn from_ref(s: &AppState) -> Self {
        water_accounts::AccountAppState {
            repos: Arc::clone(&s.repos),
        }
    }
}

impl FromRef<AppState> for communities::CommunityAppState {
    fn from_ref(s: &AppState) -> Self {
        communities::CommunityAppState {
            repos: Arc::clone(&s.repos),
        }
    }
}

impl FromRef<AppState> for water_meters::MeterAppState {
    fn from_ref(s: &AppState) -> Self {
        water_meters::MeterAppState {
            repos: Arc::clone(&s.repos),
            replacer: Arc::clone(&s.replacer),
            owner_changer: Arc::clone(&s.owner_changer),
            images: s.images.clone(),
        }
    }
}

impl FromRef<AppState> for readings::ReadingAppState {
    fn from_ref(s: &AppState) -> Self {
        readings::ReadingAppState {
            repos: Arc::clone(&s.repos),
            creator: Arc::clone(&s.creator),
            updater: Arc::clone(&s.updater),
            deleter: Arc::clone(&s.deleter),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Aquameter API",
        description = "Community water-utility accounts, meters, readings and excess-consumption tracking"
    ),
    paths(
        health::handlers::health_check,
        water_accounts::handlers::create_account,
        water_accounts::handlers::list_accounts,
        water_accounts::handlers::get_account,
        communities::handlers::create_community,
        communities::handlers::list_communities,
        communities::handlers::get_community,
        communities::handlers::create_zone,
        communities::handlers::list_zones,
        water_meters::handlers::create_meter,
        water_meters::handlers::list_meters,
        water_meters::handlers::get_meter,
        water_meters::handlers::replace_meter,
        water_meters::handlers::change_owner,
        readings::handlers::create_reading,
        readings::handlers::list_readings,
        readings::handlers::get_reading,
        readings::handlers::update_reading,
        readings::handlers::delete_reading,
    ),
    components(schemas(
        health::handlers::HealthResponse,
        health::handlers::ComponentHealth,
        water_accounts::dto::CreateWaterAccountRequest,
        water_accounts::dto::WaterAccountDto,
        communities::dto::CreateCommunityRequest,
        communities::dto::CommunityDto,
        communities::dto::CreateCommunityZoneRequest,
        communities::dto::CommunityZoneDto,
        water_meters::dto::CreateWaterMeterRequest,
        water_meters::dto::WaterPointRequest,
        water_meters::dto::WaterPointDto,
        water_meters::dto::WaterMeterDto,
        water_meters::dto::CreatedWaterMeterResponse,
        water_meters::dto::ReplaceWaterMeterRequest,
        water_meters::dto::ReplacedWaterMeterResponse,
        water_meters::dto::ChangeOwnerRequest,
        water_meters::dto::NewAccountRequest,
        readings::dto::CreateReadingRequest,
        readings::dto::UpdateReadingRequest,
        readings::dto::ReadingDto,
        readings::dto::ReadingImageDto,
        readings::dto::CreatedReadingResponse,
        readings::dto::UpdatedReadingResponse,
        readings::dto::DeletedReadingResponse,
        crate::interfaces::http::common::ImageUpload,
        crate::interfaces::http::common::PaginationParams,
    ))
)]
struct ApiDoc;

/// Build the API router with all routes, layers and documentation.
pub fn create_api_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/api/v1/water-accounts",
            post(water_accounts::create_account).get(water_accounts::list_accounts),
        )
        .route("/api/v1/water-accounts/{id}", get(water_accounts::get_account))
        .route(
            "/api/v1/communities",
            post(communities::create_community).get(communities::list_communities),
        )
        .route("/api/v1/communities/{id}", get(communities::get_community))
        .route(
            "/api/v1/communities/{id}/zones",
            post(communities::create_zone).get(communities::list_zones),
        )
        .route(
            "/api/v1/water-meters",
            post(water_meters::create_meter).get(water_meters::list_meters),
        )
        .route(
            "/api/v1/water-meters/{meter_id}",
            get(water_meters::get_meter),
        )
        .route(
            "/api/v1/water-meters/{meter_id}/replace",
            post(water_meters::replace_meter),
        )
        .route(
            "/api/v1/water-meters/{meter_id}/change-owner",
            post(water_meters::change_owner),
        )
        .route(
            "/api/v1/water-meters/{meter_id}/readings",
            post(readings::create_reading).get(readings::list_readings),
        )
        .route(
            "/api/v1/readings/{id}",
            get(readings::get_reading)
                .patch(readings::update_reading)
                .delete(readings::delete_reading),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
