//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::BuildingId;
use crate::geofence::{BuildingCollection, BuildingSet, evaluate};
use crate::routes::{InvalidInputError, RankedRoutes, RoutePipeline};

use super::dto::*;
use super::state::AppState;

/// Largest `limit` a client may request.
const MAX_ROUTE_LIMIT: usize = 10;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/routes/rank", post(rank_routes))
        .route("/api/geofence/classify", post(classify_position))
        .route("/api/buildings", get(list_buildings).put(replace_buildings))
        .route("/api/buildings/:id", get(get_building))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Rank and bound a directions-provider response.
async fn rank_routes(
    State(state): State<AppState>,
    Query(query): Query<RankRoutesQuery>,
    body: Bytes,
) -> Result<Json<RankedRoutes>, AppError> {
    let response: Value = serde_json::from_slice(&body).map_err(|e| AppError::BadRequest {
        message: format!("Invalid JSON: {e}"),
    })?;

    let mut pipeline = RoutePipeline::new(&state.routes);
    if let Some(limit) = query.limit {
        pipeline = pipeline.with_max_routes(limit.clamp(1, MAX_ROUTE_LIMIT));
    }

    let ranked = pipeline.run(response)?;
    Ok(Json(ranked))
}

/// Classify one location tick against the current building set.
async fn classify_position(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ClassifyResponse>, AppError> {
    let req: ClassifyRequest = serde_json::from_slice(&body).map_err(|e| AppError::BadRequest {
        message: format!("Invalid request: {e}"),
    })?;

    let snapshot = state.buildings.snapshot();
    let frame = evaluate(&req.previous, req.position, &snapshot.buildings);
    let building = frame
        .state
        .building()
        .and_then(|id| snapshot.buildings.get(id));

    Ok(Json(ClassifyResponse::from_frame(
        frame,
        building,
        snapshot.revision,
    )))
}

/// List the current building set.
async fn list_buildings(State(state): State<AppState>) -> Json<BuildingsResponse> {
    let snapshot = state.buildings.snapshot();

    Json(BuildingsResponse {
        revision: snapshot.revision,
        buildings: snapshot
            .buildings
            .buildings()
            .map(BuildingView::from_building)
            .collect(),
        skipped: snapshot.buildings.skipped().cloned().collect(),
    })
}

/// Details of one building, for the inspect popup.
async fn get_building(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BuildingView>, AppError> {
    let snapshot = state.buildings.snapshot();
    let id = BuildingId::new(id);

    snapshot
        .buildings
        .get(&id)
        .map(|b| Json(BuildingView::from_building(b)))
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown building: {id}"),
        })
}

/// Replace the building set with a new GeoJSON collection.
async fn replace_buildings(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ReplaceBuildingsResponse>, AppError> {
    let collection: BuildingCollection =
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest {
            message: format!("Invalid GeoJSON: {e}"),
        })?;

    let set = BuildingSet::from_collection(&collection);
    let loaded = set.len();
    let skipped = set.skipped().count();
    let revision = state.buildings.replace(set);

    Ok(Json(ReplaceBuildingsResponse {
        revision,
        loaded,
        skipped,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<InvalidInputError> for AppError {
    fn from(e: InvalidInputError) -> Self {
        AppError::BadRequest {
            message: format!("could not compute routes: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, %message, "request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
