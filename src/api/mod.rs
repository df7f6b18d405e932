use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
};
use tracing::{error, warn};

use crate::{
    ClimateError,
    engine::AggregationEngine,
    error::ValidationReason,
    models::{PrecipitationReading, SummaryRecord, TobsEntry},
    service::RangeQueryService,
    store::ObservationStore,
};

const ROUTE_DIRECTORY: &str = "Home Page<br/>\
<br/>\
Available Routes:<br/>\
<br/>\
Route: /api/v1.0/precipitation<br/>\
Description: Date and precipitation for all stations last year<br/>\
<br/>\
Route: /api/v1.0/stations<br/>\
Description: List of all unique stations<br/>\
<br/>\
Route: /api/v1.0/tobs<br/>\
Description: Date and Temperatures of most popular station last year<br/>\
<br/>\
Route: /api/v1.0/[start]<br/>\
Description: Min, max, and avg temperature from start to most recent available date<br/>\
Hint: Replace [start] in url with date in YYYY-MM-DD format<br/>\
<br/>\
Route: /api/v1.0/[start]/[end]<br/>\
Description: Min, max, and avg temperature for custom date range<br/>\
Hint: Replace [start] and [end] with date in YYYY-MM-DD format<br/>";

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RangeQueryService>,
}

impl AppState {
    pub fn new(store: Arc<dyn ObservationStore>) -> Self {
        Self {
            service: Arc::new(RangeQueryService::new(AggregationEngine::new(store))),
        }
    }
}

/// Handler failure.
///
/// Rejected dates keep the historical contract: HTTP 200 with a bare text
/// body. Anything else is a 500 whose detail only goes to the log.
#[derive(Debug)]
pub enum ApiError {
    Rejected(&'static str),
    Internal(ClimateError),
}

impl ApiError {
    fn single_start(err: ClimateError) -> Self {
        if err.is_client_error() {
            warn!("Rejected start date: {err}");
            Self::Rejected("error")
        } else {
            Self::Internal(err)
        }
    }

    fn range(err: ClimateError) -> Self {
        match err {
            ClimateError::Validation {
                reason: ValidationReason::OutOfRange,
                ..
            } => {
                warn!("Rejected date range: {err}");
                Self::Rejected("Error")
            }
            err if err.is_client_error() => {
                warn!("Rejected date range: {err}");
                Self::Rejected("error")
            }
            err => Self::Internal(err),
        }
    }
}

impl From<ClimateError> for ApiError {
    fn from(err: ClimateError) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Rejected(body) => (StatusCode::OK, body).into_response(),
            ApiError::Internal(err) => {
                error!("Request failed: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/precipitation", get(get_precipitation))
        .route("/stations", get(get_stations))
        .route("/tobs", get(get_tobs))
        .route("/{start}", get(get_start))
        .route("/{start}/{end}", get(get_start_end))
}

pub async fn index() -> Html<&'static str> {
    Html(ROUTE_DIRECTORY)
}

async fn get_precipitation(
    State(state): State<AppState>,
) -> Result<Json<Vec<PrecipitationReading>>, ApiError> {
    Ok(Json(state.service.precipitation_last_year().await?))
}

async fn get_stations(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.service.station_ids().await?))
}

async fn get_tobs(State(state): State<AppState>) -> Result<Json<Vec<TobsEntry>>, ApiError> {
    let temperatures = state.service.most_active_station_temperatures().await?;
    Ok(Json(temperatures.interleaved()))
}

async fn get_start(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<Vec<SummaryRecord>>, ApiError> {
    let range = state
        .service
        .validated_single_start(&start)
        .await
        .map_err(ApiError::single_start)?;
    Ok(Json(state.service.summary_stats(&range).await?))
}

async fn get_start_end(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<SummaryRecord>>, ApiError> {
    let range = state
        .service
        .validated_range(&start, &end)
        .await
        .map_err(ApiError::range)?;
    Ok(Json(state.service.summary_stats(&range).await?))
}
