//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use tracing::warn;

use crate::domain::{Direction, Line};
use crate::feed::{FeedError, FeedId};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/subway/arrivals", get(get_arrivals))
        .route("/api/subway/destinations", get(get_destinations))
        .route("/api/subway/available-lines", get(get_available_lines))
        .route("/api/subway/debug", get(get_debug))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/:id", get(get_station))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Upcoming arrivals for a station/direction and line set.
async fn get_arrivals(
    State(state): State<AppState>,
    Query(query): Query<ArrivalsQuery>,
) -> Result<Json<ArrivalsResponse>, AppError> {
    let direction = parse_direction(&query.direction)?;
    let lines = parse_lines(&query.lines)?;

    let arrivals = state
        .board
        .arrivals(&query.station_id, direction, &lines)
        .await?;

    Ok(Json(ArrivalsResponse {
        arrivals: arrivals.iter().map(ArrivalDto::from_arrival).collect(),
    }))
}

/// Remaining itinerary for one trip.
async fn get_destinations(
    State(state): State<AppState>,
    Query(query): Query<DestinationsQuery>,
) -> Result<Json<DestinationsResponse>, AppError> {
    let line = Line::parse(&query.line).map_err(|e| AppError::BadRequest {
        message: format!("invalid line {:?}: {e}", query.line),
    })?;

    let destinations = state.board.destinations(&query.trip_id, &line).await?;

    Ok(Json(DestinationsResponse {
        destinations: destinations.iter().map(ArrivalDto::from_arrival).collect(),
    }))
}

/// Which of a station's nominal lines currently have live predictions.
///
/// Degrades to an empty list on feed trouble: this endpoint exists so a
/// UI can gray out quiet lines, and a transient feed outage should read
/// as "nothing to report", not break the station view.
async fn get_available_lines(
    State(state): State<AppState>,
    Query(query): Query<ArrivalsQuery>,
) -> Result<Json<AvailableLinesResponse>, AppError> {
    let direction = parse_direction(&query.direction)?;
    let lines = parse_lines(&query.lines)?;

    let available = match state
        .board
        .available_lines(&query.station_id, direction, &lines)
        .await
    {
        Ok(lines) => lines,
        Err(e) => {
            warn!(station = %query.station_id, error = %e, "available-lines lookup failed");
            Vec::new()
        }
    };

    Ok(Json(AvailableLinesResponse {
        available_lines: available.iter().map(|l| l.as_str().to_string()).collect(),
    }))
}

/// Feed connectivity probe: fetches the A-train feed and reports basic
/// stats, for checking credentials and upstream reachability.
async fn get_debug(State(state): State<AppState>) -> Result<Json<DebugResponse>, AppError> {
    let feed = FeedId::Ace;
    let snapshot = state.feeds.fetch(feed).await?;

    Ok(Json(DebugResponse {
        success: true,
        line: "A".to_string(),
        url: state.feeds.client().url_for(feed),
        entity_count: snapshot.trips.len(),
        cached_feeds: state.feeds.cache_entry_count(),
        timestamp: Utc::now().to_rfc3339(),
    }))
}

/// All stations, sorted by borough then name.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let mut stations: Vec<StationDto> =
        state.stations.iter().map(StationDto::from_info).collect();
    stations.sort_by(|a, b| (&a.borough, &a.name).cmp(&(&b.borough, &b.name)));

    Json(StationsResponse { stations })
}

/// One station by id.
async fn get_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StationDto>, AppError> {
    let info = state.stations.get(&id).ok_or_else(|| AppError::NotFound {
        message: format!("station {id} not found"),
    })?;

    Ok(Json(StationDto::from_info(info)))
}

fn parse_direction(raw: &str) -> Result<Direction, AppError> {
    Direction::parse(raw).map_err(|e| AppError::BadRequest {
        message: format!("invalid direction {raw:?}: {e}"),
    })
}

fn parse_lines(raw: &str) -> Result<Vec<Line>, AppError> {
    let lines: Vec<Line> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Line::parse(s).map_err(|e| AppError::BadRequest {
                message: format!("invalid line {s:?}: {e}"),
            })
        })
        .collect::<Result<_, _>>()?;

    if lines.is_empty() {
        return Err(AppError::BadRequest {
            message: "at least one line is required".to_string(),
        });
    }

    Ok(lines)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<FeedError> for AppError {
    fn from(e: FeedError) -> Self {
        match e {
            // Total feed unavailability gets its own status so the
            // client can offer a retry instead of showing "no trains".
            FeedError::NoFeedsAvailable
            | FeedError::Http { .. }
            | FeedError::Status { .. }
            | FeedError::Decode { .. } => AppError::Unavailable {
                message: e.to_string(),
            },
            FeedError::TripNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            FeedError::UnroutableLine(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            FeedError::NotConfigured(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lines_splits_and_trims() {
        let lines = parse_lines("A, C ,E").unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].as_str(), "C");
    }

    #[test]
    fn parse_lines_rejects_empty_and_invalid() {
        assert!(parse_lines("").is_err());
        assert!(parse_lines(" , ,").is_err());
        assert!(parse_lines("A,B C").is_err());
    }

    #[test]
    fn parse_direction_accepts_only_n_and_s() {
        assert!(parse_direction("N").is_ok());
        assert!(parse_direction("S").is_ok());
        assert!(parse_direction("E").is_err());
    }

    #[test]
    fn feed_errors_map_to_statuses() {
        fn status_of(e: FeedError) -> StatusCode {
            match AppError::from(e) {
                AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
                AppError::NotFound { .. } => StatusCode::NOT_FOUND,
                AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }

        assert_eq!(
            status_of(FeedError::NoFeedsAvailable),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(FeedError::Status {
                feed: FeedId::Ace,
                status: 503
            }),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(FeedError::TripNotFound("t1".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(FeedError::UnroutableLine("830".into())),
            StatusCode::BAD_REQUEST
        );
    }
}
