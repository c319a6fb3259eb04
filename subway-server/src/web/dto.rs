//! Data transfer objects for web requests and responses.
//!
//! Field names are camelCase to match the JSON shape the original client
//! consumes.

use serde::{Deserialize, Serialize};

use crate::domain::Arrival;
use crate::stations::StationInfo;

/// Query for the arrivals board.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalsQuery {
    /// Station id without direction suffix
    pub station_id: String,

    /// "N" or "S"
    pub direction: String,

    /// Comma-separated line ids (`"A,C,E"`)
    pub lines: String,
}

/// Query for a trip's remaining itinerary.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationsQuery {
    /// Feed trip id
    pub trip_id: String,

    /// The trip's line
    pub line: String,
}

/// One arrival row.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalDto {
    pub id: String,

    /// Route id as the feed reports it
    pub line: String,

    /// Rider-facing designation (legacy codes normalized)
    pub display_line: String,

    /// Predicted arrival, RFC 3339
    pub time: String,

    pub minutes_away: i64,
    pub delayed: bool,
    pub destination: String,
    pub trip_id: String,
    pub station_name: String,
}

impl ArrivalDto {
    pub fn from_arrival(arrival: &Arrival) -> Self {
        Self {
            id: arrival.id.clone(),
            line: arrival.line.as_str().to_string(),
            display_line: arrival.line.display_name().to_string(),
            time: arrival.time.to_rfc3339(),
            minutes_away: arrival.minutes_away,
            delayed: arrival.delayed,
            destination: arrival.destination.clone(),
            trip_id: arrival.trip_id.clone(),
            station_name: arrival.station_name.clone(),
        }
    }
}

/// Response for the arrivals board.
#[derive(Debug, Serialize)]
pub struct ArrivalsResponse {
    pub arrivals: Vec<ArrivalDto>,
}

/// Response for a trip itinerary.
#[derive(Debug, Serialize)]
pub struct DestinationsResponse {
    pub destinations: Vec<ArrivalDto>,
}

/// Response for the available-lines lookup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableLinesResponse {
    pub available_lines: Vec<String>,
}

/// One station from the reference table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    pub id: String,
    pub name: String,
    pub borough: String,
    pub lines: Vec<String>,
    pub lat: f64,
    pub lon: f64,
    pub is_terminal: bool,
}

impl StationDto {
    pub fn from_info(info: &StationInfo) -> Self {
        Self {
            id: info.id.clone(),
            name: info.name.clone(),
            borough: info.borough.clone(),
            lines: info.lines.iter().map(|l| l.as_str().to_string()).collect(),
            lat: info.lat,
            lon: info.lon,
            is_terminal: info.is_terminal,
        }
    }
}

/// Response for the station list.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationDto>,
}

/// Feed connectivity probe result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugResponse {
    pub success: bool,
    pub line: String,
    pub url: String,
    pub entity_count: usize,
    pub cached_feeds: u64,
    pub timestamp: String,
}

/// Error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
