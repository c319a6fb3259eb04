//! Derived arrival records.

use chrono::{DateTime, Utc};

use super::Line;

/// One predicted arrival, derived fresh from a decoded feed per request.
///
/// The same shape serves two views: an arrivals board row (one row per
/// matching trip at a station/direction) and a trip itinerary row (one row
/// per remaining stop of a single trip). Arrivals have no lifecycle of
/// their own — they are created by extraction and discarded after
/// serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrival {
    /// Unique within a response: `"{trip_id}-{station_id}"`.
    pub id: String,

    /// The route id as reported by the feed (raw, not display-normalized).
    pub line: Line,

    /// Predicted arrival instant.
    pub time: DateTime<Utc>,

    /// Whole minutes from now until `time`, floored.
    pub minutes_away: i64,

    /// True when the prediction carries a delay of more than five minutes.
    pub delayed: bool,

    /// Name of the trip's terminus, or the headsign, or `"Unknown"`.
    pub destination: String,

    /// Feed trip identifier, used to look up the remaining itinerary.
    pub trip_id: String,

    /// Display name of the station this row is for.
    pub station_name: String,
}
