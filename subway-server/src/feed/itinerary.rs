//! Remaining itinerary for a single trip.
//!
//! Given a trip id and its line's decoded feed, produce one row per
//! remaining stop. Unlike the arrivals board there is no upper time
//! bound: a rider on the train wants the whole rest of the run.

use chrono::{DateTime, Utc};

use crate::domain::{Arrival, Line};
use crate::stations::StationDirectory;

use super::arrivals::{destination_name, is_delayed, minutes_until};
use super::error::FeedError;
use super::types::FeedSnapshot;

/// Build the remaining stop-by-stop itinerary for one trip.
///
/// The trip is located by exact id; `TripNotFound` if the feed decoded
/// fine but does not carry it. The destination is computed once from the
/// trip's terminus (same rule the arrivals board uses) and shared by
/// every row. Rows are emitted for strictly-future predictions only and
/// sorted ascending by minutes-away.
pub fn remaining_stops(
    snapshot: &FeedSnapshot,
    trip_id: &str,
    line: &Line,
    now: DateTime<Utc>,
    stations: &StationDirectory,
) -> Result<Vec<Arrival>, FeedError> {
    let now_secs = now.timestamp();

    let Some(trip) = snapshot.trips.iter().find(|t| t.trip_id == trip_id) else {
        return Err(FeedError::TripNotFound(trip_id.to_string()));
    };

    // One destination for the whole itinerary.
    let destination = destination_name(trip, now_secs, stations);

    let mut entries = Vec::new();
    for stop in &trip.stops {
        let Some(arrival_secs) = stop.arrival else {
            continue;
        };

        let minutes_away = minutes_until(arrival_secs, now_secs);
        if minutes_away <= 0 {
            continue;
        }
        let Some(time) = DateTime::from_timestamp(arrival_secs, 0) else {
            continue;
        };

        let station_id = stop.station_id();
        entries.push(Arrival {
            id: format!("{trip_id}-{station_id}"),
            line: line.clone(),
            time,
            minutes_away,
            delayed: is_delayed(stop),
            destination: destination.clone(),
            trip_id: trip_id.to_string(),
            station_name: stations.display_name(station_id),
        });
    }

    entries.sort_by_key(|e| e.minutes_away);
    Ok(entries)
}
