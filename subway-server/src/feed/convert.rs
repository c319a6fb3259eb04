//! Conversion from raw GTFS-realtime payloads to feed snapshots.
//!
//! Decoding is the only place the wire schema is visible; everything past
//! here works with [`FeedSnapshot`]. A payload that is not a protobuf
//! message at all fails with `FeedError::Decode`. Individual entities with
//! missing identity fields are skipped rather than failing the whole feed,
//! since the MTA occasionally ships partial entities alongside good ones.

use prost::Message;
use tracing::debug;

use super::error::FeedError;
use super::routing::FeedId;
use super::types::{FeedSnapshot, StopPrediction, Trip};

/// Decode one feed's raw bytes into a snapshot.
pub fn decode_feed(feed: FeedId, bytes: &[u8]) -> Result<FeedSnapshot, FeedError> {
    let message = gtfs_realtime::FeedMessage::decode(bytes)
        .map_err(|source| FeedError::Decode { feed, source })?;

    Ok(convert_message(feed, &message))
}

/// Convert a decoded protobuf message into a snapshot.
pub(crate) fn convert_message(feed: FeedId, message: &gtfs_realtime::FeedMessage) -> FeedSnapshot {
    let mut trips = Vec::with_capacity(message.entity.len());
    let mut skipped = 0usize;

    for entity in &message.entity {
        // Entities may instead carry vehicle positions or alerts; only
        // trip updates matter here.
        let Some(trip_update) = &entity.trip_update else {
            continue;
        };

        match convert_trip_update(trip_update) {
            Some(trip) => trips.push(trip),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(feed = %feed, skipped, "skipped trip updates without identity fields");
    }

    FeedSnapshot {
        feed,
        generated_at: message.header.timestamp,
        trips,
    }
}

fn convert_trip_update(update: &gtfs_realtime::TripUpdate) -> Option<Trip> {
    let trip_id = update.trip.trip_id.clone()?;
    let route_id = update.trip.route_id.clone()?;

    let headsign = update
        .trip_properties
        .as_ref()
        .and_then(|p| p.trip_headsign.clone());

    let stops = update
        .stop_time_update
        .iter()
        .filter_map(convert_stop_time)
        .collect();

    Some(Trip {
        trip_id,
        route_id,
        headsign,
        stops,
    })
}

fn convert_stop_time(
    update: &gtfs_realtime::trip_update::StopTimeUpdate,
) -> Option<StopPrediction> {
    let stop_id = update.stop_id.clone()?;
    let arrival = update.arrival.as_ref().and_then(|a| a.time);
    let delay = update.arrival.as_ref().and_then(|a| a.delay);

    Some(StopPrediction {
        stop_id,
        arrival,
        delay,
    })
}
