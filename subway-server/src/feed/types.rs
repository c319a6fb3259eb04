//! Decoded feed snapshot types.
//!
//! These are the strongly-typed form of one feed's GTFS-realtime payload,
//! reduced to the fields arrival extraction needs. Shape problems are
//! caught while building these at the decode boundary, so everything
//! downstream can rely on trips having identity fields.

use super::routing::FeedId;

/// One decoded feed at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    /// Which feed this snapshot came from.
    pub feed: FeedId,

    /// Feed generation time (POSIX seconds), when the header carried one.
    pub generated_at: Option<u64>,

    /// Trip updates, in feed order.
    pub trips: Vec<Trip>,
}

impl FeedSnapshot {
    /// An empty snapshot for a feed (no trips). A feed with zero entities
    /// is valid and contributes nothing.
    pub fn empty(feed: FeedId) -> Self {
        Self {
            feed,
            generated_at: None,
            trips: Vec::new(),
        }
    }
}

/// One scheduled vehicle run and its predicted stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    /// Feed-unique trip identifier.
    pub trip_id: String,

    /// Route id as the feed reports it (may be a legacy numeric code).
    pub route_id: String,

    /// Rider-facing headsign, when the feed provides one.
    pub headsign: Option<String>,

    /// Stop-time updates in feed order (upstream promises stop order).
    pub stops: Vec<StopPrediction>,
}

/// A single stop-time update.
#[derive(Debug, Clone, PartialEq)]
pub struct StopPrediction {
    /// Platform stop id, direction suffix included (`"127N"`).
    pub stop_id: String,

    /// Predicted arrival, POSIX seconds. Absent when the feed has no
    /// arrival prediction for this stop.
    pub arrival: Option<i64>,

    /// Delay versus schedule in seconds, when reported.
    pub delay: Option<i32>,
}

impl StopPrediction {
    /// The stop id with its trailing direction character removed, i.e.
    /// the station id used for reference lookups.
    pub fn station_id(&self) -> &str {
        strip_direction_suffix(&self.stop_id)
    }
}

/// Remove the trailing direction character from a platform stop id.
///
/// Stop ids are ASCII; a one-character id (or an empty one) is returned
/// unchanged rather than stripped to nothing.
pub(crate) fn strip_direction_suffix(stop_id: &str) -> &str {
    if stop_id.len() >= 2 && stop_id.is_char_boundary(stop_id.len() - 1) {
        &stop_id[..stop_id.len() - 1]
    } else {
        stop_id
    }
}
