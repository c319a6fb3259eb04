//! Request orchestration: route lines to feeds, fetch, extract.
//!
//! Each logical request is short-lived: it fans out one fetch per distinct
//! feed, joins them all (structured — nothing outlives the request), and
//! runs extraction over whichever snapshots survived. Per-feed failures
//! are logged and dropped; the request only fails when nothing at all
//! could be fetched.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::cache::CachedFeedClient;
use crate::domain::{Arrival, Direction, Line};
use crate::feed::{
    self, FeedError, FeedId, FeedSnapshot, feed_for_line, feeds_for_lines,
};
use crate::stations::StationDirectory;

/// Source of decoded feed snapshots.
///
/// The seam between orchestration and I/O: production uses the cached
/// HTTP client, tests substitute stubs.
pub trait FeedSource {
    fn fetch(
        &self,
        feed: FeedId,
    ) -> impl Future<Output = Result<Arc<FeedSnapshot>, FeedError>> + Send;
}

impl FeedSource for CachedFeedClient {
    async fn fetch(&self, feed: FeedId) -> Result<Arc<FeedSnapshot>, FeedError> {
        CachedFeedClient::fetch(self, feed).await
    }
}

impl<T: FeedSource + Send + Sync + ?Sized> FeedSource for Arc<T> {
    async fn fetch(&self, feed: FeedId) -> Result<Arc<FeedSnapshot>, FeedError> {
        (**self).fetch(feed).await
    }
}

/// The arrivals board: answers station lookups and trip itineraries.
pub struct ArrivalBoard<S> {
    feeds: S,
    stations: Arc<StationDirectory>,
}

impl<S: FeedSource + Sync> ArrivalBoard<S> {
    /// Create a board over a feed source and the station reference table.
    pub fn new(feeds: S, stations: Arc<StationDirectory>) -> Self {
        Self { feeds, stations }
    }

    /// Upcoming arrivals at a station/direction for the requested lines.
    ///
    /// Fails with `NoFeedsAvailable` when no requested line routes to a
    /// feed, or when every routed feed failed to fetch or decode. A feed
    /// that fails while others succeed is dropped with a warning; missing
    /// trains beat a failed lookup.
    pub async fn arrivals(
        &self,
        station_id: &str,
        direction: Direction,
        lines: &[Line],
    ) -> Result<Vec<Arrival>, FeedError> {
        let snapshots = self.fetch_feeds(lines).await?;

        Ok(feed::extract(
            &snapshots,
            station_id,
            direction,
            lines,
            Utc::now(),
            &self.stations,
        ))
    }

    /// Which of the station's nominal lines currently have a live,
    /// in-window prediction. A thin derivation over [`Self::arrivals`];
    /// it can never report a line that has a real arrival as missing.
    pub async fn available_lines(
        &self,
        station_id: &str,
        direction: Direction,
        possible_lines: &[Line],
    ) -> Result<Vec<Line>, FeedError> {
        let arrivals = self.arrivals(station_id, direction, possible_lines).await?;
        Ok(feed::distinct_lines(&arrivals))
    }

    /// The remaining stop-by-stop itinerary of one trip.
    ///
    /// Consults only the line's own feed; fetch and decode failures
    /// propagate as-is, and a feed that decodes without carrying the trip
    /// yields `TripNotFound`.
    pub async fn destinations(
        &self,
        trip_id: &str,
        line: &Line,
    ) -> Result<Vec<Arrival>, FeedError> {
        let feed_id =
            feed_for_line(line).ok_or_else(|| FeedError::UnroutableLine(line.to_string()))?;

        let snapshot = self.feeds.fetch(feed_id).await?;

        feed::remaining_stops(&snapshot, trip_id, line, Utc::now(), &self.stations)
    }

    /// Fetch every feed the requested lines need, concurrently.
    ///
    /// One task per distinct feed, all awaited before returning. Returns
    /// the snapshots that succeeded; errors if there are none.
    async fn fetch_feeds(&self, lines: &[Line]) -> Result<Vec<Arc<FeedSnapshot>>, FeedError> {
        let wanted = feeds_for_lines(lines);
        if wanted.is_empty() {
            warn!(?lines, "no requested line routes to any feed");
            return Err(FeedError::NoFeedsAvailable);
        }

        let results = join_all(wanted.iter().map(|&feed| self.feeds.fetch(feed))).await;

        let mut snapshots = Vec::with_capacity(results.len());
        for (feed, result) in wanted.iter().zip(results) {
            match result {
                Ok(snapshot) => {
                    debug!(feed = %feed, trips = snapshot.trips.len(), "feed fetched");
                    snapshots.push(snapshot);
                }
                Err(e) => {
                    warn!(feed = %feed, error = %e, "dropping failed feed");
                }
            }
        }

        if snapshots.is_empty() {
            return Err(FeedError::NoFeedsAvailable);
        }

        Ok(snapshots)
    }
}
