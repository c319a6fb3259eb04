//! Application state for the web layer.

use std::sync::Arc;

use crate::board::ArrivalBoard;
use crate::cache::CachedFeedClient;
use crate::stations::StationDirectory;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Arrivals board over the cached feed client
    pub board: Arc<ArrivalBoard<Arc<CachedFeedClient>>>,

    /// Cached feed client, exposed for the debug probe
    pub feeds: Arc<CachedFeedClient>,

    /// Station reference table
    pub stations: Arc<StationDirectory>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(feeds: CachedFeedClient, stations: StationDirectory) -> Self {
        let feeds = Arc::new(feeds);
        let stations = Arc::new(stations);
        let board = Arc::new(ArrivalBoard::new(feeds.clone(), stations.clone()));

        Self {
            board,
            feeds,
            stations,
        }
    }
}
