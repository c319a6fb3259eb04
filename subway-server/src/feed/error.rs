//! Feed client error types.

use super::routing::FeedId;

/// Errors from fetching, decoding, or interrogating the realtime feeds.
///
/// `Http`, `Status`, and `Decode` are per-feed failures; callers
/// aggregating several feeds recover from them locally by dropping the
/// feed. Only `NoFeedsAvailable` means the whole operation produced
/// nothing to work with.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("feed {feed} request failed: {source}")]
    Http {
        feed: FeedId,
        #[source]
        source: reqwest::Error,
    },

    /// Feed endpoint returned an error status code
    #[error("feed {feed} returned HTTP {status}")]
    Status { feed: FeedId, status: u16 },

    /// Payload was not a valid GTFS-realtime message
    #[error("feed {feed} decode failed: {source}")]
    Decode {
        feed: FeedId,
        #[source]
        source: prost::DecodeError,
    },

    /// A requested line is not carried by any known feed
    #[error("line {0} is not carried by any known feed")]
    UnroutableLine(String),

    /// Every feed the request needed failed to fetch or decode,
    /// or no feed could be routed at all
    #[error("no feeds available for this request")]
    NoFeedsAvailable,

    /// The line's feed decoded fine but does not contain the trip
    #[error("trip {0} not found in its line's feed")]
    TripNotFound(String),

    /// Client construction failed (bad API key format, TLS setup, ...)
    #[error("not configured: {0}")]
    NotConfigured(String),
}
