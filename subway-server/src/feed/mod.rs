//! MTA GTFS-realtime feed client.
//!
//! This module fetches and decodes the MTA's real-time subway feeds and
//! turns them into arrival boards and trip itineraries.
//!
//! Key characteristics of the feeds:
//! - One feed covers a fixed group of lines (A/C/E share a feed, the
//!   numbered 1–7 lines share another), so a request for several lines
//!   may need only one fetch
//! - Stop ids carry the travel direction as a trailing character
//!   (`"127N"` is the northbound platform of station `"127"`)
//! - Payloads are binary GTFS-realtime protobuf, refreshed upstream
//!   roughly every 30 seconds
//! - There is no authoritative trip-terminus field; the terminus is
//!   inferred from the trip's stop-time updates

mod arrivals;
mod client;
mod convert;
mod error;
mod itinerary;
mod routing;
mod types;

pub use arrivals::{distinct_lines, extract};
pub use client::{FeedClient, FeedConfig};
pub use convert::decode_feed;
pub use error::FeedError;
pub use itinerary::remaining_stops;
pub use routing::{FeedId, feed_for_line, feeds_for_lines};
pub use types::{FeedSnapshot, StopPrediction, Trip};
