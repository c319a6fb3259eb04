//! Static station reference data.
//!
//! Maps a GTFS station id to its display name, borough, served lines, and
//! terminal flag. The table is built once at startup and never mutated, so
//! it is shared by plain reference with no synchronization.

mod directory;
mod load;

pub use directory::{StationDirectory, StationInfo};
pub use load::{StationLoadError, load_stations};

#[cfg(test)]
pub(crate) use directory::test_support;
