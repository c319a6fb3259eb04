//! Station reference CSV loader.
//!
//! Reads the MTA's published `Stations.csv` shape (one row per platform
//! group, named columns). Rows missing an id or name are skipped; the
//! remaining columns degrade gracefully so a trimmed-down CSV still loads.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::domain::Line;

use super::directory::{StationDirectory, StationInfo};

/// Errors from loading the station reference table.
#[derive(Debug, thiserror::Error)]
pub enum StationLoadError {
    /// Could not open or read the file
    #[error("failed to read station file: {0}")]
    Io(#[from] std::io::Error),

    /// CSV structure or field types were wrong
    #[error("failed to parse station file: {0}")]
    Csv(#[from] csv::Error),

    /// The file parsed but contained no usable stations
    #[error("station file contained no stations")]
    Empty,
}

/// One row of the MTA stations export. Only the columns we consume are
/// named; everything else is ignored.
#[derive(Debug, Deserialize)]
struct StationRecord {
    #[serde(rename = "GTFS Stop ID")]
    gtfs_stop_id: String,

    #[serde(rename = "Stop Name")]
    stop_name: String,

    #[serde(rename = "Borough", default)]
    borough: String,

    #[serde(rename = "Daytime Routes", default)]
    daytime_routes: String,

    #[serde(rename = "GTFS Latitude", default)]
    latitude: f64,

    #[serde(rename = "GTFS Longitude", default)]
    longitude: f64,

    #[serde(rename = "North Direction Label", default)]
    north_label: String,

    #[serde(rename = "South Direction Label", default)]
    south_label: String,
}

impl StationRecord {
    fn into_info(self) -> StationInfo {
        let lines = self
            .daytime_routes
            .split_whitespace()
            .filter_map(|token| Line::parse(token).ok())
            .collect();

        // A blank direction label is how the source data marks "no
        // service beyond here", i.e. a terminal.
        let is_terminal = self.north_label.trim().is_empty() || self.south_label.trim().is_empty();

        StationInfo {
            id: self.gtfs_stop_id,
            name: self.stop_name,
            borough: self.borough,
            lines,
            lat: self.latitude,
            lon: self.longitude,
            is_terminal,
        }
    }
}

/// Load a station directory from a CSV file.
pub fn load_stations(path: impl AsRef<Path>) -> Result<StationDirectory, StationLoadError> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;

    let mut stations = Vec::new();
    let mut skipped = 0usize;

    for result in reader.deserialize::<StationRecord>() {
        let record = result?;
        if record.gtfs_stop_id.is_empty() || record.stop_name.is_empty() {
            skipped += 1;
            continue;
        }
        stations.push(record.into_info());
    }

    if skipped > 0 {
        warn!(skipped, "skipped station rows missing id or name");
    }

    if stations.is_empty() {
        return Err(StationLoadError::Empty);
    }

    Ok(StationDirectory::new(stations))
}
