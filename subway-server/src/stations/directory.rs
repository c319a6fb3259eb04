//! Immutable station id → info lookup.

use std::collections::HashMap;

use crate::domain::Line;

/// Reference data for one station.
#[derive(Debug, Clone, PartialEq)]
pub struct StationInfo {
    /// GTFS station id, without any direction suffix (`"127"`, `"A32"`).
    pub id: String,

    /// Display name (`"Times Sq-42 St"`).
    pub name: String,

    /// Borough abbreviation (`"M"`, `"Bk"`, `"Q"`, `"Bx"`, `"SI"`).
    pub borough: String,

    /// Lines serving the station during the day.
    pub lines: Vec<Line>,

    /// Geographic position.
    pub lat: f64,
    pub lon: f64,

    /// True when a line ends here; lets a UI suppress the direction
    /// toggle for the dead-end direction.
    pub is_terminal: bool,
}

/// Station id → info table, loaded once at process start.
///
/// Deliberately has no interior mutability: concurrent lookups from
/// request handlers need no locks, and there is no refresh path.
#[derive(Debug, Default)]
pub struct StationDirectory {
    by_id: HashMap<String, StationInfo>,
}

impl StationDirectory {
    /// Build a directory from station records. Later duplicates of an id
    /// replace earlier ones.
    pub fn new(stations: impl IntoIterator<Item = StationInfo>) -> Self {
        let by_id = stations.into_iter().map(|s| (s.id.clone(), s)).collect();
        Self { by_id }
    }

    /// Look up a station by id.
    pub fn get(&self, id: &str) -> Option<&StationInfo> {
        self.by_id.get(id)
    }

    /// Look up a station's name by id.
    pub fn name(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(|s| s.name.as_str())
    }

    /// Display name for a station id, with a generic fallback for ids
    /// missing from the reference data.
    pub fn display_name(&self, id: &str) -> String {
        match self.name(id) {
            Some(name) => name.to_string(),
            None => format!("Station {id}"),
        }
    }

    /// Number of stations in the table.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// True when the table holds no stations.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Iterate over all stations, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &StationInfo> {
        self.by_id.values()
    }
}
