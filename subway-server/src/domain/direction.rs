//! Travel direction at a platform.

use std::fmt;

/// Error returned when parsing an invalid direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction: expected \"N\" or \"S\"")]
pub struct InvalidDirection;

/// Direction of travel, encoded by the MTA as a trailing character on
/// GTFS stop ids (station `"127"` + north ⇒ stop id `"127N"`).
///
/// # Examples
///
/// ```
/// use subway_server::domain::Direction;
///
/// let north = Direction::parse("N").unwrap();
/// assert_eq!(north.suffix(), 'N');
/// assert!(Direction::parse("E").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
}

impl Direction {
    /// Parse a direction from its single-letter form.
    pub fn parse(s: &str) -> Result<Self, InvalidDirection> {
        match s {
            "N" => Ok(Direction::North),
            "S" => Ok(Direction::South),
            _ => Err(InvalidDirection),
        }
    }

    /// The character appended to a station id to form a platform stop id.
    pub fn suffix(&self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
        }
    }

    /// Returns the direction as a string slice.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::South => "S",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
