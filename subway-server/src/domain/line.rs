//! Subway line identifiers.

use std::fmt;

/// Error returned when parsing an invalid line token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line id: {reason}")]
pub struct InvalidLine {
    reason: &'static str,
}

/// A subway line identifier.
///
/// May be a canonical letter or digit (`"A"`, `"7"`) or a legacy numeric
/// route code as it appears in some feeds (`"101"`, `"902"`). The raw token
/// is what gets matched against feed route ids and routed to a feed; only
/// [`Line::display_name`] applies the legacy-code normalization.
///
/// # Examples
///
/// ```
/// use subway_server::domain::Line;
///
/// let a = Line::parse("A").unwrap();
/// assert_eq!(a.as_str(), "A");
///
/// let shuttle = Line::parse("902").unwrap();
/// assert_eq!(shuttle.display_name(), "GS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line(String);

/// Legacy route codes seen in feeds and stored station lists, mapped to the
/// designation riders know. Codes absent from this table display as-is.
const DISPLAY_NAMES: &[(&str, &str)] = &[
    ("101", "1"),
    ("137", "3"),
    ("165", "6"),
    ("228", "2"),
    ("251", "5"),
    ("401", "4"),
    ("726", "7"),
    ("901", "9"),
    ("902", "GS"), // Grand Central Shuttle
    ("SI", "SI"),  // Staten Island Railway
];

impl Line {
    /// Parse a line token.
    ///
    /// The input must be 1–8 ASCII alphanumeric characters.
    pub fn parse(s: &str) -> Result<Self, InvalidLine> {
        if s.is_empty() {
            return Err(InvalidLine {
                reason: "must not be empty",
            });
        }
        if s.len() > 8 {
            return Err(InvalidLine {
                reason: "must be at most 8 characters",
            });
        }
        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidLine {
                reason: "must be ASCII letters and digits",
            });
        }
        Ok(Line(s.to_string()))
    }

    /// Returns the raw token, as used for routing and route-id matching.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The rider-facing designation for this line.
    ///
    /// Legacy numeric codes are normalized through a fixed table;
    /// everything else displays unchanged.
    pub fn display_name(&self) -> &str {
        DISPLAY_NAMES
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, name)| *name)
            .unwrap_or(self.0.as_str())
    }

    /// True when the token is made of digits only.
    pub fn is_numeric(&self) -> bool {
        self.0.bytes().all(|b| b.is_ascii_digit())
    }
}

/// Display shows the raw token; normalization is opt-in via `display_name`.
impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
