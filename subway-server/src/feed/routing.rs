//! Line-to-feed routing.
//!
//! The MTA publishes one realtime feed per trunk group of lines. Routing
//! maps a requested line to the feed that carries it, so a station lookup
//! fetches only the feeds it actually needs.

use std::fmt;

use tracing::warn;

use crate::domain::Line;

/// One of the MTA's realtime subway feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedId {
    /// A, C, E (8th Avenue)
    Ace,
    /// B, D, F, M (6th Avenue)
    Bdfm,
    /// N, Q, R, W (Broadway)
    Nqrw,
    /// The 1–7 numbered trunk, plus shuttles and legacy numeric codes
    Numbered,
    /// J, Z (Nassau Street)
    Jz,
    /// G (Crosstown)
    G,
    /// L (14th Street–Canarsie)
    L,
}

impl FeedId {
    /// Every feed this server knows about. Bounds the fan-out of any
    /// single request.
    pub const ALL: [FeedId; 7] = [
        FeedId::Ace,
        FeedId::Bdfm,
        FeedId::Nqrw,
        FeedId::Numbered,
        FeedId::Jz,
        FeedId::G,
        FeedId::L,
    ];

    /// URL path of this feed under the Dataservice base URL.
    pub fn path(&self) -> &'static str {
        match self {
            FeedId::Ace => "nyct%2Fgtfs-ace",
            FeedId::Bdfm => "nyct%2Fgtfs-bdfm",
            FeedId::Nqrw => "nyct%2Fgtfs-nqrw",
            FeedId::Numbered => "nyct%2Fgtfs",
            FeedId::Jz => "nyct%2Fgtfs-jz",
            FeedId::G => "nyct%2Fgtfs-g",
            FeedId::L => "nyct%2Fgtfs-l",
        }
    }

    /// Short name for logs and debug output.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedId::Ace => "ace",
            FeedId::Bdfm => "bdfm",
            FeedId::Nqrw => "nqrw",
            FeedId::Numbered => "numbered",
            FeedId::Jz => "jz",
            FeedId::G => "g",
            FeedId::L => "l",
        }
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact line-to-feed table. Legacy numeric route codes and the Staten
/// Island Railway ride along on the numbered trunk feed.
const LINE_TO_FEED: &[(&str, FeedId)] = &[
    // Letter lines
    ("A", FeedId::Ace),
    ("C", FeedId::Ace),
    ("E", FeedId::Ace),
    ("B", FeedId::Bdfm),
    ("D", FeedId::Bdfm),
    ("F", FeedId::Bdfm),
    ("M", FeedId::Bdfm),
    ("N", FeedId::Nqrw),
    ("Q", FeedId::Nqrw),
    ("R", FeedId::Nqrw),
    ("W", FeedId::Nqrw),
    // Single digit lines
    ("1", FeedId::Numbered),
    ("2", FeedId::Numbered),
    ("3", FeedId::Numbered),
    ("4", FeedId::Numbered),
    ("5", FeedId::Numbered),
    ("6", FeedId::Numbered),
    ("7", FeedId::Numbered),
    // Other lines
    ("J", FeedId::Jz),
    ("Z", FeedId::Jz),
    ("G", FeedId::G),
    ("L", FeedId::L),
    // Legacy numeric route codes
    ("101", FeedId::Numbered), // 1 train
    ("137", FeedId::Numbered), // 3 train
    ("165", FeedId::Numbered), // 6 train
    ("228", FeedId::Numbered), // 2 train
    ("251", FeedId::Numbered), // 5 train
    ("401", FeedId::Numbered), // 4 train
    ("726", FeedId::Numbered), // 7 train
    ("901", FeedId::Numbered), // 9 train, if it still exists
    ("902", FeedId::Numbered), // Grand Central Shuttle
    ("SI", FeedId::Numbered),  // Staten Island Railway
];

/// Map a line to the feed that carries it.
///
/// Exact table lookup first. Unrecognized all-digit codes fall back to a
/// first-digit heuristic: 1–7 ride the numbered trunk feed, and a leading
/// 9 (shuttles, special services) is best-effort routed there too — this
/// is a guess carried over from how the legacy codes are numbered, not
/// something verified against the upstream schedule. Anything else is
/// unroutable and returns `None`.
pub fn feed_for_line(line: &Line) -> Option<FeedId> {
    if let Some((_, feed)) = LINE_TO_FEED.iter().find(|(id, _)| *id == line.as_str()) {
        return Some(*feed);
    }

    if line.is_numeric() {
        match line.as_str().as_bytes()[0] {
            b'1'..=b'7' => return Some(FeedId::Numbered),
            b'9' => return Some(FeedId::Numbered),
            _ => {}
        }
    }

    warn!(line = %line, "could not determine feed for line");
    None
}

/// The minimal set of feeds covering the requested lines.
///
/// Deduplicated, preserving the order in which feeds are first needed.
/// Unroutable lines contribute nothing; a request for `{A, C, E}` yields
/// exactly one feed.
pub fn feeds_for_lines(lines: &[Line]) -> Vec<FeedId> {
    let mut feeds = Vec::new();
    for line in lines {
        if let Some(feed) = feed_for_line(line) {
            if !feeds.contains(&feed) {
                feeds.push(feed);
            }
        }
    }
    feeds
}
