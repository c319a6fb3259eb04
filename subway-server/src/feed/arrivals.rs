//! Arrival extraction.
//!
//! Pure transformation from decoded feed snapshots to arrival board rows.
//! Everything here is deterministic in its inputs (`now` included), so
//! two calls over the same snapshots produce identical output.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{Arrival, Direction, Line};
use crate::stations::StationDirectory;

use super::types::{FeedSnapshot, StopPrediction, Trip};

/// Only arrivals within the next hour make the board.
const WINDOW_MINUTES: i64 = 60;

/// A prediction running more than five minutes behind counts as delayed.
const DELAY_THRESHOLD_SECS: i32 = 300;

/// Extract the matching arrivals for one station/direction from a set of
/// decoded feeds.
///
/// For each trip on a requested line, the trip's stop-time updates are
/// searched for the exact platform stop id (`station_id` + direction
/// suffix); the first match wins, since a trip does not call twice at the
/// same platform. Matches without an arrival prediction, in the past, or
/// more than an hour out contribute nothing. The result is sorted
/// ascending by minutes-away; ties keep their input order.
pub fn extract(
    feeds: &[Arc<FeedSnapshot>],
    station_id: &str,
    direction: Direction,
    lines: &[Line],
    now: DateTime<Utc>,
    stations: &StationDirectory,
) -> Vec<Arrival> {
    let now_secs = now.timestamp();
    let platform_id = format!("{station_id}{}", direction.suffix());

    let mut arrivals = Vec::new();

    for snapshot in feeds {
        for trip in &snapshot.trips {
            // Exact raw match: legacy numeric route ids must match as the
            // feed reports them, not in display-normalized form.
            let Some(line) = lines.iter().find(|l| l.as_str() == trip.route_id) else {
                continue;
            };

            let Some(stop) = trip.stops.iter().find(|s| s.stop_id == platform_id) else {
                continue;
            };
            let Some(arrival_secs) = stop.arrival else {
                continue;
            };

            let minutes_away = minutes_until(arrival_secs, now_secs);
            if minutes_away <= 0 || minutes_away > WINDOW_MINUTES {
                continue;
            }
            let Some(time) = DateTime::from_timestamp(arrival_secs, 0) else {
                continue;
            };

            arrivals.push(Arrival {
                id: format!("{}-{}", trip.trip_id, station_id),
                line: line.clone(),
                time,
                minutes_away,
                delayed: is_delayed(stop),
                destination: destination_name(trip, now_secs, stations),
                trip_id: trip.trip_id.clone(),
                station_name: stations.display_name(station_id),
            });
        }
    }

    // Stable: equal minutes keep feed order.
    arrivals.sort_by_key(|a| a.minutes_away);
    arrivals
}

/// Distinct lines appearing in an arrival list, first appearance first.
///
/// This is the whole of the available-lines derivation: a line is
/// "available" exactly when it has at least one extracted arrival, so the
/// aggregation can never hide a real arrival.
pub fn distinct_lines(arrivals: &[Arrival]) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();
    for arrival in arrivals {
        if !lines.contains(&arrival.line) {
            lines.push(arrival.line.clone());
        }
    }
    lines
}

/// Whole minutes from `now_secs` until `arrival_secs`, floored.
pub(crate) fn minutes_until(arrival_secs: i64, now_secs: i64) -> i64 {
    (arrival_secs - now_secs).div_euclid(60)
}

pub(crate) fn is_delayed(stop: &StopPrediction) -> bool {
    stop.delay.is_some_and(|d| d > DELAY_THRESHOLD_SECS)
}

/// The stop that names this trip's destination: the last stop-time
/// update, in feed order, still carrying a future arrival prediction.
///
/// The feeds have no authoritative terminus field, so this is inference.
/// Trailing updates without predictions (or whose predictions have
/// already passed) are ignored rather than treated as the terminus.
pub(crate) fn terminus_stop(trip: &Trip, now_secs: i64) -> Option<&StopPrediction> {
    trip.stops
        .iter()
        .rev()
        .find(|s| s.arrival.is_some_and(|t| t > now_secs))
}

/// Resolve a trip's destination name.
///
/// Uses the terminus stop's station through the reference table; a failed
/// lookup falls back to the trip headsign, then to `"Unknown"`.
pub(crate) fn destination_name(
    trip: &Trip,
    now_secs: i64,
    stations: &StationDirectory,
) -> String {
    let from_terminus = terminus_stop(trip, now_secs)
        .and_then(|stop| stations.name(stop.station_id()))
        .map(str::to_string);

    from_terminus
        .or_else(|| trip.headsign.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::routing::FeedId;
    use crate::stations::StationDirectory;

    fn line(s: &str) -> Line {
        Line::parse(s).unwrap()
    }

    fn stop(stop_id: &str, arrival: Option<i64>, delay: Option<i32>) -> StopPrediction {
        StopPrediction {
            stop_id: stop_id.to_string(),
            arrival,
            delay,
        }
    }

    fn trip(trip_id: &str, route_id: &str, stops: Vec<StopPrediction>) -> Trip {
        Trip {
            trip_id: trip_id.to_string(),
            route_id: route_id.to_string(),
            headsign: None,
            stops,
        }
    }

    fn snapshot(feed: FeedId, trips: Vec<Trip>) -> Arc<FeedSnapshot> {
        Arc::new(FeedSnapshot {
            feed,
            generated_at: None,
            trips,
        })
    }

    fn directory() -> StationDirectory {
        crate::stations::test_support::sample_directory()
    }

    /// Fixed "now" for deterministic tests.
    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn secs(offset: i64) -> i64 {
        1_700_000_000 + offset
    }

    #[test]
    fn emits_matching_arrival_with_derived_fields() {
        let feeds = vec![snapshot(
            FeedId::Numbered,
            vec![trip(
                "t1",
                "1",
                vec![
                    stop("127N", Some(secs(300)), Some(0)),
                    stop("101N", Some(secs(1500)), None),
                ],
            )],
        )];

        let arrivals = extract(&feeds, "127", Direction::North, &[line("1")], now(), &directory());

        assert_eq!(arrivals.len(), 1);
        let a = &arrivals[0];
        assert_eq!(a.id, "t1-127");
        assert_eq!(a.line, line("1"));
        assert_eq!(a.minutes_away, 5);
        assert!(!a.delayed);
        assert_eq!(a.destination, "Van Cortlandt Park-242 St");
        assert_eq!(a.trip_id, "t1");
        assert_eq!(a.station_name, "Times Sq-42 St");
        assert_eq!(a.time.timestamp(), secs(300));
    }

    #[test]
    fn skips_routes_not_requested() {
        let feeds = vec![snapshot(
            FeedId::Numbered,
            vec![trip("t1", "2", vec![stop("127N", Some(secs(300)), None)])],
        )];

        let arrivals = extract(&feeds, "127", Direction::North, &[line("1")], now(), &directory());
        assert!(arrivals.is_empty());
    }

    #[test]
    fn route_match_is_raw_not_display_normalized() {
        // A feed reporting the legacy "228" route id only matches a
        // request for "228", not for "2".
        let feeds = vec![snapshot(
            FeedId::Numbered,
            vec![trip("t1", "228", vec![stop("127N", Some(secs(300)), None)])],
        )];

        let miss = extract(&feeds, "127", Direction::North, &[line("2")], now(), &directory());
        assert!(miss.is_empty());

        let hit = extract(&feeds, "127", Direction::North, &[line("228")], now(), &directory());
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].line, line("228"));
    }

    #[test]
    fn direction_suffix_must_match_exactly() {
        let feeds = vec![snapshot(
            FeedId::Numbered,
            vec![
                trip("t1", "1", vec![stop("127S", Some(secs(300)), None)]),
                // No suffix convention at all: never matches.
                trip("t2", "1", vec![stop("127", Some(secs(300)), None)]),
            ],
        )];

        let arrivals = extract(&feeds, "127", Direction::North, &[line("1")], now(), &directory());
        assert!(arrivals.is_empty());

        let south = extract(&feeds, "127", Direction::South, &[line("1")], now(), &directory());
        assert_eq!(south.len(), 1);
        assert_eq!(south[0].id, "t1-127");
    }

    #[test]
    fn window_is_exclusive_zero_inclusive_sixty() {
        let cases = [
            (secs(-60), 0),  // past: dropped
            (secs(0), 0),    // now: dropped (0 minutes)
            (secs(59), 0),   // under a minute: floor 0, dropped
            (secs(60), 1),   // exactly 1 minute: kept
            (secs(3600), 1), // exactly 60 minutes: kept
            (secs(3660), 0), // 61 minutes: dropped
        ];

        for (arrival_at, expected) in cases {
            let feeds = vec![snapshot(
                FeedId::Numbered,
                vec![trip("t1", "1", vec![stop("127N", Some(arrival_at), None)])],
            )];
            let arrivals =
                extract(&feeds, "127", Direction::North, &[line("1")], now(), &directory());
            assert_eq!(
                arrivals.len(),
                expected,
                "arrival at offset {} should yield {expected} rows",
                arrival_at - secs(0)
            );
        }
    }

    #[test]
    fn delay_flag_requires_strictly_over_five_minutes() {
        for (delay, expected) in [(Some(300), false), (Some(301), true), (None, false)] {
            let feeds = vec![snapshot(
                FeedId::Numbered,
                vec![trip("t1", "1", vec![stop("127N", Some(secs(300)), delay)])],
            )];
            let arrivals =
                extract(&feeds, "127", Direction::North, &[line("1")], now(), &directory());
            assert_eq!(arrivals[0].delayed, expected, "delay {delay:?}");
        }
    }

    #[test]
    fn match_without_prediction_contributes_nothing() {
        let feeds = vec![snapshot(
            FeedId::Numbered,
            vec![trip("t1", "1", vec![stop("127N", None, Some(600))])],
        )];

        let arrivals = extract(&feeds, "127", Direction::North, &[line("1")], now(), &directory());
        assert!(arrivals.is_empty());
    }

    #[test]
    fn first_platform_match_wins() {
        // Degenerate double-stop: only the first update is considered.
        let feeds = vec![snapshot(
            FeedId::Numbered,
            vec![trip(
                "t1",
                "1",
                vec![
                    stop("127N", Some(secs(300)), None),
                    stop("127N", Some(secs(900)), None),
                ],
            )],
        )];

        let arrivals = extract(&feeds, "127", Direction::North, &[line("1")], now(), &directory());
        assert_eq!(arrivals.len(), 1);
        assert_eq!(arrivals[0].minutes_away, 5);
    }

    #[test]
    fn destination_falls_back_to_headsign_then_unknown() {
        let dir = directory();

        // Terminus station unknown to the directory, headsign present.
        let mut with_headsign = trip(
            "t1",
            "1",
            vec![
                stop("127N", Some(secs(300)), None),
                stop("Z99N", Some(secs(1200)), None),
            ],
        );
        with_headsign.headsign = Some("242 St".to_string());
        let feeds = vec![snapshot(FeedId::Numbered, vec![with_headsign])];
        let arrivals = extract(&feeds, "127", Direction::North, &[line("1")], now(), &dir);
        assert_eq!(arrivals[0].destination, "242 St");

        // Neither terminus name nor headsign.
        let feeds = vec![snapshot(
            FeedId::Numbered,
            vec![trip(
                "t2",
                "1",
                vec![
                    stop("127N", Some(secs(300)), None),
                    stop("Z99N", Some(secs(1200)), None),
                ],
            )],
        )];
        let arrivals = extract(&feeds, "127", Direction::North, &[line("1")], now(), &dir);
        assert_eq!(arrivals[0].destination, "Unknown");
    }

    #[test]
    fn terminus_ignores_trailing_stops_without_future_predictions() {
        // Last array element has no prediction; the one before it has
        // already passed. The terminus is the last future-predicted stop.
        let t = trip(
            "t1",
            "1",
            vec![
                stop("127N", Some(secs(300)), None),
                stop("101N", Some(secs(900)), None),
                stop("Z98N", Some(secs(-30)), None),
                stop("Z99N", None, None),
            ],
        );

        let terminus = terminus_stop(&t, secs(0)).unwrap();
        assert_eq!(terminus.stop_id, "101N");

        let feeds = vec![snapshot(FeedId::Numbered, vec![t])];
        let arrivals = extract(&feeds, "127", Direction::North, &[line("1")], now(), &directory());
        assert_eq!(arrivals[0].destination, "Van Cortlandt Park-242 St");
    }

    #[test]
    fn sorted_ascending_with_stable_ties() {
        let feeds = vec![snapshot(
            FeedId::Numbered,
            vec![
                trip("slow", "1", vec![stop("127N", Some(secs(1200)), None)]),
                // Same floored minute as "tie-b" below but listed first.
                trip("tie-a", "1", vec![stop("127N", Some(secs(310)), None)]),
                trip("tie-b", "1", vec![stop("127N", Some(secs(330)), None)]),
                trip("fast", "1", vec![stop("127N", Some(secs(120)), None)]),
            ],
        )];

        let arrivals = extract(&feeds, "127", Direction::North, &[line("1")], now(), &directory());
        let ids: Vec<_> = arrivals.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["fast-127", "tie-a-127", "tie-b-127", "slow-127"]);
    }

    #[test]
    fn merges_across_feeds() {
        let feeds = vec![
            snapshot(
                FeedId::Numbered,
                vec![trip("t7", "7", vec![stop("127N", Some(secs(600)), None)])],
            ),
            snapshot(
                FeedId::Ace,
                vec![trip("ta", "A", vec![stop("127N", Some(secs(300)), None)])],
            ),
        ];

        let arrivals = extract(
            &feeds,
            "127",
            Direction::North,
            &[line("7"), line("A")],
            now(),
            &directory(),
        );
        assert_eq!(arrivals.len(), 2);
        assert_eq!(arrivals[0].line, line("A"));
        assert_eq!(arrivals[1].line, line("7"));
    }

    #[test]
    fn empty_feeds_contribute_nothing() {
        let feeds = vec![snapshot(FeedId::G, vec![])];
        let arrivals = extract(&feeds, "127", Direction::North, &[line("G")], now(), &directory());
        assert!(arrivals.is_empty());
    }

    #[test]
    fn extraction_is_idempotent() {
        let feeds = vec![snapshot(
            FeedId::Numbered,
            vec![trip("t1", "1", vec![stop("127N", Some(secs(300)), Some(400))])],
        )];

        let first = extract(&feeds, "127", Direction::North, &[line("1")], now(), &directory());
        let second = extract(&feeds, "127", Direction::North, &[line("1")], now(), &directory());
        assert_eq!(first, second);
    }

    #[test]
    fn distinct_lines_preserves_first_appearance() {
        let feeds = vec![snapshot(
            FeedId::Ace,
            vec![
                trip("t1", "A", vec![stop("A32N", Some(secs(120)), None)]),
                trip("t2", "C", vec![stop("A32N", Some(secs(300)), None)]),
                trip("t3", "A", vec![stop("A32N", Some(secs(600)), None)]),
            ],
        )];

        let arrivals = extract(
            &feeds,
            "A32",
            Direction::North,
            &[line("A"), line("C")],
            now(),
            &directory(),
        );
        assert_eq!(distinct_lines(&arrivals), vec![line("A"), line("C")]);
    }

    #[test]
    fn minutes_until_floors() {
        assert_eq!(minutes_until(secs(59), secs(0)), 0);
        assert_eq!(minutes_until(secs(60), secs(0)), 1);
        assert_eq!(minutes_until(secs(119), secs(0)), 1);
        assert_eq!(minutes_until(secs(-1), secs(0)), -1);
    }
}
