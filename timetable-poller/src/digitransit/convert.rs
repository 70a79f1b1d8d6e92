//! Conversion from Digitransit DTOs to normalized departures.
//!
//! This is where raw per-pattern stoptimes become the flat, time-filtered,
//! sorted departure list the consumer renders.

use chrono::{DateTime, TimeZone};

use crate::config::StopConfig;
use crate::domain::{Departure, Locale, TimetableResult, clock_time};

use super::types::{ServiceDateSchedule, StopPayload};

/// Build the timetable emitted for one stop.
///
/// The configured stop name takes precedence over the upstream one.
pub fn timetable<Tz: TimeZone>(
    stop: &StopConfig,
    payload: &StopPayload,
    now: DateTime<Tz>,
    locale: Locale,
) -> TimetableResult {
    TimetableResult {
        stop: stop.id.clone(),
        name: stop.name.clone().unwrap_or_else(|| payload.name.clone()),
        busses: departures(
            &payload.stoptimes_for_service_date,
            stop.minutes_from,
            now,
            locale,
        ),
    }
}

/// Flatten per-pattern stoptimes into filtered, sorted departures.
///
/// Keeps only departures at least `minutes_from` minutes past `now`; the
/// result is ascending in `ts`, with stable order among equal timestamps.
///
/// A stoptime missing `serviceDay` or `realtimeDeparture` is skipped, as is
/// a pattern without a route short name; one bad record never fails the
/// whole response.
pub fn departures<Tz: TimeZone>(
    patterns: &[ServiceDateSchedule],
    minutes_from: i64,
    now: DateTime<Tz>,
    locale: Locale,
) -> Vec<Departure> {
    let now_ms = now.timestamp_millis();
    let horizon_ms = now_ms + minutes_from * 60 * 1000;
    let tz = now.timezone();

    let mut out = Vec::new();
    for schedule in patterns {
        let Some(line) = schedule
            .pattern
            .as_ref()
            .and_then(|pattern| pattern.route.as_ref())
            .and_then(|route| route.short_name.as_deref())
        else {
            continue;
        };

        for stoptime in &schedule.stoptimes {
            let (Some(service_day), Some(departure)) =
                (stoptime.service_day, stoptime.realtime_departure)
            else {
                continue;
            };

            // Upstream times are in seconds.
            let ts = (service_day + departure) * 1000;
            if ts < horizon_ms {
                continue;
            }
            let Some(at) = tz.timestamp_millis_opt(ts).single() else {
                continue;
            };

            let info = stoptime
                .trip
                .as_ref()
                .and_then(|trip| trip.alerts.as_deref())
                .unwrap_or(&[])
                .iter()
                .filter_map(|alert| alert.alert_header_text.as_deref())
                .collect::<Vec<_>>()
                .join(", ");

            out.push(Departure {
                line: line.to_string(),
                headsign: stoptime.headsign.clone().unwrap_or_default(),
                info,
                time: clock_time(&at),
                until: locale.until((ts - now_ms) / 1000),
                ts,
            });
        }
    }

    out.sort_by_key(|departure| departure.ts);
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::digitransit::types::{Pattern, Route, Stoptime};
    use chrono::FixedOffset;
    use proptest::prelude::*;

    const NOW_MS: i64 = 1_700_000_000_000;

    fn helsinki_now() -> DateTime<FixedOffset> {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        tz.timestamp_millis_opt(NOW_MS).single().unwrap()
    }

    prop_compose! {
        /// A stoptime near `now`, with each required field occasionally
        /// missing.
        fn arb_stoptime()(
            offset in -7_200i64..7_200,
            has_day in prop::bool::weighted(0.9),
            has_departure in prop::bool::weighted(0.9),
        ) -> Stoptime {
            Stoptime {
                service_day: has_day.then_some(NOW_MS / 1000),
                headsign: Some("Atala".to_string()),
                scheduled_departure: Some(offset),
                realtime_departure: has_departure.then_some(offset),
                trip: None,
            }
        }
    }

    fn arb_patterns() -> impl Strategy<Value = Vec<ServiceDateSchedule>> {
        prop::collection::vec(
            prop::collection::vec(arb_stoptime(), 0..12).prop_map(|stoptimes| {
                ServiceDateSchedule {
                    pattern: Some(Pattern {
                        name: None,
                        route: Some(Route {
                            short_name: Some("8".to_string()),
                        }),
                    }),
                    stoptimes,
                }
            }),
            0..4,
        )
    }

    proptest! {
        /// Every emitted departure is at or past the filtering horizon.
        #[test]
        fn emitted_departures_respect_horizon(
            patterns in arb_patterns(),
            minutes_from in 0i64..30,
        ) {
            let out = departures(&patterns, minutes_from, helsinki_now(), Locale::English);

            for departure in &out {
                prop_assert!(departure.ts >= NOW_MS + minutes_from * 60_000);
            }
        }

        /// The emitted sequence is non-decreasing in `ts`.
        #[test]
        fn emitted_departures_are_sorted(patterns in arb_patterns()) {
            let out = departures(&patterns, 0, helsinki_now(), Locale::English);

            for pair in out.windows(2) {
                prop_assert!(pair[0].ts <= pair[1].ts);
            }
        }

        /// Bad records are skipped, never amplified.
        #[test]
        fn never_emits_more_than_the_input(patterns in arb_patterns()) {
            let total: usize = patterns.iter().map(|p| p.stoptimes.len()).sum();
            let out = departures(&patterns, 0, helsinki_now(), Locale::English);

            prop_assert!(out.len() <= total);
        }
    }
}
