//! Normalized departure records.

use serde::Serialize;

/// One upcoming departure at a stop.
///
/// Derived from upstream stoptimes on every poll cycle and never persisted;
/// the `time` and `until` strings are rendered for the instant the
/// transformation ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Departure {
    /// Route short name, e.g. "8" or "65A".
    pub line: String,

    /// Destination text shown on the vehicle.
    pub headsign: String,

    /// Alert header texts for the trip, joined with ", "; empty when the
    /// trip has no alerts.
    pub info: String,

    /// Local clock time, "H:mm" with no leading zero on the hour.
    pub time: String,

    /// Localized relative phrase, e.g. "in 5 minutes".
    pub until: String,

    /// Departure instant as epoch milliseconds.
    pub ts: i64,
}

/// Departure board for one stop, the unit emitted to the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimetableResult {
    /// Stop id as configured, without the agency prefix.
    pub stop: String,

    /// Display name: the configured override when present, otherwise the
    /// upstream stop name.
    pub name: String,

    /// Upcoming departures, ascending by `ts`.
    pub busses: Vec<Departure>,
}
