//! Digitransit API response DTOs.
//!
//! These types map directly to the GraphQL JSON response. Leaf fields are
//! `Option` liberally because deployments omit fields rather than sending
//! nulls in many cases; the conversion layer decides what is required.

use serde::Deserialize;

/// Top-level GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse {
    pub data: Option<ResponseData>,
}

/// The `data` object of the response.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseData {
    pub stop: Option<StopPayload>,
}

/// One stop with its schedule for the requested service date.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPayload {
    /// Stop name as known upstream.
    pub name: String,

    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub url: Option<String>,

    /// Schedule entries, one per pattern serving the stop that date.
    #[serde(default)]
    pub stoptimes_for_service_date: Vec<ServiceDateSchedule>,
}

/// Stoptimes of one pattern on the service date.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceDateSchedule {
    pub pattern: Option<Pattern>,

    #[serde(default)]
    pub stoptimes: Vec<Stoptime>,
}

/// A scheduled variant of a route (direction and stop sequence).
#[derive(Debug, Clone, Deserialize)]
pub struct Pattern {
    pub name: Option<String>,
    pub route: Option<Route>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Display name of the line, e.g. "8".
    pub short_name: Option<String>,
}

/// One scheduled/realtime departure event at the stop.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stoptime {
    /// Midnight of the service date, as epoch seconds.
    pub service_day: Option<i64>,

    pub headsign: Option<String>,

    /// Scheduled departure as seconds past `service_day`.
    pub scheduled_departure: Option<i64>,

    /// Realtime-adjusted departure as seconds past `service_day`.
    pub realtime_departure: Option<i64>,

    pub trip: Option<Trip>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub service_id: Option<String>,

    /// Absent and empty both mean "no alerts".
    pub alerts: Option<Vec<TripAlert>>,
}

/// Service alert attached to a trip.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripAlert {
    pub alert_header_text: Option<String>,
}
