//! Client for the Digitransit routing GraphQL API.
//!
//! This module covers one fixed query shape: a stop's schedule for a
//! service date, grouped by pattern, with realtime departure offsets and
//! trip alerts.
//!
//! Key characteristics of the upstream:
//! - Stoptimes are given as second offsets from `serviceDay` (midnight of
//!   the service date), so times past midnight exceed 86400
//! - Gateways in front of the API answer outages with HTML error pages,
//!   which must be told apart from API JSON
//! - The service date may differ from the calendar date near midnight

mod client;
mod convert;
mod error;
mod query;
mod types;

pub use client::{ClientConfig, StopSource, TimetableClient, parse_stop_body};
pub use convert::{departures, timetable};
pub use error::FetchError;
pub use query::stop_schedule_query;
pub use types::{
    GraphQlResponse, Pattern, ResponseData, Route, ServiceDateSchedule, StopPayload, Stoptime,
    Trip, TripAlert,
};
