//! Transit stop timetable poller.
//!
//! A recurring poller that asks the Digitransit routing API for each
//! configured stop's daily schedule, normalizes the answer into an ordered
//! list of upcoming departures, and emits one timetable per stop per cycle
//! for a consumer to render.

pub mod config;
pub mod digitransit;
pub mod domain;
pub mod poller;
