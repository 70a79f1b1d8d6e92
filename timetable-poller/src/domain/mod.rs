//! Domain types for the timetable poller.
//!
//! The normalized departure records emitted to the consumer, plus the
//! locale-aware formatting they are rendered with. These types are derived
//! data: recomputed on every poll cycle, never persisted.

mod departure;
mod locale;

pub use departure::{Departure, TimetableResult};
pub use locale::{Locale, clock_time};
