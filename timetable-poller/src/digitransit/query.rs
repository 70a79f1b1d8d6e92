//! GraphQL query construction.
//!
//! The query shape is fixed to one schema: a stop's daily schedule grouped
//! by pattern, with realtime stoptimes and trip alerts.

use super::error::FetchError;

/// Agency prefix for stop ids in the upstream feed.
const AGENCY_PREFIX: &str = "tampere";

/// Build the schedule query for one stop and service date.
///
/// Pure; performs no I/O. The date must already be formatted as an 8-digit
/// `YYYYMMDD` string.
///
/// # Examples
///
/// ```
/// use timetable_poller::digitransit::stop_schedule_query;
///
/// let query = stop_schedule_query("1234", "20240101").unwrap();
/// assert!(query.contains(r#"stop(id: "tampere:1234")"#));
/// assert!(query.contains(r#"stoptimesForServiceDate(date:"20240101")"#));
/// ```
pub fn stop_schedule_query(stop_id: &str, date: &str) -> Result<String, FetchError> {
    if !is_valid_stop_id(stop_id) {
        return Err(FetchError::InvalidStopId(stop_id.to_string()));
    }

    Ok(format!(
        r#"{{
  stop(id: "{AGENCY_PREFIX}:{stop_id}") {{
    name
    lat
    lon
    url
    stoptimesForServiceDate(date:"{date}") {{
      pattern {{
        name
        route {{
          shortName
        }}
      }}
      stoptimes {{
        serviceDay
        headsign
        scheduledDeparture
        realtimeDeparture
        trip {{
          serviceId
          alerts {{
            alertHeaderText
          }}
        }}
      }}
    }}
  }}
}}"#
    ))
}

/// Upstream identifiers are expected to be well-formed; anything that could
/// break out of the quoted id string is rejected outright rather than
/// escaped.
fn is_valid_stop_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':'))
}
