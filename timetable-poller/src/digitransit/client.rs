//! Digitransit HTTP client.
//!
//! Issues one GraphQL POST per stop and decodes the response body into a
//! normalized timetable. The client is stateless across fetches and never
//! retries; cadence decisions belong to the poll scheduler.

use chrono::Local;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};

use crate::config::StopConfig;
use crate::domain::{Locale, TimetableResult};

use super::convert::timetable;
use super::error::FetchError;
use super::query::stop_schedule_query;
use super::types::{GraphQlResponse, StopPayload};

/// Truncation length for response bodies embedded in error values.
const ERROR_BODY_LEN: usize = 500;

/// Configuration for the timetable client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Source of per-stop timetables, as the poll scheduler sees it.
///
/// The scheduler drives its source from a single task, so the returned
/// futures never cross threads; tests substitute a scripted source.
#[allow(async_fn_in_trait)]
pub trait StopSource {
    /// Fetch one stop's schedule for the current service date and
    /// normalize it.
    async fn fetch_stop(
        &self,
        base_url: &str,
        stop: &StopConfig,
        locale: Locale,
    ) -> Result<TimetableResult, FetchError>;
}

/// Digitransit schedule fetcher.
#[derive(Debug, Clone)]
pub struct TimetableClient {
    http: reqwest::Client,
}

impl TimetableClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http })
    }
}

impl StopSource for TimetableClient {
    async fn fetch_stop(
        &self,
        base_url: &str,
        stop: &StopConfig,
        locale: Locale,
    ) -> Result<TimetableResult, FetchError> {
        let date = Local::now().format("%Y%m%d").to_string();
        let payload = stop_schedule_query(&stop.id, &date)?;

        let response = self
            .http
            .post(base_url)
            .header(CONTENT_TYPE, "application/graphql")
            .header(CONTENT_LENGTH, payload.len())
            .body(payload)
            .send()
            .await?;

        let body = response.text().await?;
        let data = parse_stop_body(&body, &stop.id)?;

        Ok(timetable(stop, &data, Local::now(), locale))
    }
}

/// Classify and decode a response body.
///
/// Error pages from intermediate gateways arrive as HTML; anything opening
/// with `<` is rejected with a descriptive error before the JSON decoder
/// sees it.
pub fn parse_stop_body(body: &str, stop_id: &str) -> Result<StopPayload, FetchError> {
    if body.starts_with('<') {
        return Err(FetchError::UpstreamFormat {
            snippet: truncated(body),
        });
    }

    let response: GraphQlResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse {
            message: e.to_string(),
            body: Some(truncated(body)),
        })?;

    response
        .data
        .and_then(|data| data.stop)
        .ok_or_else(|| FetchError::InvalidResponse {
            stop_id: stop_id.to_string(),
        })
}

fn truncated(body: &str) -> String {
    body.chars().take(ERROR_BODY_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = ClientConfig::default().with_timeout(60);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        assert_eq!(ClientConfig::default().timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        assert!(TimetableClient::new(ClientConfig::default()).is_ok());
    }

    #[test]
    fn markup_body_is_upstream_format_error() {
        let err = parse_stop_body("<html>error</html>", "3522").unwrap_err();

        match err {
            FetchError::UpstreamFormat { snippet } => {
                assert!(snippet.starts_with("<html>"));
            }
            other => panic!("expected UpstreamFormat, got {other:?}"),
        }
    }

    #[test]
    fn non_json_body_is_parse_error() {
        let err = parse_stop_body("not json", "3522").unwrap_err();

        match err {
            FetchError::Parse { body, .. } => {
                assert_eq!(body.as_deref(), Some("not json"));
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn null_stop_is_invalid_response() {
        let err = parse_stop_body(r#"{"data":{"stop":null}}"#, "3522").unwrap_err();

        assert!(matches!(
            err,
            FetchError::InvalidResponse { ref stop_id } if stop_id == "3522"
        ));
    }

    #[test]
    fn missing_data_is_invalid_response() {
        for body in [r#"{}"#, r#"{"data":null}"#] {
            let err = parse_stop_body(body, "3522").unwrap_err();
            assert!(
                matches!(err, FetchError::InvalidResponse { .. }),
                "body {body}"
            );
        }
    }

    #[test]
    fn long_offending_bodies_are_truncated_in_errors() {
        let body = "x".repeat(2_000);
        let err = parse_stop_body(&body, "3522").unwrap_err();

        match err {
            FetchError::Parse { body: Some(kept), .. } => {
                assert_eq!(kept.len(), ERROR_BODY_LEN);
            }
            other => panic!("expected Parse with body, got {other:?}"),
        }
    }

    #[test]
    fn valid_body_yields_stop_payload() {
        let body = r#"{
            "data": {
                "stop": {
                    "name": "Keskustori",
                    "stoptimesForServiceDate": []
                }
            }
        }"#;

        let payload = parse_stop_body(body, "3522").unwrap();

        assert_eq!(payload.name, "Keskustori");
        assert!(payload.stoptimes_for_service_date.is_empty());
    }
}
