//! Fetch error taxonomy.

/// Errors from fetching and decoding one stop's schedule.
///
/// Every variant is terminal for the current fetch of the current stop
/// only: other stops in the same cycle proceed, and the poll scheduler
/// decides when to try again.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network-level failure: connection refused, DNS, TLS, timeout
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body opens with markup instead of JSON, typically a gateway
    /// error page served in place of the API response
    #[error("upstream returned markup instead of JSON: {snippet}")]
    UpstreamFormat { snippet: String },

    /// The body is not valid JSON
    #[error("JSON parse error: {message}")]
    Parse {
        message: String,
        body: Option<String>,
    },

    /// The JSON decoded but `data.stop` is missing or null
    #[error("invalid response: no stop data for {stop_id}")]
    InvalidResponse { stop_id: String },

    /// The stop identifier cannot be embedded in a query document
    #[error("invalid stop id: {0:?}")]
    InvalidStopId(String),
}
