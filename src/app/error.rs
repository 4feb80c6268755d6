use reqwest::StatusCode;

// Failures surfaced by the resource client.
//
// Every variant is handed straight back to the caller; nothing here retries.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // `get_by_id` got a non-success status
    #[cfg_attr(not(test), allow(dead_code))]
    #[error("item {id} not found (status {status})")]
    NotFound { id: i64, status: StatusCode },

    // list/create/update/delete got a non-success status
    #[error("failed to {operation} item: server responded with {status}")]
    RequestFailed {
        operation: &'static str,
        status: StatusCode,
    },

    // Transport-level failure, passed through from the HTTP client
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    // A success response whose body was not the expected JSON
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

// Problems with the startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid TASKS_API_URL {url:?}: {reason}")]
    InvalidApiUrl { url: String, reason: String },
}
