use thiserror::Error;

/// Why a data source had to fall back to its default value.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP client could not be built: {0}")]
    Client(String),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}: {body}")]
    Status { url: String, status: reqwest::StatusCode, body: String },

    #[error("Failed to parse response from {url}: {reason}")]
    Parse { url: String, reason: String },

    #[error("Failed to decode image from {url}: {reason}")]
    Decode { url: String, reason: String },
}

/// Result of asking a best-effort data source for a value.
///
/// Both variants carry a usable value; `Fallback` additionally records why the
/// documented default was substituted, so callers can tell a real answer from
/// an unreachable service.
#[derive(Debug)]
pub enum Fetched<T> {
    Live(T),
    Fallback { value: T, reason: FetchError },
}

impl<T> Fetched<T> {
    /// Keep the value from `result`, or substitute `fallback` and log why.
    pub fn from_result(result: Result<T, FetchError>, fallback: impl FnOnce() -> T) -> Self {
        match result {
            Ok(value) => Fetched::Live(value),
            Err(reason) => {
                tracing::warn!(error = %reason, "falling back to default value");
                Fetched::Fallback { value: fallback(), reason }
            }
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Fetched::Live(value) | Fetched::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Fetched::Live(value) | Fetched::Fallback { value, .. } => value,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Fetched::Live(_))
    }

    pub fn reason(&self) -> Option<&FetchError> {
        match self {
            Fetched::Live(_) => None,
            Fetched::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// Shorten a response body for inclusion in an error message.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
