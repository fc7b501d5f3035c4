//! Blocking HTTP plumbing shared by the API backends.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use tracing::warn;

use crate::error::{ElicitError, Result};

/// Build a blocking client with the given timeout.
pub(crate) fn build_client(provider: &str, timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| {
            let message = format!("Failed to create HTTP client: {}", e);
            ElicitError::provider(provider, message, false)
        })
}

/// Map a transport failure to a provider error.
pub(crate) fn transport_error(provider: &str, err: reqwest::Error) -> ElicitError {
    let retryable = err.is_timeout() || err.is_connect() || err.is_request();
    ElicitError::provider(provider, format!("request failed: {}", err), retryable)
}

/// Whether an HTTP status is worth retrying.
pub(crate) fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Pass successful responses through; turn the rest into provider errors.
pub(crate) fn check_status(provider: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response.text().unwrap_or_default();
    let retryable = is_retryable_status(status);
    if retryable {
        warn!(provider, status = status.as_u16(), "retryable API error");
    }
    Err(ElicitError::provider(
        provider,
        format!("API error ({}): {}", status, error_text),
        retryable,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable_status(StatusCode::BAD_GATEWAY));
        assert!(!is_retryable_status(StatusCode::UNAUTHORIZED));
        assert!(!is_retryable_status(StatusCode::BAD_REQUEST));
    }
}
