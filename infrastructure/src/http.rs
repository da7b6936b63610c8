//! Shared reqwest plumbing for the REST collaborators.

use monitor_domain::{Collaborator, CollaboratorError};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub(crate) const USER_AGENT: &str = concat!("team-monitor/", env!("CARGO_PKG_VERSION"));

/// Longest response body quoted in an error message.
const MAX_ERROR_BODY: usize = 200;

pub(crate) fn build_client(
    collaborator: Collaborator,
    timeout: Duration,
) -> Result<reqwest::Client, CollaboratorError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| CollaboratorError::connection(collaborator, e.to_string()))
}

pub(crate) fn map_reqwest_error(collaborator: Collaborator, e: reqwest::Error) -> CollaboratorError {
    if e.is_timeout() {
        CollaboratorError::timeout(collaborator)
    } else if e.is_decode() {
        CollaboratorError::decode(collaborator, e.to_string())
    } else {
        CollaboratorError::connection(collaborator, e.to_string())
    }
}

/// Send `request` and decode a JSON body, turning non-2xx statuses into
/// [`CollaboratorError::status`].
pub(crate) async fn send_json<T: DeserializeOwned>(
    collaborator: Collaborator,
    request: RequestBuilder,
) -> Result<T, CollaboratorError> {
    let response = request
        .send()
        .await
        .map_err(|e| map_reqwest_error(collaborator, e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CollaboratorError::status(
            collaborator,
            status.as_u16(),
            truncate(&body, MAX_ERROR_BODY),
        ));
    }

    let body = response
        .text()
        .await
        .map_err(|e| map_reqwest_error(collaborator, e))?;
    serde_json::from_str(&body).map_err(|e| CollaboratorError::decode(collaborator, e.to_string()))
}

pub(crate) fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("short", 200), "short");
    }
}
