//! Single-request execution.
//!
//! One logical request is driven by a bounded state machine: resolve tokens,
//! send, then either finish or loop back through a retry delay or a token
//! refresh. Attempts are counted per completed HTTP exchange and bounded by
//! the policy, after which every retryable branch becomes terminal.

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;

use crate::config::{MAX_ERROR_MESSAGE_LENGTH, RATE_LIMIT_LOW_WATER_MARK, REFRESH_RESUME_PAUSE};
use crate::error_handling::EngineError;
use crate::rate_limit::{self, RateLimitInfo};
use crate::request::RequestSpec;
use crate::retry::{backoff, RetryPolicy};
use crate::{auth, session::TokenPair};

use super::NetSuiteClient;

/// States of the attempt loop.
///
/// Terminal outcomes are expressed as returns from [`execute`]; every
/// retryable branch loops back to `ResolvingToken` so a mid-flight refresh by
/// a concurrent call is picked up on the next attempt.
#[derive(Debug)]
enum AttemptState {
    /// Read the current token pair from the session store.
    ResolvingToken,
    /// Issue the HTTP exchange with the resolved access token.
    Sending { access_token: String },
    /// Sleep out a computed or server-dictated delay, then re-resolve.
    AwaitingRetryDelay { delay: std::time::Duration },
    /// Exchange the refresh token after a 401, then re-resolve.
    RefreshingToken { rejected_token: String },
}

/// Executes one logical request under the given policy.
pub(super) async fn execute(
    client: &NetSuiteClient,
    spec: &RequestSpec,
    policy: &RetryPolicy,
) -> Result<Value, EngineError> {
    let url = format!("{}{}", client.base_url, spec.endpoint);
    let mut attempt: u32 = 0;
    let mut refreshed = false;
    let mut state = AttemptState::ResolvingToken;

    loop {
        state = match state {
            AttemptState::ResolvingToken => {
                let tokens = resolve_tokens(client)?;
                AttemptState::Sending {
                    access_token: tokens.access_token,
                }
            }

            AttemptState::Sending { access_token } => {
                match send(client, spec, &url, &access_token).await {
                    Err(source) => {
                        // Transport-level fault: retryable under the computed
                        // backoff schedule while attempts remain
                        attempt += 1;
                        if attempt < policy.max_attempts {
                            let delay = backoff::delay(attempt - 1, policy, None);
                            warn!(
                                "Network error for {}: {source}. Attempt {attempt}/{}. Retrying in {delay:?}",
                                spec.endpoint, policy.max_attempts
                            );
                            AttemptState::AwaitingRetryDelay { delay }
                        } else {
                            return Err(EngineError::Network {
                                attempts: attempt,
                                source,
                            });
                        }
                    }

                    Ok((status, info, body)) => {
                        log_rate_limit(&info, &spec.endpoint);

                        if status == StatusCode::TOO_MANY_REQUESTS {
                            attempt += 1;
                            if attempt < policy.max_attempts {
                                let delay =
                                    backoff::delay(attempt - 1, policy, info.retry_after_seconds);
                                warn!(
                                    "Rate limit hit for {}. Attempt {attempt}/{}. Retrying in {delay:?}",
                                    spec.endpoint, policy.max_attempts
                                );
                                AttemptState::AwaitingRetryDelay { delay }
                            } else {
                                return Err(EngineError::RateLimit { attempts: attempt });
                            }
                        } else if status.is_server_error() {
                            attempt += 1;
                            if attempt < policy.max_attempts {
                                let delay = backoff::delay(attempt - 1, policy, None);
                                warn!(
                                    "Server error {} for {}. Attempt {attempt}/{}. Retrying in {delay:?}",
                                    status.as_u16(), spec.endpoint, policy.max_attempts
                                );
                                AttemptState::AwaitingRetryDelay { delay }
                            } else {
                                return Err(EngineError::Server {
                                    status: status.as_u16(),
                                    attempts: attempt,
                                });
                            }
                        } else if status == StatusCode::UNAUTHORIZED {
                            if refreshed {
                                return Err(EngineError::Auth(
                                    "request rejected with 401 after token refresh".to_string(),
                                ));
                            }
                            refreshed = true;
                            AttemptState::RefreshingToken {
                                rejected_token: access_token,
                            }
                        } else if !status.is_success() {
                            return Err(EngineError::Remote {
                                status: status.as_u16(),
                                message: truncate_message(&body),
                            });
                        } else {
                            return decode_success(status, &body);
                        }
                    }
                }
            }

            AttemptState::AwaitingRetryDelay { delay } => {
                tokio::time::sleep(delay).await;
                AttemptState::ResolvingToken
            }

            AttemptState::RefreshingToken { rejected_token } => {
                refresh_session_tokens(client, &rejected_token).await?;
                // Skip the backoff schedule after a refresh; the fixed pause
                // avoids hammering the API with the fresh token
                tokio::time::sleep(REFRESH_RESUME_PAUSE).await;
                AttemptState::ResolvingToken
            }
        };
    }
}

/// Reads the token pair for the active session, failing fast when absent.
fn resolve_tokens(client: &NetSuiteClient) -> Result<TokenPair, EngineError> {
    let tokens = client
        .session
        .tokens()
        .ok_or_else(|| EngineError::Auth("no tokens in session".to_string()))?;
    if tokens.access_token.is_empty() {
        return Err(EngineError::Auth("access token is not available".to_string()));
    }
    if tokens.refresh_token.is_empty() {
        return Err(EngineError::Auth("refresh token is not available".to_string()));
    }
    Ok(tokens)
}

/// Issues the HTTP exchange and reads the response through to its body.
///
/// Engine defaults (bearer auth, JSON content negotiation) are applied
/// first; the spec's custom headers afterwards, so callers can override.
/// Rate-limit metadata is parsed regardless of status.
async fn send(
    client: &NetSuiteClient,
    spec: &RequestSpec,
    url: &str,
    access_token: &str,
) -> Result<(StatusCode, RateLimitInfo, String), reqwest::Error> {
    // Insert semantics, so a caller-supplied Accept or Content-Type replaces
    // the default instead of piling up a duplicate header
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    for (name, value) in &spec.headers {
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => warn!("Skipping invalid header {name:?} on {}", spec.endpoint),
        }
    }

    let mut builder = client
        .http
        .request(spec.method.as_method(), url)
        .bearer_auth(access_token)
        .headers(headers);
    if let Some(body) = &spec.body {
        builder = builder.json(body);
    }

    let response = builder.send().await?;
    let status = response.status();
    let info = rate_limit::parse(response.headers());
    let body = response.text().await?;
    Ok((status, info, body))
}

/// Refreshes the session's token pair after a 401, single-flight.
///
/// The gate serializes concurrent refreshes; once inside, a call whose
/// rejected token has already been replaced skips its own exchange and just
/// resumes with the newer pair.
async fn refresh_session_tokens(
    client: &NetSuiteClient,
    rejected_token: &str,
) -> Result<(), EngineError> {
    let _guard = client.refresh_gate.lock().await;

    let current = client
        .session
        .tokens()
        .ok_or_else(|| EngineError::Auth("no tokens in session".to_string()))?;
    if current.access_token != rejected_token {
        debug!("Token already refreshed by a concurrent call");
        return Ok(());
    }

    warn!("Access token expired, refreshing");
    let pair = auth::refresh(
        &client.http,
        &client.base_url,
        &client.client_id,
        &current.refresh_token,
    )
    .await?;

    // Persist before the original request resumes so concurrent calls
    // sharing the session observe the refreshed pair
    client.session.store(pair);
    Ok(())
}

/// Decodes a success response body.
///
/// An empty body (common on PATCH) becomes the synthetic success marker; a
/// non-empty body must parse as JSON. Neither failure mode is retried.
fn decode_success(status: StatusCode, body: &str) -> Result<Value, EngineError> {
    if body.trim().is_empty() {
        return Ok(serde_json::json!({
            "success": true,
            "message": "Operation completed successfully",
            "status": status.as_u16(),
        }));
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|e| EngineError::Decode(format!("invalid JSON in response: {e}")))?;
    if value.is_null() {
        return Err(EngineError::Decode("response body is null".to_string()));
    }
    Ok(value)
}

/// Logs the remaining allowance attached to a response.
fn log_rate_limit(info: &RateLimitInfo, endpoint: &str) {
    if let Some(remaining) = info.remaining {
        match info.limit {
            Some(limit) => debug!("{endpoint}: {remaining}/{limit} requests remaining"),
            None => debug!("{endpoint}: {remaining} requests remaining"),
        }
        if remaining < RATE_LIMIT_LOW_WATER_MARK {
            warn!("Rate limit warning: only {remaining} requests remaining");
        }
    }
}

/// Bounds a remote error body for inclusion in an error message.
fn truncate_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.len() <= MAX_ERROR_MESSAGE_LENGTH {
        trimmed.to_string()
    } else {
        let mut end = MAX_ERROR_MESSAGE_LENGTH;
        while !trimmed.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated)", &trimmed[..end])
    }
}
