//! OAuth2 token refresh.

use log::debug;
use serde::Deserialize;

use crate::config::TOKEN_PATH;
use crate::error_handling::EngineError;
use crate::session::TokenPair;

/// Token endpoint response body.
///
/// The endpoint also returns `expires_in` and `token_type`; only the pair is
/// carried forward, expiry is discovered through 401s.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
}

/// Exchanges a refresh token for a new token pair.
///
/// Performs a single POST with a URL-encoded `grant_type=refresh_token` body.
/// No retry of its own: a failed refresh is terminal for the enclosing call,
/// so any failure here maps to [`EngineError::Auth`]. The caller persists the
/// returned pair into the session store before resuming the original request.
pub async fn refresh(
    client: &reqwest::Client,
    base_url: &str,
    client_id: &str,
    refresh_token: &str,
) -> Result<TokenPair, EngineError> {
    let url = format!("{base_url}{TOKEN_PATH}");
    let params = [
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", client_id),
    ];

    debug!("Refreshing access token");

    let response = client
        .post(&url)
        .header(reqwest::header::ACCEPT, "application/json")
        .form(&params)
        .send()
        .await
        .map_err(|e| EngineError::Auth(format!("token refresh request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(EngineError::Auth(format!(
            "token endpoint returned {}",
            status.as_u16()
        )));
    }

    let body: TokenResponse = response
        .json()
        .await
        .map_err(|e| EngineError::Auth(format!("malformed token response: {e}")))?;

    Ok(TokenPair {
        access_token: body.access_token,
        refresh_token: body.refresh_token,
    })
}
