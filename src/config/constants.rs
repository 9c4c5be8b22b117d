//! Configuration constants.
//!
//! This module defines the fixed API paths, timing parameters, and limits
//! used throughout the engine.

use std::time::Duration;

/// Host suffix appended to the account id to form the SuiteTalk base URL.
pub const API_HOST_SUFFIX: &str = ".suitetalk.api.netsuite.com";

/// OAuth2 token exchange path (refresh_token grant).
pub const TOKEN_PATH: &str = "/services/rest/auth/oauth2/v1/token";

/// SuiteQL query endpoint. Accepts POST with `{"q": <query>}` and a
/// `Prefer: transient` header.
pub const SUITEQL_PATH: &str = "/services/rest/query/v1/suiteql";

/// Minimal record endpoint used by the rate-limit probe (HEAD request).
pub const RATE_LIMIT_PROBE_PATH: &str = "/services/rest/record/v1/account";

/// Fixed pause between a successful token refresh and the resumed request.
///
/// The 401 path skips the normal backoff schedule; this small pause avoids
/// hammering the API with the refreshed token.
pub const REFRESH_RESUME_PAUSE: Duration = Duration::from_millis(200);

/// Remaining-request count below which every response is logged at warn level.
pub const RATE_LIMIT_LOW_WATER_MARK: u64 = 10;

/// Assumed request limit when the API omits the limit header.
/// Used only for health-tier percentage math, never for throttling.
pub const RATE_LIMIT_DEFAULT_LIMIT: u64 = 100;

/// Default window size for concurrent batch execution.
pub const DEFAULT_BATCH_CONCURRENCY: usize = 3;

/// Default delay between concurrent batch windows.
pub const CONCURRENT_WINDOW_DELAY: Duration = Duration::from_millis(100);

/// Default delay between sequential batch items.
///
/// Deliberately longer than [`CONCURRENT_WINDOW_DELAY`]: sequential mode
/// exists to protect write paths against contention on a shared parent
/// record, so items get extra spacing.
pub const SEQUENTIAL_ITEM_DELAY: Duration = Duration::from_millis(250);

/// Default per-request timeout in seconds (applied at client construction).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent string for HTTP requests.
pub const DEFAULT_USER_AGENT: &str = concat!("netsuite_client/", env!("CARGO_PKG_VERSION"));

/// Maximum characters of a remote error body carried in an error message.
/// Error bodies longer than this are truncated.
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 2000;
