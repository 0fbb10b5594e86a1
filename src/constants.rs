//! Constants for the SASonline (Kite Connect v3) API.
//!
//! Contains base URLs, the API version header value, the default request
//! timeout and route paths. These are used internally by
//! [`SasOnline`](crate::client::SasOnline) but are also exported for
//! advanced usage.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Base URLs
// ---------------------------------------------------------------------------

/// Base URL for the REST API.
pub const API_BASE_URL: &str = "https://api.kite.trade";

/// Browser login page the user is redirected to before a session exists.
pub const LOGIN_URL: &str = "https://kite.zerodha.com/connect/login";

// ---------------------------------------------------------------------------
// Protocol
// ---------------------------------------------------------------------------

/// API version sent in the `X-Kite-Version` header and the `v` login parameter.
pub const API_VERSION: &str = "3";

/// Name of the header carrying [`API_VERSION`] (`X-Kite-Version`).
pub const VERSION_HEADER: &str = "x-kite-version";

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(7);

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

/// Route paths used by the session and user endpoints.
pub mod routes {
    /// Token exchange (POST) and logout (DELETE).
    pub const SESSION_TOKEN: &str = "/session/token";
    /// Refresh-token renewal (POST) and revocation (DELETE).
    pub const SESSION_REFRESH_TOKEN: &str = "/session/refresh_token";
    /// Authenticated user profile.
    pub const USER_PROFILE: &str = "/user/profile";
}
