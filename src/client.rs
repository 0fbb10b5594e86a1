//! Core HTTP client and request executor for the SASonline API.
//!
//! The [`SasOnline`] struct is the main entry point. It owns one user's
//! session (the `api_key` and, once logged in, the `access_token`), wraps a
//! [`reqwest::Client`] configured with the API version header and timeout,
//! and turns every response into either a typed payload or a [`SasError`].
//!
//! Session endpoints (`login_url`, `generate_session`, ...) are added to
//! `SasOnline` via `impl` blocks in the [`crate::api`] module.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::ClientConfig;
use crate::constants::VERSION_HEADER;
use crate::error::{ErrorKind, Result, SasError};
use crate::types::envelope::Envelope;

/// Callback invoked when the server reports that the session has expired.
pub type SessionExpiryHook = Arc<dyn Fn() + Send + Sync>;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A single API call: method, path, ordered parameters and whether it must
/// carry the session's access token.
///
/// Parameters go into the query string for `GET`/`DELETE` and into a
/// form-encoded body for `POST`/`PUT`.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub requires_auth: bool,
}

impl Request {
    /// An authenticated request with no parameters.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
            requires_auth: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a parameter, preserving insertion order.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Append several parameters.
    pub fn params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Mark the request as not needing an access token.
    pub fn public(mut self) -> Self {
        self.requires_auth = false;
        self
    }

    fn sends_body(&self) -> bool {
        matches!(self.method, Method::POST | Method::PUT | Method::PATCH)
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for the SASonline REST API, bound to one user's session.
///
/// Each instance holds its own session state; create one per authenticated
/// user. Session mutation (`set_access_token`, `generate_session`,
/// `invalidate_session`) needs `&mut self`, while API calls only borrow the
/// client, so any number of calls may run concurrently once logged in.
///
/// # Example
///
/// ```no_run
/// use sasonline_rs::SasOnline;
///
/// # #[tokio::main]
/// # async fn main() -> sasonline_rs::Result<()> {
/// let mut client = SasOnline::new("your_api_key")?;
/// println!("Log in at: {}", client.login_url());
///
/// // After the redirect, exchange the request token.
/// let session = client.generate_session("request_token_here", "your_secret").await?;
/// println!("Logged in as {:?}", session.user_id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SasOnline {
    http: reqwest::Client,
    api_key: String,
    access_token: Option<String>,
    /// Base URL for REST requests, without a trailing slash.
    base_url: String,
    pub(crate) login_url: Url,
    pub(crate) api_version: String,
    session_expiry_hook: Option<SessionExpiryHook>,
}

impl fmt::Debug for SasOnline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SasOnline")
            .field("api_key", &self.api_key)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("login_url", &self.login_url.as_str())
            .field("api_version", &self.api_version)
            .field("session_expiry_hook", &self.session_expiry_hook.is_some())
            .finish_non_exhaustive()
    }
}

impl SasOnline {
    /// Create a client with the default configuration.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Create a client pointing at a custom base URL.
    ///
    /// Useful for testing against a sandbox or mock server.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, ClientConfig::default().with_base_url(base_url))
    }

    /// Create a client from an explicit [`ClientConfig`].
    pub fn with_config(api_key: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(SasError::InvalidArgument("api_key must not be empty".into()));
        }

        let login_url = Url::parse(&config.login_url)?;
        let http = reqwest::Client::builder()
            .default_headers(Self::default_headers(&config.api_version)?)
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            api_key,
            access_token: None,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            login_url,
            api_version: config.api_version,
            session_expiry_hook: None,
        })
    }

    /// Returns the API key this client was created with.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the current access token, if a session is active.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Whether a non-empty access token is set.
    pub fn has_session(&self) -> bool {
        self.session_token().is_some()
    }

    pub(crate) fn session_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Replace the access token, e.g. with one stored from an earlier login.
    ///
    /// The token is not validated; a bad token surfaces as a token error on
    /// the next authenticated call.
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    /// Forget the access token without contacting the server.
    pub(crate) fn clear_access_token(&mut self) {
        self.access_token = None;
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Register a callback run whenever an authenticated call fails because
    /// the server considers the session expired.
    pub fn set_session_expiry_hook<F>(&mut self, hook: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.session_expiry_hook = Some(Arc::new(hook));
    }

    // -----------------------------------------------------------------------
    // Request executor
    // -----------------------------------------------------------------------

    /// Execute a request and deserialize the `data` field of the response.
    ///
    /// Fails with [`ErrorKind::Token`] before touching the network if the
    /// request requires authentication and no access token is set. No
    /// retries are attempted.
    pub async fn execute<R: DeserializeOwned>(&self, request: &Request) -> Result<R> {
        let auth = if request.requires_auth {
            Some(self.auth_header()?)
        } else {
            None
        };

        let url = self.url(&request.path);
        tracing::debug!(method = %request.method, %url, "request");

        let mut builder = self.http.request(request.method.clone(), &url);
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        if !request.params.is_empty() {
            builder = if request.sends_body() {
                builder.form(&request.params)
            } else {
                builder.query(&request.params)
            };
        }

        let resp = builder.send().await?;
        self.handle_response(resp, request.requires_auth).await
    }

    /// Authenticated GET with query parameters.
    pub async fn get<R: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<R> {
        self.execute(&Request::get(path).params(params.iter().copied()))
            .await
    }

    /// Authenticated POST with form parameters.
    pub async fn post<R: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<R> {
        self.execute(&Request::post(path).params(params.iter().copied()))
            .await
    }

    /// Authenticated PUT with form parameters.
    pub async fn put<R: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<R> {
        self.execute(&Request::put(path).params(params.iter().copied()))
            .await
    }

    /// Authenticated DELETE with query parameters.
    pub async fn delete<R: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<R> {
        self.execute(&Request::delete(path).params(params.iter().copied()))
            .await
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Build the full URL from a path segment.
    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Default headers applied to every request.
    fn default_headers(api_version: &str) -> Result<HeaderMap> {
        let version = HeaderValue::from_str(api_version).map_err(|_| {
            SasError::InvalidArgument("api_version contains invalid header characters".into())
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(VERSION_HEADER, version);
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// `Authorization: token <api_key>:<access_token>`.
    fn auth_header(&self) -> Result<HeaderValue> {
        let token = self.session_token().ok_or_else(SasError::missing_token)?;

        let mut value = HeaderValue::from_str(&format!("token {}:{}", self.api_key, token))
            .map_err(|_| {
                SasError::InvalidArgument(
                    "api_key or access token contains invalid header characters".into(),
                )
            })?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Read a response, returning either the deserialized `data` payload or a
    /// `SasError`.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
        authenticated: bool,
    ) -> Result<R> {
        let status = resp.status();
        let bytes = resp.bytes().await?;

        let envelope = match serde_json::from_slice::<Envelope>(&bytes) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => return Err(SasError::Json(e)),
            Err(_) => {
                return Err(SasError::HttpStatus {
                    status,
                    body: String::from_utf8_lossy(&bytes).into_owned(),
                });
            }
        };

        if envelope.is_error() {
            let kind = ErrorKind::from_error_type(envelope.error_type.as_deref());
            let message = envelope
                .message
                .or(envelope.error_type)
                .unwrap_or_else(|| format!("request failed with HTTP {status}"));
            tracing::debug!(%status, %kind, %message, "API error");

            if kind == ErrorKind::Token && authenticated {
                if let Some(hook) = &self.session_expiry_hook {
                    hook();
                }
            }
            return Err(SasError::api(kind, message, Some(status)));
        }

        if !status.is_success() {
            return Err(SasError::HttpStatus {
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        serde_json::from_value(envelope.data.unwrap_or(Value::Null)).map_err(SasError::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SasOnline {
        SasOnline::with_base_url("my_api_key", "http://127.0.0.1:9/").unwrap()
    }

    #[test]
    fn rejects_empty_api_key() {
        let err = SasOnline::new("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn rejects_invalid_login_url() {
        let config = ClientConfig::default().with_login_url("not a url");
        assert!(SasOnline::with_config("key", config).is_err());
    }

    #[test]
    fn trims_trailing_slash_and_joins_paths() {
        let c = client();
        assert_eq!(c.base_url(), "http://127.0.0.1:9");
        assert_eq!(c.url("/session/token"), "http://127.0.0.1:9/session/token");
        assert_eq!(c.url("user/profile"), "http://127.0.0.1:9/user/profile");
    }

    #[test]
    fn starts_without_session() {
        let c = client();
        assert_eq!(c.api_key(), "my_api_key");
        assert!(c.access_token().is_none());
    }

    #[test]
    fn auth_header_requires_token() {
        let mut c = client();
        assert!(!c.has_session());
        assert_eq!(c.auth_header().unwrap_err().kind(), ErrorKind::Token);

        c.set_access_token("");
        assert!(!c.has_session());
        assert_eq!(c.auth_header().unwrap_err().kind(), ErrorKind::Token);

        c.set_access_token("secret_token");
        assert!(c.has_session());
        let value = c.auth_header().unwrap();
        assert_eq!(value.to_str().unwrap(), "token my_api_key:secret_token");
        assert!(value.is_sensitive());
    }

    #[test]
    fn clones_own_their_session() {
        let mut a = client();
        a.set_access_token("tok_a");
        let mut b = a.clone();
        b.set_access_token("tok_b");
        assert_eq!(a.access_token(), Some("tok_a"));
        assert_eq!(b.access_token(), Some("tok_b"));
    }

    #[test]
    fn debug_redacts_access_token() {
        let mut c = client();
        c.set_access_token("super_secret");
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("super_secret"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn request_builder_keeps_param_order() {
        let req = Request::post("/session/token")
            .public()
            .param("api_key", "k")
            .params([("request_token", "r"), ("checksum", "c")]);
        assert!(!req.requires_auth);
        assert!(req.sends_body());
        let keys: Vec<_> = req.params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["api_key", "request_token", "checksum"]);
        assert!(!Request::delete("/session/token").sends_body());
    }

    #[tokio::test]
    async fn execute_without_token_fails_fast() {
        let c = client();
        let err = c
            .execute::<Value>(&Request::get("/user/profile"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Token);
        assert_eq!(err.status(), None);
    }
}
