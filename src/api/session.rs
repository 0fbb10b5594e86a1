//! Session lifecycle endpoints.
//!
//! The login flow is:
//!
//! 1. Redirect the user to [`SasOnline::login_url`].
//! 2. Receive the `request_token` on the app's registered redirect URL.
//! 3. Exchange it with [`SasOnline::generate_session`], which stores the
//!    resulting `access_token` on the client.
//!
//! [`SasOnline::invalidate_session`] logs out and always clears the local
//! token, even when the server cannot be reached.

use serde_json::Value;

use crate::checksum;
use crate::client::{Request, SasOnline};
use crate::constants::routes;
use crate::error::{ErrorKind, Result, SasError};
use crate::types::session::{SessionData, TokenRenewal};

impl SasOnline {
    /// Build the browser login URL for this API key.
    ///
    /// No network call is made and the result only depends on the client's
    /// configuration.
    ///
    /// ```
    /// # use sasonline_rs::SasOnline;
    /// let client = SasOnline::new("my_api_key").unwrap();
    /// assert_eq!(
    ///     client.login_url(),
    ///     "https://kite.zerodha.com/connect/login?api_key=my_api_key&v=3"
    /// );
    /// ```
    pub fn login_url(&self) -> String {
        let mut url = self.login_url.clone();
        url.query_pairs_mut()
            .append_pair("api_key", self.api_key())
            .append_pair("v", &self.api_version);
        url.into()
    }

    /// Exchange a `request_token` for an access token and store it.
    ///
    /// The `api_secret` is only used to compute the checksum and is not kept.
    ///
    /// **Endpoint:** `POST /session/token`
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Token`] if the server rejects the token or checksum.
    /// - [`ErrorKind::Network`] on timeouts or connection failures.
    /// - [`ErrorKind::Input`] if any argument is empty.
    pub async fn generate_session(
        &mut self,
        request_token: &str,
        api_secret: &str,
    ) -> Result<SessionData> {
        let checksum = checksum::sign(self.api_key(), request_token, api_secret)?;
        let request = Request::post(routes::SESSION_TOKEN)
            .public()
            .param("api_key", self.api_key())
            .param("request_token", request_token)
            .param("checksum", checksum);

        let data: SessionData = self.execute(&request).await?;
        if data.access_token.is_empty() {
            return Err(SasError::api(
                ErrorKind::Data,
                "token exchange returned an empty access token",
                None,
            ));
        }

        self.set_access_token(data.access_token.as_str());
        tracing::info!(
            user_id = data.user_id.as_deref().unwrap_or("-"),
            "session established"
        );
        Ok(data)
    }

    /// Log out and clear the stored access token.
    ///
    /// The local token is cleared whatever the server says. If the revoke
    /// call fails the error is logged and returned, but the client is already
    /// logged out locally. Without an active session (no token, or an empty
    /// one) no request is made and `Ok(())` is returned.
    ///
    /// **Endpoint:** `DELETE /session/token`
    pub async fn invalidate_session(&mut self) -> Result<()> {
        let Some(token) = self.session_token().map(str::to_owned) else {
            tracing::debug!("invalidate_session called without an active session");
            self.clear_access_token();
            return Ok(());
        };

        let request = Request::delete(routes::SESSION_TOKEN)
            .param("api_key", self.api_key())
            .param("access_token", token);
        let revoked = self.execute::<Value>(&request).await;

        self.clear_access_token();

        match revoked {
            Ok(_) => {
                tracing::info!("session invalidated");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to revoke access token; local session cleared");
                Err(e)
            }
        }
    }

    /// Obtain a fresh access token from a long-lived refresh token and store
    /// it.
    ///
    /// Only available to apps with refresh-token permission.
    ///
    /// **Endpoint:** `POST /session/refresh_token`
    pub async fn renew_access_token(
        &mut self,
        refresh_token: &str,
        api_secret: &str,
    ) -> Result<TokenRenewal> {
        let checksum = checksum::sign(self.api_key(), refresh_token, api_secret)?;
        let request = Request::post(routes::SESSION_REFRESH_TOKEN)
            .public()
            .param("api_key", self.api_key())
            .param("refresh_token", refresh_token)
            .param("checksum", checksum);

        let renewal: TokenRenewal = self.execute(&request).await?;
        if renewal.access_token.is_empty() {
            return Err(SasError::api(
                ErrorKind::Data,
                "token renewal returned an empty access token",
                None,
            ));
        }

        self.set_access_token(renewal.access_token.as_str());
        tracing::info!("access token renewed");
        Ok(renewal)
    }

    /// Revoke a refresh token.
    ///
    /// **Endpoint:** `DELETE /session/refresh_token`
    pub async fn invalidate_refresh_token(&self, refresh_token: &str) -> Result<()> {
        let request = Request::delete(routes::SESSION_REFRESH_TOKEN)
            .param("api_key", self.api_key())
            .param("refresh_token", refresh_token);
        self.execute::<Value>(&request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ClientConfig;
    use crate::SasOnline;

    #[test]
    fn login_url_contains_api_key_and_version() {
        let client = SasOnline::new("abc123").unwrap();
        let url = client.login_url();
        assert!(url.starts_with("https://kite.zerodha.com/connect/login?"));
        assert!(url.contains("api_key=abc123"));
        assert!(url.contains("v=3"));
    }

    #[test]
    fn login_url_is_stable() {
        let client = SasOnline::new("abc123").unwrap();
        let first = client.login_url();
        assert_eq!(client.login_url(), first);
        assert_eq!(client.login_url(), first);
    }

    #[test]
    fn login_url_does_not_depend_on_session() {
        let mut client = SasOnline::new("abc123").unwrap();
        let before = client.login_url();
        client.set_access_token("tok");
        assert_eq!(client.login_url(), before);
    }

    #[test]
    fn login_url_escapes_api_key() {
        let client = SasOnline::new("a b&c").unwrap();
        assert!(client.login_url().contains("api_key=a+b%26c"));
    }

    #[test]
    fn login_url_uses_configured_base() {
        let config = ClientConfig::default().with_login_url("http://localhost:3000/login");
        let client = SasOnline::with_config("k", config).unwrap();
        assert_eq!(client.login_url(), "http://localhost:3000/login?api_key=k&v=3");
    }
}
