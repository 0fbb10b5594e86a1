//! User profile endpoint.

use crate::client::SasOnline;
use crate::constants::routes;
use crate::error::Result;
use crate::types::user::UserProfile;

impl SasOnline {
    /// Retrieve the profile of the logged-in user.
    ///
    /// Can also be used to validate that an access token is still active.
    ///
    /// **Endpoint:** `GET /user/profile`
    pub async fn profile(&self) -> Result<UserProfile> {
        self.get(routes::USER_PROFILE, &[]).await
    }
}
