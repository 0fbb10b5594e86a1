//! Binary that walks the SASonline login flow end to end.
//!
//! Without `SASONLINE_REQUEST_TOKEN` it prints the login URL and exits. With
//! it, the request token is exchanged for a session, the profile is fetched,
//! and the session is invalidated again.
//!
//! # Usage
//!
//! ```sh
//! export SASONLINE_API_KEY="your-api-key"
//! cargo run --bin login_check --features cli
//! # open the printed URL, log in, copy request_token from the redirect
//! export SASONLINE_API_SECRET="your-api-secret"
//! export SASONLINE_REQUEST_TOKEN="request-token"
//! cargo run --bin login_check --features cli
//! ```

use std::env;

use sasonline_rs::{SasError, SasOnline};

#[tokio::main]
async fn main() -> sasonline_rs::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let api_key = env::var("SASONLINE_API_KEY")
        .map_err(|_| SasError::InvalidArgument("set SASONLINE_API_KEY before running".into()))?;

    let mut client = SasOnline::new(api_key)?;
    client.set_session_expiry_hook(|| eprintln!("Session expired, log in again."));

    let Ok(request_token) = env::var("SASONLINE_REQUEST_TOKEN") else {
        println!("Log in at: {}", client.login_url());
        println!("Then re-run with SASONLINE_REQUEST_TOKEN and SASONLINE_API_SECRET set.");
        return Ok(());
    };
    let api_secret = env::var("SASONLINE_API_SECRET")
        .map_err(|_| SasError::InvalidArgument("set SASONLINE_API_SECRET before running".into()))?;

    let session = client.generate_session(&request_token, &api_secret).await?;
    println!("Session for {:?} (login at {:?})", session.user_id, session.login_time);

    match client.profile().await {
        Ok(profile) => println!("{profile:#?}"),
        Err(e) => eprintln!("Profile failed ({}): {e}", e.kind()),
    }

    if let Err(e) = client.invalidate_session().await {
        eprintln!("Logout failed ({}), local session cleared anyway: {e}", e.kind());
    }
    println!("Done.");

    Ok(())
}
