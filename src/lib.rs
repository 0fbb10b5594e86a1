//! # sasonline-rs
//!
//! A Rust client library for the SASonline broker API (Kite Connect v3
//! compatible). It covers the authenticated session lifecycle every other
//! endpoint depends on: the browser login URL, the `request_token` →
//! `access_token` exchange, signed/authenticated requests, logout, and a
//! typed error taxonomy.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sasonline_rs::SasOnline;
//!
//! #[tokio::main]
//! async fn main() -> sasonline_rs::Result<()> {
//!     let mut client = SasOnline::new("your_api_key")?;
//!
//!     // Redirect the user here and collect the request_token from the
//!     // registered redirect URL.
//!     println!("{}", client.login_url());
//!
//!     let session = client.generate_session("request_token_here", "your_secret").await?;
//!     println!("access token: {}", session.access_token);
//!
//!     let profile = client.profile().await?;
//!     println!("logged in as {}", profile.user_id);
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Every failure is a [`SasError`] whose [`kind`](SasError::kind) is one of
//! the closed [`ErrorKind`] categories, so callers can tell transient network
//! failures from permanent token, input or permission errors.
//!
//! ## One client per user
//!
//! Each [`SasOnline`] instance represents a single authenticated user. In a
//! web application, create a client per request, restore the stored access
//! token with [`SasOnline::set_access_token`], and make calls from there.

pub mod api;
pub mod checksum;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod types;

/// Re-export the main client type at crate root for convenience.
pub use client::{Request, SasOnline};
/// Re-export the client configuration.
pub use config::ClientConfig;
/// Re-export the error types and Result alias.
pub use error::{ErrorKind, Result, SasError};
/// Re-export the session payload.
pub use types::session::SessionData;
