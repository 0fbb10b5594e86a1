//! REST API endpoint implementations.
//!
//! Each sub-module adds high-level `async` methods to
//! [`SasOnline`](crate::client::SasOnline) via `impl` blocks. All methods
//! handle parameter encoding, HTTP transport, and error mapping automatically.
//!
//! ## Usage
//!
//! ```no_run
//! use sasonline_rs::SasOnline;
//!
//! # #[tokio::main]
//! # async fn main() -> sasonline_rs::Result<()> {
//! let mut client = SasOnline::new("api_key")?;
//! client.set_access_token("stored-access-token");
//! let profile = client.profile().await?;
//! client.invalidate_session().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Endpoints | Description |
//! |---|---|---|
//! | [`session`] | 4 | Login URL, token exchange, renewal, logout |
//! | [`user`] | 1 | User profile |

pub mod session;
pub mod user;
