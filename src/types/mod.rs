//! Request and response types for the SASonline API.
//!
//! Responses arrive wrapped in a common JSON envelope ([`envelope`]); the
//! payload types here describe what sits inside its `data` field. Fields the
//! server may omit are `Option` so that schema drift does not break parsing.
//!
//! ## Organization
//!
//! - [`envelope`] — The `{"status", "data", "error_type", "message"}` wrapper
//! - [`session`] — Token exchange and renewal payloads
//! - [`user`] — User profile

pub mod envelope;
pub mod session;
pub mod user;
