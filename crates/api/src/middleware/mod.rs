//! Request extractors that guard admin routes.
//!
//! - [`auth::AdminUser`] -- Requires a valid administrator bearer token.

pub mod auth;
