//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- HS256 access-token generation and validation.
//! - [`verifier`] -- [`verifier::CredentialVerifier`], which ties both to the admin store.

pub mod jwt;
pub mod password;
pub mod verifier;
