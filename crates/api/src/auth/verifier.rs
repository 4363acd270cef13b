//! Administrator login and bearer-token verification.

use std::sync::Arc;

use beasiswa_core::error::CoreError;
use beasiswa_db::models::admin::CreateAdmin;
use beasiswa_db::store::AdminStore;

use crate::auth::jwt::{generate_access_token, validate_token, Claims, JwtConfig};
use crate::auth::password::{hash_password, verify_password};

/// Plaintext behind the dummy hash checked for unknown usernames.
const DUMMY_PASSWORD: &str = "beasiswa-dummy-password";

/// A freshly issued session token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
}

/// Checks administrator credentials against the admin store and issues /
/// verifies stateless session tokens.
pub struct CredentialVerifier {
    admins: Arc<dyn AdminStore>,
    jwt: JwtConfig,
    dummy_hash: String,
}

impl CredentialVerifier {
    pub fn new(admins: Arc<dyn AdminStore>, jwt: JwtConfig) -> Result<Self, CoreError> {
        let dummy_hash = hash_password(DUMMY_PASSWORD)
            .map_err(|e| CoreError::Internal(format!("Failed to prepare dummy hash: {e}")))?;
        Ok(Self {
            admins,
            jwt,
            dummy_hash,
        })
    }

    /// Exchange a username and password for a session token.
    ///
    /// Unknown usernames still pay for one Argon2 verification, and both
    /// failure paths return [`CoreError::InvalidCredentials`].
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, CoreError> {
        let admin = self.admins.find_by_username(username.trim()).await?;

        let stored_hash = admin
            .as_ref()
            .map(|a| a.password_hash.as_str())
            .unwrap_or(self.dummy_hash.as_str());
        let matches = verify_password(password, stored_hash)
            .map_err(|e| CoreError::Internal(format!("Password verification error: {e}")))?;

        let admin = match admin {
            Some(admin) if matches => admin,
            _ => {
                tracing::warn!(username = %username.trim(), "Rejected admin login");
                return Err(CoreError::InvalidCredentials);
            }
        };

        let access_token = generate_access_token(&admin.username, &self.jwt)
            .map_err(|e| CoreError::Internal(format!("Token generation failed: {e}")))?;
        tracing::info!(username = %admin.username, "Admin logged in");

        Ok(IssuedToken {
            access_token,
            expires_in: self.jwt.expires_in_secs(),
        })
    }

    /// Check a bearer token. Malformed, expired and forged tokens are all
    /// [`CoreError::Unauthorized`].
    pub fn verify(&self, token: &str) -> Result<Claims, CoreError> {
        validate_token(token, &self.jwt)
            .map_err(|_| CoreError::Unauthorized("Invalid or expired token".into()))
    }

    /// Create the administrator `username` if it does not exist yet.
    ///
    /// Returns `true` when an account was created.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<bool, CoreError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(CoreError::invalid("username", "is required"));
        }
        if self.admins.find_by_username(username).await?.is_some() {
            return Ok(false);
        }

        let password_hash = hash_password(password)
            .map_err(|e| CoreError::Internal(format!("Password hashing failed: {e}")))?;
        let input = CreateAdmin {
            username: username.to_string(),
            password_hash,
        };
        match self.admins.create(&input).await {
            Ok(_) => Ok(true),
            // Another instance seeded it first.
            Err(beasiswa_db::store::StoreError::DuplicateKey(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
