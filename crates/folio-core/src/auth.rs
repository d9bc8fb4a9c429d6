//! Authentication and admin-claim contracts.
//!
//! Sign-in itself belongs to the identity provider. The application only
//! reads the current session and its signed `admin` claim, and gates admin
//! use cases on it.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Custom claims attached to a user's token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    #[serde(default)]
    pub admin: bool,
}

/// The signed-in user as seen by the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub uid: String,
    pub email: Option<String>,
    pub claims: UserClaims,
}

impl AuthSession {
    pub fn is_admin(&self) -> bool {
        self.claims.admin
    }
}

/// Source of the current authentication state.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Returns the active session, if someone is signed in.
    async fn current_session(&self) -> Option<AuthSession>;

    /// Whether the active session carries the admin claim.
    async fn is_admin(&self) -> bool {
        self.current_session()
            .await
            .map(|session| session.is_admin())
            .unwrap_or(false)
    }
}

/// A user entry as listed by the admin-claim endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub custom_claims: UserClaims,
}

/// Result of a claim assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimUpdate {
    pub uid: String,
    pub admin: bool,
    pub message: String,
}

/// Maximum number of users returned by `list_users`.
pub const LIST_USERS_LIMIT: usize = 10;

/// Endpoints managing the `admin` custom claim.
///
/// Each call is a stateless request/response; there is no retry or
/// idempotency guarantee beyond the provider's.
#[async_trait]
pub trait AdminClaimService: Send + Sync {
    /// Sets the admin claim on a known uid.
    async fn set_admin_claim(&self, uid: &str, is_admin: bool) -> Result<ClaimUpdate>;

    /// Sets the admin claim on a user found by uid, or by email when no uid
    /// is given. A missing `is_admin` grants the claim.
    async fn set_admin_claim_by_email_or_uid(
        &self,
        uid: Option<&str>,
        email: Option<&str>,
        is_admin: Option<bool>,
    ) -> Result<ClaimUpdate>;

    /// Lists up to [`LIST_USERS_LIMIT`] users with their claims.
    async fn list_users(&self) -> Result<Vec<UserRecord>>;
}
