//! Admin gate and admin-claim management.

use folio_core::auth::{AdminClaimService, AuthProvider, AuthSession, ClaimUpdate, UserRecord};
use folio_core::error::{FolioError, Result};
use std::sync::Arc;

/// Precondition check in front of every admin use case.
#[derive(Clone)]
pub struct AdminGate {
    auth: Arc<dyn AuthProvider>,
}

impl AdminGate {
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self { auth }
    }

    /// Requires a signed-in user.
    pub async fn require_session(&self) -> Result<AuthSession> {
        self.auth
            .current_session()
            .await
            .ok_or_else(|| FolioError::security("Authentication required"))
    }

    /// Requires a signed-in user carrying the admin claim.
    pub async fn require_admin(&self) -> Result<AuthSession> {
        let session = self.require_session().await?;
        if !session.is_admin() {
            tracing::warn!("User {} attempted an admin operation", session.uid);
            return Err(FolioError::security("Admin privileges required"));
        }
        Ok(session)
    }
}

/// Assigns and lists the `admin` custom claim.
///
/// Claim changes only need an authenticated caller so the very first admin
/// can be bootstrapped.
pub struct AdminClaimUseCase {
    gate: AdminGate,
    claims: Arc<dyn AdminClaimService>,
}

impl AdminClaimUseCase {
    pub fn new(gate: AdminGate, claims: Arc<dyn AdminClaimService>) -> Self {
        Self { gate, claims }
    }

    pub async fn set_admin_claim(&self, uid: &str, is_admin: bool) -> Result<ClaimUpdate> {
        let caller = self.gate.require_session().await?;
        tracing::info!("{} sets admin={} on {}", caller.uid, is_admin, uid);
        self.claims.set_admin_claim(uid, is_admin).await
    }

    pub async fn set_admin_claim_by_email_or_uid(
        &self,
        uid: Option<&str>,
        email: Option<&str>,
        is_admin: Option<bool>,
    ) -> Result<ClaimUpdate> {
        self.gate.require_session().await?;
        self.claims
            .set_admin_claim_by_email_or_uid(uid, email, is_admin)
            .await
    }

    pub async fn list_users(&self) -> Result<Vec<UserRecord>> {
        self.gate.require_session().await?;
        self.claims.list_users().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use folio_core::auth::UserClaims;

    struct FixedAuth(Option<AuthSession>);

    #[async_trait]
    impl AuthProvider for FixedAuth {
        async fn current_session(&self) -> Option<AuthSession> {
            self.0.clone()
        }
    }

    fn gate(session: Option<(&str, bool)>) -> AdminGate {
        AdminGate::new(Arc::new(FixedAuth(session.map(|(uid, admin)| AuthSession {
            uid: uid.to_string(),
            email: None,
            claims: UserClaims { admin },
        }))))
    }

    #[tokio::test]
    async fn test_gate_rejects_anonymous_and_non_admin() {
        assert!(gate(None).require_admin().await.unwrap_err().is_security());
        assert!(gate(Some(("u1", false))).require_admin().await.unwrap_err().is_security());
        assert!(gate(Some(("u1", false))).require_session().await.is_ok());
        assert_eq!(gate(Some(("u2", true))).require_admin().await.unwrap().uid, "u2");
    }
}
