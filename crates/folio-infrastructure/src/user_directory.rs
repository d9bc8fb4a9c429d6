//! User directory and admin claims over the document store.
//!
//! Users are documents in the `users` collection keyed by uid. The identity
//! provider owns sign-in; this directory mirrors what the admin-claim
//! endpoints need: uid, email and custom claims.

use async_trait::async_trait;
use folio_core::auth::{
    AdminClaimService, AuthProvider, AuthSession, ClaimUpdate, LIST_USERS_LIMIT, UserClaims,
    UserRecord,
};
use folio_core::error::{FolioError, Result};
use folio_core::store::{DocumentStore, Filter, ID_FIELD, Query, RawDocument};
use serde_json::{Value, json};
use std::sync::Arc;

pub const USERS_COLLECTION: &str = "users";

pub struct StoreUserDirectory {
    store: Arc<dyn DocumentStore>,
}

impl StoreUserDirectory {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Registers a user without claims. Fails if the uid is taken.
    pub async fn register(&self, uid: &str, email: Option<&str>) -> Result<UserRecord> {
        let mut document = RawDocument::new();
        document.insert("email".to_string(), json!(email));
        document.insert("customClaims".to_string(), json!(UserClaims::default()));
        let stored = self.store.create_with_id(USERS_COLLECTION, uid, document).await?;
        tracing::info!("Registered user {}", uid);
        decode(stored)
    }

    pub async fn find(&self, uid: &str) -> Result<Option<UserRecord>> {
        self.store
            .get_by_id(USERS_COLLECTION, uid)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let query = Query::new().filter(Filter::eq("email", email)).limit(1);
        let mut found = self.store.get_all(USERS_COLLECTION, &query).await?;
        found.pop().map(decode).transpose()
    }

    /// Builds the session a signed-in `uid` would carry.
    pub async fn session_for(&self, uid: &str) -> Result<Option<AuthSession>> {
        Ok(self.find(uid).await?.map(|user| AuthSession {
            uid: user.uid,
            email: user.email,
            claims: user.custom_claims,
        }))
    }
}

fn decode(mut document: RawDocument) -> Result<UserRecord> {
    // the directory keys users by uid; the store calls it `id`
    if let Some(id) = document.remove(ID_FIELD) {
        document.insert("uid".to_string(), id);
    }
    Ok(serde_json::from_value(Value::Object(document))?)
}

#[async_trait]
impl AdminClaimService for StoreUserDirectory {
    async fn set_admin_claim(&self, uid: &str, is_admin: bool) -> Result<ClaimUpdate> {
        let mut patch = RawDocument::new();
        patch.insert(
            "customClaims".to_string(),
            json!(UserClaims { admin: is_admin }),
        );
        self.store
            .update(USERS_COLLECTION, uid, patch)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    FolioError::not_found("user", uid)
                } else {
                    e
                }
            })?;

        tracing::info!("Admin claim set to {} for user {}", is_admin, uid);
        Ok(ClaimUpdate {
            uid: uid.to_string(),
            admin: is_admin,
            message: format!("Admin claim set to {is_admin} for user {uid}"),
        })
    }

    async fn set_admin_claim_by_email_or_uid(
        &self,
        uid: Option<&str>,
        email: Option<&str>,
        is_admin: Option<bool>,
    ) -> Result<ClaimUpdate> {
        let target = match (uid, email) {
            (Some(uid), _) => uid.to_string(),
            (None, Some(email)) => self
                .find_by_email(email)
                .await?
                .map(|user| user.uid)
                .ok_or_else(|| FolioError::not_found("user", email))?,
            (None, None) => {
                return Err(FolioError::Validation(vec![
                    "Either uid or email must be provided".to_string(),
                ]));
            }
        };
        self.set_admin_claim(&target, is_admin.unwrap_or(true)).await
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        let query = Query::new().limit(LIST_USERS_LIMIT);
        self.store
            .get_all(USERS_COLLECTION, &query)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }
}

/// Auth provider with a fixed session, resolved once at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticAuthProvider {
    session: Option<AuthSession>,
}

impl StaticAuthProvider {
    pub fn new(session: Option<AuthSession>) -> Self {
        Self { session }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    async fn current_session(&self) -> Option<AuthSession> {
        self.session.clone()
    }
}
