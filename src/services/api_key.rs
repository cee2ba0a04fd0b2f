//! API key issuance, verification, listing and revocation.
//!
//! The plaintext secret exists exactly once outside this module: in the
//! response to the creating request. Storage only ever sees the SHA-256
//! hash.

use chrono::Utc;
use rand::RngExt;
use sea_orm::{DatabaseConnection, TransactionTrait};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::db;
use crate::entity::api_key;
use crate::error::{AppError, AppResult};
use crate::models::{ApiKeyResponse, CreateApiKeyRequest};
use crate::services::admin_log;

/// API key prefix.
const KEY_PREFIX: &str = "mbr_";
/// Length of the random part of a generated secret.
const KEY_RANDOM_LENGTH: usize = 32;

/// Generate a new high-entropy secret.
fn generate_secret() -> String {
    let random_part: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(KEY_RANDOM_LENGTH)
        .map(char::from)
        .collect();

    format!("{}{}", KEY_PREFIX, random_part)
}

/// Hash an API key secret using SHA-256.
pub fn hash_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Issue a new key for `for_user` on behalf of the admin `as_admin`.
///
/// The key row and its audit entry commit in one transaction. The returned
/// response is the only place the plaintext secret ever appears.
pub async fn create(
    db: &DatabaseConnection,
    as_admin: Uuid,
    for_user: Uuid,
    req: &CreateApiKeyRequest,
) -> AppResult<ApiKeyResponse> {
    db::users::find_by_id(db, for_user)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    let secret = generate_secret();
    let key_hash = hash_secret(&secret);

    let txn = db.begin().await?;

    let key = db::api_keys::insert(&txn, for_user, &req.name, &key_hash, req.expires_at, as_admin)
        .await?;

    admin_log::add_log(
        &txn,
        as_admin,
        &format!(
            "Created API key {} named {} for user {}",
            key.id, key.name, for_user
        ),
    )
    .await?;

    txn.commit().await?;

    Ok(ApiKeyResponse::from_model(key, secret))
}

/// Verify a presented secret and return the matching key record.
///
/// Expiry is derived at verification time; `is_active` is never flipped when
/// a key expires, so an expired key still lists as active.
pub async fn verify(db: &DatabaseConnection, presented: &str) -> AppResult<api_key::Model> {
    let key_hash = hash_secret(presented);

    let key = db::api_keys::find_by_hash(db, &key_hash)
        .await?
        .ok_or(AppError::InvalidApiKey)?;

    if !key.is_active {
        return Err(AppError::ApiKeyInactive);
    }

    if let Some(expires_at) = key.expires_at
        && expires_at < Utc::now()
    {
        return Err(AppError::ApiKeyExpired);
    }

    Ok(key)
}

/// All live keys for a user. The secret field is always blank here; the
/// plaintext is unrecoverable after creation.
pub async fn list_for_user(db: &DatabaseConnection, user_id: Uuid) -> AppResult<Vec<ApiKeyResponse>> {
    let keys = db::api_keys::list_for_user(db, user_id).await?;

    Ok(keys
        .into_iter()
        .map(|k| ApiKeyResponse::from_model(k, String::new()))
        .collect())
}

/// Revoke a key. Revocation is a soft delete with no restore path, audited
/// in the same transaction.
pub async fn delete(db: &DatabaseConnection, as_admin: Uuid, id: Uuid) -> AppResult<()> {
    let txn = db.begin().await?;

    let key = db::api_keys::find_by_id(&txn, id)
        .await?
        .ok_or(AppError::ApiKeyNotFound)?;

    db::api_keys::soft_delete(&txn, key).await?;

    admin_log::add_log(&txn, as_admin, &format!("Deleted API key {}", id)).await?;

    txn.commit().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_secret() {
        let secret = generate_secret();
        assert!(secret.starts_with(KEY_PREFIX));
        assert_eq!(secret.len(), KEY_PREFIX.len() + KEY_RANDOM_LENGTH);
        assert_ne!(secret, generate_secret());
    }

    #[test]
    fn test_hash_secret() {
        let hash1 = hash_secret("mbr_test123");
        let hash2 = hash_secret("mbr_test123");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64); // SHA-256 produces 64 hex chars
        assert_ne!(hash1, hash_secret("mbr_test124"));
    }
}
