//! API key request/response models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::api_key;

/// Request to create an API key for a user.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateApiKeyRequest {
    /// Human label, e.g. "door controller".
    pub name: String,
    /// Optional expiry. Expiry is evaluated at verification time; it is
    /// never written back to the active flag.
    pub expires_at: Option<DateTime<Utc>>,
}

/// API key representation.
///
/// `key` carries the plaintext secret exactly once, in the response to the
/// creating request. Everywhere else it is the empty string.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiKeyResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub key: String,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
}

impl ApiKeyResponse {
    /// Build a response; `key` is the plaintext secret at creation time and
    /// empty everywhere else.
    pub fn from_model(m: api_key::Model, key: String) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            name: m.name,
            key,
            is_active: m.is_active,
            expires_at: m.expires_at,
            created_at: m.created_at,
            created_by: m.created_by,
        }
    }
}
