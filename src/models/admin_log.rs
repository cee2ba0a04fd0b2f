//! Audit log response models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserSummary;

/// One audit entry with the acting user's summary embedded.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminLogDto {
    pub id: Uuid,
    pub user: UserSummary,
    pub log: String,
    pub created_at: DateTime<Utc>,
}
