//! Donation request/response models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{donation, user};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DonationRequest {
    /// Donating member, if known. Anonymous donations omit this.
    pub user_id: Option<Uuid>,
    pub amount_in_cents: i64,
    pub purpose: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DonationResponse {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub donor_name: Option<String>,
    pub amount_in_cents: i64,
    pub purpose: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DonationResponse {
    pub fn from_models(m: donation::Model, user: Option<user::Model>) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            donor_name: user.map(|u| format!("{} {}", u.first_name, u.last_name)),
            amount_in_cents: m.amount_in_cents,
            purpose: m.purpose,
            notes: m.notes,
            created_at: m.created_at,
        }
    }
}
