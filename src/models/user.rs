//! User request/response models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{membership_level, user};

/// Membership level as embedded in user responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MembershipLevelDto {
    pub id: Uuid,
    pub name: String,
}

impl From<membership_level::Model> for MembershipLevelDto {
    fn from(m: membership_level::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

/// Compact user representation for listings and embedded references.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub membership_level: Option<MembershipLevelDto>,
    pub created_at: DateTime<Utc>,
}

impl UserSummary {
    /// Build a summary, blanking hidden contact fields unless the viewer may
    /// see them (self or admin).
    pub fn from_model(
        m: user::Model,
        membership_level: Option<membership_level::Model>,
        reveal_hidden: bool,
    ) -> Self {
        let email = if reveal_hidden || m.email_visible.unwrap_or(true) {
            m.email
        } else {
            String::new()
        };

        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            email,
            membership_level: membership_level.map(Into::into),
            created_at: m.created_at,
        }
    }
}

/// Full user representation for detail views.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserDetail {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub email_visible: Option<bool>,
    pub phone_visible: Option<bool>,
    pub postal_code: Option<String>,
    pub roles: Vec<String>,
    pub membership_level: Option<MembershipLevelDto>,
    pub instructor_station_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl UserDetail {
    pub fn from_model(
        m: user::Model,
        roles: Vec<String>,
        membership_level: Option<membership_level::Model>,
        instructor_station_ids: Vec<Uuid>,
        reveal_hidden: bool,
    ) -> Self {
        let email = if reveal_hidden || m.email_visible.unwrap_or(true) {
            m.email
        } else {
            String::new()
        };
        let phone = if reveal_hidden || m.phone_visible.unwrap_or(true) {
            m.phone
        } else {
            None
        };

        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            email,
            phone,
            email_visible: m.email_visible,
            phone_visible: m.phone_visible,
            postal_code: m.postal_code,
            roles,
            membership_level: membership_level.map(Into::into),
            instructor_station_ids,
            created_at: m.created_at,
        }
    }
}

/// Profile fields a user (or admin) may change. Email and id are claim-owned
/// and never updatable through this API.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email_visible: Option<bool>,
    pub phone_visible: Option<bool>,
    pub postal_code: Option<String>,
}
