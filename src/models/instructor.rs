//! Instructor request/response models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{instructor, user};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct InstructorRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InstructorDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub station_id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

impl InstructorDto {
    pub fn from_models(row: instructor::Model, user: user::Model) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            station_id: row.station_id,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}
