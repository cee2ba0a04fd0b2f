//! Station request/response models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::station;

use super::InstructorDto;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StationRequest {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Station with its instructor roster.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StationResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub instructors: Vec<InstructorDto>,
}

impl StationResponse {
    pub fn from_model(m: station::Model, instructors: Vec<InstructorDto>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            image_url: m.image_url,
            instructors,
        }
    }
}

/// Compact station reference embedded in other responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StationSummary {
    pub id: Uuid,
    pub name: String,
}

impl From<station::Model> for StationSummary {
    fn from(m: station::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}
