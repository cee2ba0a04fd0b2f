//! Badge request/response models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{badge, station};

use super::StationSummary;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BadgeRequest {
    pub name: String,
    pub description: Option<String>,
    pub station_id: Uuid,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BadgeResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub station: StationSummary,
}

impl BadgeResponse {
    pub fn from_models(badge: badge::Model, station: station::Model) -> Self {
        Self {
            id: badge.id,
            name: badge.name,
            description: badge.description,
            station: station.into(),
        }
    }
}
